//! Day-granularity date helpers.
//!
//! Every function takes the reference instant explicitly so results are
//! deterministic. Calendar days are taken from the UTC date.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::room::Room;
use crate::rules::{CYCLE_DAYS, DUE_SOON_DAYS};

/// Distance in whole calendar days, or `Never` for an absent timestamp.
///
/// `Never` orders after every finite day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Elapsed {
    Days(i64),
    Never,
}

impl Elapsed {
    /// Finite day count, if any.
    pub fn days(self) -> Option<i64> {
        match self {
            Elapsed::Days(d) => Some(d),
            Elapsed::Never => None,
        }
    }

    /// True when the distance is finite and at most `limit` days.
    pub fn is_within(self, limit: i64) -> bool {
        matches!(self, Elapsed::Days(d) if d <= limit)
    }

    /// True when the distance is at least `limit` days (always true for `Never`).
    pub fn is_at_least(self, limit: i64) -> bool {
        match self {
            Elapsed::Days(d) => d >= limit,
            Elapsed::Never => true,
        }
    }
}

/// Cleaning status of a room relative to its cycle deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Ok,
    DueSoon,
    Overdue,
}

impl RoomStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Ok => "OK",
            RoomStatus::DueSoon => "À FAIRE BIENTÔT",
            RoomStatus::Overdue => "EN RETARD",
        }
    }
}

/// Calendar date of an instant.
pub fn day_of(at: DateTime<Utc>) -> NaiveDate {
    at.date_naive()
}

/// Absolute number of calendar days between `at` and `now`.
pub fn days_since(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Elapsed {
    match at {
        Some(at) => Elapsed::Days((day_of(now) - day_of(at)).num_days().abs()),
        None => Elapsed::Never,
    }
}

/// Classify a room against its cycle deadline as of `reference`.
///
/// A deadline past the last representable date is never reached.
pub fn classify_status(room: &Room, reference: DateTime<Utc>) -> RoomStatus {
    let Some(last) = room.last_cleaned_date else {
        return RoomStatus::Overdue;
    };

    let today = day_of(reference);
    let Some(deadline) = day_of(last).checked_add_signed(Duration::days(CYCLE_DAYS)) else {
        return RoomStatus::Ok;
    };

    if today >= deadline {
        RoomStatus::Overdue
    } else if today >= deadline - Duration::days(DUE_SOON_DAYS) {
        RoomStatus::DueSoon
    } else {
        RoomStatus::Ok
    }
}

/// Render a timestamp as `dd/mm/yyyy`, or `Jamais` when absent.
pub fn format_date(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%d/%m/%Y").to_string(),
        None => "Jamais".to_string(),
    }
}
