//! Today's quest: which room to clean next, and whether to clean at all.

use chrono::{DateTime, Utc};

use crate::clock::{day_of, days_since, Elapsed};
use crate::profile::UserProfile;
use crate::room::{Room, RoomRegistry};
use crate::rules::{CYCLE_DAYS, PACE_DAYS};

/// Whether a room has gone a full cycle (or forever) without cleaning.
pub fn is_overdue(room: &Room, now: DateTime<Utc>) -> bool {
    days_since(room.last_cleaned_date, now).is_at_least(CYCLE_DAYS)
}

/// The active room to surface as today's quest.
///
/// Overdue rooms come first; within each group the longest-neglected room
/// wins, never-cleaned rooms before any dated one. Ties keep registry order.
pub fn suggest_room(rooms: &RoomRegistry, now: DateTime<Utc>) -> Option<&Room> {
    rooms
        .active()
        .min_by_key(|room| (!is_overdue(room, now), room.last_cleaned_date.map(day_of)))
}

/// Share of active rooms cleaned within the current cycle, as a percentage.
///
/// An empty house is considered perfectly clean.
pub fn house_cleanliness(rooms: &RoomRegistry, now: DateTime<Utc>) -> f64 {
    let (total, clean) = rooms.active().fold((0usize, 0usize), |(total, clean), room| {
        let fresh = matches!(
            days_since(room.last_cleaned_date, now),
            Elapsed::Days(d) if d < CYCLE_DAYS
        );
        (total + 1, clean + usize::from(fresh))
    });

    if total == 0 {
        return 100.0;
    }
    clean as f64 / total as f64 * 100.0
}

/// How pressing a room is, from 0 to 100. A never-cleaned room counts as two
/// cycles old.
pub fn quest_urgency(room: &Room, now: DateTime<Utc>) -> f64 {
    let days = days_since(room.last_cleaned_date, now)
        .days()
        .unwrap_or(CYCLE_DAYS * 2);
    (days as f64 / CYCLE_DAYS as f64 * 100.0).min(100.0)
}

/// Global pacing gate: true when no task was ever completed or the last one
/// was at least [`PACE_DAYS`] calendar days ago.
pub fn is_cleaning_day_due(profile: &UserProfile, now: DateTime<Utc>) -> bool {
    days_since(profile.last_task_completion_date, now).is_at_least(PACE_DAYS)
}
