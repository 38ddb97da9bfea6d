//! Points and streak rules applied to a single completion.
//!
//! A completion is on time when the room was last cleaned at most
//! [`CYCLE_DAYS`] calendar days ago. A room that was never cleaned has an
//! unbounded distance and therefore scores as late on its first cleaning.
//!
//! | Outcome | Points | Streak |
//! |---------|--------|--------|
//! | On time | [`ON_TIME_POINTS`] | +1 |
//! | Late    | [`LATE_POINTS`]    | reset to 0 |
//!
//! When the updated streak is a positive multiple of
//! [`STREAK_BONUS_THRESHOLD`], [`STREAK_BONUS_POINTS`] are added.

use serde::{Deserialize, Serialize};

use crate::clock::Elapsed;
use crate::rules::{
    CYCLE_DAYS, LATE_POINTS, ON_TIME_POINTS, STREAK_BONUS_POINTS, STREAK_BONUS_THRESHOLD,
};

/// Result of scoring one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionScore {
    pub on_time: bool,
    /// Points before any streak bonus.
    pub base_points: u32,
    pub bonus_awarded: bool,
    /// Total points credited for this completion.
    pub points: u32,
    /// Streak value after this completion.
    pub streak: u32,
}

/// Whether a completion at distance `elapsed` from the last cleaning is on time.
pub fn is_on_time(elapsed: Elapsed) -> bool {
    elapsed.is_within(CYCLE_DAYS)
}

/// Score a completion given the distance since the room was last cleaned and
/// the streak before this completion.
pub fn score_completion(elapsed: Elapsed, current_streak: u32) -> CompletionScore {
    let on_time = is_on_time(elapsed);
    let base_points = if on_time { ON_TIME_POINTS } else { LATE_POINTS };
    let streak = if on_time {
        current_streak.saturating_add(1)
    } else {
        0
    };

    let bonus_awarded = streak > 0 && streak % STREAK_BONUS_THRESHOLD == 0;
    let points = if bonus_awarded {
        base_points + STREAK_BONUS_POINTS
    } else {
        base_points
    };

    CompletionScore {
        on_time,
        base_points,
        bonus_awarded,
        points,
        streak,
    }
}
