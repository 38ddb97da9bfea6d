//! Fixed scheduling and scoring rules.
//!
//! These values are part of the game and are not user-configurable; user
//! preferences live in [`crate::storage::Config`].

/// Target interval, in days, within which a room should be re-cleaned.
pub const CYCLE_DAYS: i64 = 14;

/// Minimum rest interval, in days, between prompted quests.
pub const PACE_DAYS: i64 = 2;

/// Number of days before the cycle deadline during which a room is "due soon".
pub const DUE_SOON_DAYS: i64 = 3;

/// Every multiple of this streak value fires a bonus.
pub const STREAK_BONUS_THRESHOLD: u32 = 5;

/// Extra points added when the streak bonus fires.
pub const STREAK_BONUS_POINTS: u32 = 10;

/// Points for a completion within the cycle.
pub const ON_TIME_POINTS: u32 = 3;

/// Points for a completion past the cycle (or a first-ever cleaning).
pub const LATE_POINTS: u32 = 1;

/// Cleaning-count thresholds for the per-room milestone badges.
pub const ROOM_MILESTONES: [u32; 3] = [3, 6, 9];

/// Storage key under which the whole application snapshot is persisted.
pub const STATE_STORAGE_KEY: &str = "menageModeQueteState";

/// Longest activity calendar window, in days.
pub const MAX_CALENDAR_DAYS: u32 = 366;
