use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Points, streak and pacing state of the single player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Never decreases.
    #[serde(default)]
    pub score: u32,
    /// Consecutive on-time completions across all rooms.
    #[serde(default)]
    pub current_streak: u32,
    /// Most recent completion of any room.
    #[serde(default)]
    pub last_task_completion_date: Option<DateTime<Utc>>,
}
