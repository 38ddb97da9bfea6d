//! The application snapshot and its mutating operations.
//!
//! `AppState` is the single container for rooms, profile, cleaning log,
//! earned badges and the selected tab. It is persisted and reloaded as one
//! unit. All mutation goes through four operations:
//!
//! - [`AppState::complete_task`]
//! - [`AppState::update_room_settings`]
//! - [`AppState::set_active_tab`]
//! - [`AppState::replace_rooms`]
//!
//! ## Usage
//!
//! ```ignore
//! let mut state = db.load_state()?.unwrap_or_default();
//! if let Some(outcome) = state.complete_task("cuisine", Utc::now()) {
//!     println!("+{} points", outcome.score.points);
//! }
//! db.save_state(&state)?;
//! ```

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::badges::{badge_definitions, evaluate_badges, EarnedBadge};
use crate::clock::{classify_status, days_since, RoomStatus};
use crate::history::{CleaningLog, CleaningLogEntry, WeeklyReport};
use crate::profile::UserProfile;
use crate::room::{Room, RoomRegistry, RoomSettings};
use crate::scoring::{score_completion, CompletionScore};
use crate::suggestion;

/// Presentation tab, persisted so the UI reopens where it was left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    #[serde(rename = "quête", alias = "quest")]
    Quest,
    #[serde(rename = "pièces", alias = "rooms")]
    Rooms,
    #[serde(rename = "stats")]
    Stats,
    #[serde(rename = "réglages", alias = "settings")]
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Quest, Tab::Rooms, Tab::Stats, Tab::Settings];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Quest => "quest",
            Tab::Rooms => "rooms",
            Tab::Stats => "stats",
            Tab::Settings => "settings",
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quest" | "quête" => Ok(Tab::Quest),
            "rooms" | "pièces" => Ok(Tab::Rooms),
            "stats" => Ok(Tab::Stats),
            "settings" | "réglages" => Ok(Tab::Settings),
            other => Err(format!("unknown tab: {other}")),
        }
    }
}

/// What a completion changed, for the caller to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOutcome {
    pub room_id: String,
    pub room_name: String,
    pub score: CompletionScore,
    pub log_entry_id: String,
    pub new_badges: Vec<EarnedBadge>,
}

/// Whole application state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub rooms: RoomRegistry,
    #[serde(default)]
    pub user_profile: UserProfile,
    #[serde(default)]
    pub cleaning_history: CleaningLog,
    #[serde(default)]
    pub earned_badges: Vec<EarnedBadge>,
    #[serde(default)]
    pub active_tab: Tab,
}

fn lenient_field<T>(object: &serde_json::Map<String, serde_json::Value>, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match object.get(key) {
        None | Some(serde_json::Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!(field = key, error = %e, "discarding unreadable snapshot field");
            T::default()
        }),
    }
}

impl AppState {
    /// Decode a persisted snapshot, defaulting each top-level field that is
    /// absent or unreadable. Never fails.
    pub fn from_json_lenient(json: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "snapshot is not valid JSON, starting fresh");
                return Self::default();
            }
        };
        let Some(object) = value.as_object() else {
            tracing::warn!("snapshot is not a JSON object, starting fresh");
            return Self::default();
        };

        Self {
            rooms: lenient_field(object, "rooms"),
            user_profile: lenient_field(object, "userProfile"),
            cleaning_history: lenient_field(object, "cleaningHistory"),
            earned_badges: lenient_field(object, "earnedBadges"),
            active_tab: lenient_field(object, "activeTab"),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Mark `room_id` as cleaned at `now`.
    ///
    /// Updates the room, the profile, the log and the earned badges together.
    /// Returns `None` and changes nothing when the room is unknown.
    pub fn complete_task(&mut self, room_id: &str, now: DateTime<Utc>) -> Option<CompletionOutcome> {
        let Some(room) = self.rooms.get_mut(room_id) else {
            tracing::debug!(room_id, "complete_task: unknown room, ignoring");
            return None;
        };

        let elapsed = days_since(room.last_cleaned_date, now);
        let score = score_completion(elapsed, self.user_profile.current_streak);

        room.mark_cleaned(now);
        let room_name = room.name.clone();

        let profile = &mut self.user_profile;
        profile.score = profile.score.saturating_add(score.points);
        profile.current_streak = score.streak;
        profile.last_task_completion_date = Some(now);

        let log_entry_id = uuid::Uuid::new_v4().to_string();
        self.cleaning_history.append(CleaningLogEntry {
            id: log_entry_id.clone(),
            room_id: room_id.to_string(),
            room_name: room_name.clone(),
            date: now,
            points_earned: score.points,
            is_bonus_streak_awarded: score.bonus_awarded,
        });

        let new_badges = evaluate_badges(&badge_definitions(), &self.rooms, &self.earned_badges, now);
        self.earned_badges.extend(new_badges.iter().cloned());

        tracing::info!(
            room_id,
            on_time = score.on_time,
            points = score.points,
            streak = score.streak,
            bonus = score.bonus_awarded,
            "task completed"
        );
        for badge in &new_badges {
            tracing::info!(badge_id = %badge.id, "badge earned");
        }

        Some(CompletionOutcome {
            room_id: room_id.to_string(),
            room_name,
            score,
            log_entry_id,
            new_badges,
        })
    }

    /// Apply a settings patch to one room. Unknown ids are ignored.
    pub fn update_room_settings(&mut self, room_id: &str, settings: &RoomSettings) -> bool {
        let updated = self.rooms.update_settings(room_id, settings);
        if updated {
            tracing::debug!(room_id, ?settings, "room settings updated");
        } else {
            tracing::debug!(room_id, "update_room_settings: unknown room, ignoring");
        }
        updated
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        tracing::debug!(tab = tab.as_str(), "active tab changed");
        self.active_tab = tab;
    }

    /// Replace the whole room set.
    pub fn replace_rooms(&mut self, rooms: Vec<Room>) {
        self.rooms = RoomRegistry::new(rooms);
        tracing::debug!(count = self.rooms.len(), "room set replaced");
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn suggested_room(&self, now: DateTime<Utc>) -> Option<&Room> {
        suggestion::suggest_room(&self.rooms, now)
    }

    pub fn is_cleaning_day_due(&self, now: DateTime<Utc>) -> bool {
        suggestion::is_cleaning_day_due(&self.user_profile, now)
    }

    pub fn room_status(&self, room_id: &str, now: DateTime<Utc>) -> Option<RoomStatus> {
        self.rooms.get(room_id).map(|room| classify_status(room, now))
    }

    pub fn house_cleanliness(&self, now: DateTime<Utc>) -> f64 {
        suggestion::house_cleanliness(&self.rooms, now)
    }

    pub fn weekly_report(&self, now: DateTime<Utc>) -> WeeklyReport {
        self.cleaning_history.weekly_report(&self.rooms, now)
    }

    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.earned_badges.iter().any(|b| b.id == badge_id)
    }
}
