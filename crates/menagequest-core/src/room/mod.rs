//! Trackable rooms and their cleaning state.

mod catalog;
mod registry;

pub use catalog::{initial_rooms, ICON_PALETTE};
pub use registry::{RoomQuery, RoomRegistry};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A location in the house that gets cleaned on a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Stable identifier, e.g. `cuisine`.
    pub id: String,
    /// Name from the initial catalog; never edited.
    pub default_name: String,
    /// Display name, user-editable.
    pub name: String,
    pub icon: String,
    /// `None` means never cleaned.
    #[serde(default)]
    pub last_cleaned_date: Option<DateTime<Utc>>,
    /// Incremented by exactly one per completion, never decremented.
    #[serde(default)]
    pub cleaning_count: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Room {
    /// A never-cleaned, active room whose display name is its default name.
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            default_name: name.clone(),
            name,
            icon: icon.into(),
            last_cleaned_date: None,
            cleaning_count: 0,
            is_active: true,
        }
    }

    pub fn has_been_cleaned(&self) -> bool {
        self.cleaning_count > 0
    }

    /// Record one completion at `at`.
    pub(crate) fn mark_cleaned(&mut self, at: DateTime<Utc>) {
        self.last_cleaned_date = Some(at);
        self.cleaning_count = self.cleaning_count.saturating_add(1);
    }

    /// Apply the fields present in `settings`.
    pub fn apply(&mut self, settings: &RoomSettings) {
        if let Some(name) = &settings.name {
            self.name = name.clone();
        }
        if let Some(icon) = &settings.icon {
            self.icon = icon.clone();
        }
        if let Some(is_active) = settings.is_active {
            self.is_active = is_active;
        }
    }
}

/// Partial update of the user-editable room fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl RoomSettings {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.icon.is_none() && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn apply_only_touches_provided_fields() {
        let mut room = Room::new("cave", "Cave", "🍾");
        room.cleaning_count = 4;
        room.apply(&RoomSettings {
            name: Some("Cave à vin".into()),
            ..Default::default()
        });
        assert_eq!(room.name, "Cave à vin");
        assert_eq!(room.default_name, "Cave");
        assert_eq!(room.icon, "🍾");
        assert!(room.is_active);
        assert_eq!(room.cleaning_count, 4);
    }

    #[test]
    fn mark_cleaned_bumps_count_and_date() {
        let mut room = Room::new("cave", "Cave", "🍾");
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        room.mark_cleaned(at);
        assert_eq!(room.cleaning_count, 1);
        assert_eq!(room.last_cleaned_date, Some(at));
        assert!(room.has_been_cleaned());
    }

    #[test]
    fn room_json_uses_camel_case() {
        let room = Room::new("wc1", "WC 1", "🚽");
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["defaultName"], "WC 1");
        assert_eq!(json["lastCleanedDate"], serde_json::Value::Null);
        assert_eq!(json["cleaningCount"], 0);
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn room_reads_javascript_iso_dates() {
        let json = r#"{"id":"salon","defaultName":"Salon","name":"Salon","icon":"🛋️",
            "lastCleanedDate":"2024-03-01T18:30:00.000Z","cleaningCount":2,"isActive":false}"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(
            room.last_cleaned_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap())
        );
        assert!(!room.is_active);
    }
}
