//! Ordered set of rooms keyed by identifier.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{initial_rooms, Room, RoomSettings};

/// All rooms of the house, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Room>", into = "Vec<Room>")]
pub struct RoomRegistry {
    rooms: Vec<Room>,
}

/// Filter for listing rooms.
#[derive(Debug, Clone, Default)]
pub struct RoomQuery {
    /// Case-insensitive substring of the display name.
    pub search: Option<String>,
    pub include_inactive: bool,
}

impl RoomRegistry {
    /// Build a registry; later duplicates of an identifier are dropped.
    pub fn new(rooms: Vec<Room>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(rooms.len());
        for room in rooms {
            if seen.insert(room.id.clone()) {
                kept.push(room);
            } else {
                tracing::warn!(room_id = %room.id, "dropping duplicate room id");
            }
        }
        Self { rooms: kept }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn active(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| r.is_active)
    }

    pub fn get(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    /// Apply a settings patch. Returns `false` for an unknown id.
    pub fn update_settings(&mut self, id: &str, settings: &RoomSettings) -> bool {
        match self.get_mut(id) {
            Some(room) => {
                room.apply(settings);
                true
            }
            None => false,
        }
    }

    /// Rooms matching `query`, active rooms first, then by name.
    pub fn list(&self, query: &RoomQuery) -> Vec<&Room> {
        let needle = query.search.as_deref().map(str::to_lowercase);
        let mut rooms: Vec<&Room> = self
            .rooms
            .iter()
            .filter(|r| query.include_inactive || r.is_active)
            .filter(|r| match &needle {
                Some(n) => r.name.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .collect();

        rooms.sort_by(|a, b| {
            b.is_active
                .cmp(&a.is_active)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        rooms
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(initial_rooms())
    }
}

impl From<Vec<Room>> for RoomRegistry {
    fn from(rooms: Vec<Room>) -> Self {
        Self::new(rooms)
    }
}

impl From<RoomRegistry> for Vec<Room> {
    fn from(registry: RoomRegistry) -> Self {
        registry.rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_is_the_catalog() {
        let registry = RoomRegistry::default();
        assert_eq!(registry.len(), 13);
        assert!(registry.get("cuisine").is_some());
        assert!(registry.get("attic").is_none());
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let registry = RoomRegistry::new(vec![
            Room::new("a", "First", "✨"),
            Room::new("a", "Second", "✨"),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().name, "First");
    }

    #[test]
    fn deserialized_duplicates_keep_first() {
        let json = r#"[
            {"id": "a", "defaultName": "A", "name": "First", "icon": "✨"},
            {"id": "a", "defaultName": "A", "name": "Second", "icon": "✨"}
        ]"#;
        let registry: RoomRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().name, "First");

        let value = serde_json::to_value(&registry).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn update_unknown_room_is_noop() {
        let mut registry = RoomRegistry::default();
        let before = registry.clone();
        let changed = registry.update_settings(
            "attic",
            &RoomSettings {
                is_active: Some(false),
                ..Default::default()
            },
        );
        assert!(!changed);
        assert_eq!(registry, before);
    }

    #[test]
    fn list_filters_and_orders() {
        let mut registry = RoomRegistry::default();
        registry.update_settings(
            "ch_lilian",
            &RoomSettings {
                is_active: Some(false),
                ..Default::default()
            },
        );

        let active = registry.list(&RoomQuery::default());
        assert_eq!(active.len(), 12);
        assert_eq!(active[0].id, "cave");

        let chambres = registry.list(&RoomQuery {
            search: Some("CHAMBRE".into()),
            include_inactive: true,
        });
        let ids: Vec<_> = chambres.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["ch_albane", "ch_maelys", "ch_parents", "ch_lilian"]);
    }
}
