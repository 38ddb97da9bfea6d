//! Achievement badges.
//!
//! Definitions are built once from the initial room catalog. After every
//! completion the whole room set is re-scanned and every definition that is
//! not yet earned and whose condition now holds is awarded, in definition
//! order. Earned badges are never revoked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::room::{initial_rooms, RoomRegistry};
use crate::rules::ROOM_MILESTONES;

/// Identifier of the "every active room cleaned once" badge.
pub const ALL_ROOMS_BADGE_ID: &str = "all_rooms_active_once";

/// Condition under which a badge unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BadgeKind {
    /// A given room reached `threshold` cleanings (active or not).
    RoomMilestone { room_id: String, threshold: u32 },
    /// Every active room has been cleaned at least once.
    AllActiveRoomsCleaned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub kind: BadgeKind,
}

/// A badge that has been awarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedBadge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub achieved_date: DateTime<Utc>,
}

impl BadgeDefinition {
    /// Whether the unlock condition holds for `rooms`.
    pub fn is_satisfied(&self, rooms: &RoomRegistry) -> bool {
        match &self.kind {
            BadgeKind::RoomMilestone { room_id, threshold } => rooms
                .get(room_id)
                .is_some_and(|room| room.cleaning_count >= *threshold),
            BadgeKind::AllActiveRoomsCleaned => {
                let mut active = rooms.active().peekable();
                active.peek().is_some() && active.all(|room| room.has_been_cleaned())
            }
        }
    }

    fn award(&self, at: DateTime<Utc>) -> EarnedBadge {
        EarnedBadge {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            achieved_date: at,
        }
    }
}

fn milestone_icon(level: usize) -> &'static str {
    match level {
        0 => "🥉",
        1 => "🥈",
        _ => "🥇",
    }
}

/// Every badge that can be earned, in award order.
pub fn badge_definitions() -> Vec<BadgeDefinition> {
    let mut definitions: Vec<BadgeDefinition> = initial_rooms()
        .iter()
        .flat_map(|room| {
            ROOM_MILESTONES
                .iter()
                .enumerate()
                .map(move |(level, &threshold)| BadgeDefinition {
                    id: format!("{}_clean_{}", room.id, threshold),
                    name: format!("{} Maître(sse) N{}", room.default_name, level + 1),
                    description: format!("Nettoyé \"{}\" {} fois !", room.default_name, threshold),
                    icon: milestone_icon(level).to_string(),
                    kind: BadgeKind::RoomMilestone {
                        room_id: room.id.clone(),
                        threshold,
                    },
                })
        })
        .collect();

    definitions.push(BadgeDefinition {
        id: ALL_ROOMS_BADGE_ID.to_string(),
        name: "Explorateur de Propreté".to_string(),
        description: "Toutes les pièces actives nettoyées au moins une fois !".to_string(),
        icon: "🗺️".to_string(),
        kind: BadgeKind::AllActiveRoomsCleaned,
    });

    definitions
}

/// Badges from `definitions` that are not in `earned` and are now satisfied.
pub fn evaluate_badges(
    definitions: &[BadgeDefinition],
    rooms: &RoomRegistry,
    earned: &[EarnedBadge],
    now: DateTime<Utc>,
) -> Vec<EarnedBadge> {
    definitions
        .iter()
        .filter(|def| !earned.iter().any(|e| e.id == def.id))
        .filter(|def| def.is_satisfied(rooms))
        .map(|def| def.award(now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{Room, RoomSettings};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn definitions_cover_every_room_and_the_global_badge() {
        let defs = badge_definitions();
        assert_eq!(defs.len(), 13 * 3 + 1);
        assert_eq!(defs[0].id, "ch_parents_clean_3");
        assert_eq!(defs[0].name, "Chambre parents Maître(sse) N1");
        assert_eq!(defs[2].icon, "🥇");
        assert_eq!(defs.last().unwrap().id, ALL_ROOMS_BADGE_ID);
    }

    #[test]
    fn milestone_awarded_at_threshold() {
        let defs = badge_definitions();
        let mut rooms = RoomRegistry::default();
        rooms.get_mut("cuisine").unwrap().cleaning_count = 2;
        assert!(evaluate_badges(&defs, &rooms, &[], now()).is_empty());

        rooms.get_mut("cuisine").unwrap().cleaning_count = 3;
        let awarded = evaluate_badges(&defs, &rooms, &[], now());
        assert_eq!(awarded.len(), 1);
        assert_eq!(awarded[0].id, "cuisine_clean_3");
        assert_eq!(awarded[0].achieved_date, now());
    }

    #[test]
    fn multiple_awards_follow_definition_order() {
        let defs = badge_definitions();
        let mut rooms = RoomRegistry::default();
        rooms.get_mut("wc2").unwrap().cleaning_count = 7;
        rooms.get_mut("ch_parents").unwrap().cleaning_count = 3;
        let ids: Vec<_> = evaluate_badges(&defs, &rooms, &[], now())
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, ["ch_parents_clean_3", "wc2_clean_3", "wc2_clean_6"]);
    }

    #[test]
    fn earned_badges_are_not_awarded_twice() {
        let defs = badge_definitions();
        let mut rooms = RoomRegistry::default();
        rooms.get_mut("cave").unwrap().cleaning_count = 3;
        let first = evaluate_badges(&defs, &rooms, &[], now());
        assert_eq!(first.len(), 1);
        assert!(evaluate_badges(&defs, &rooms, &first, now()).is_empty());
    }

    #[test]
    fn earned_badges_survive_a_lower_count() {
        let mut state = crate::state::AppState::default();
        for day in 0..3 {
            state.complete_task("cave", now() + chrono::Duration::days(day));
        }
        assert!(state.has_badge("cave_clean_3"));

        state.rooms.get_mut("cave").unwrap().cleaning_count = 0;
        let outcome = state.complete_task("cave", now() + chrono::Duration::days(3)).unwrap();
        assert!(outcome.new_badges.is_empty());
        assert!(state.has_badge("cave_clean_3"));
        assert_eq!(state.earned_badges.len(), 1);
    }

    #[test]
    fn milestone_counts_inactive_rooms() {
        let defs = badge_definitions();
        let mut rooms = RoomRegistry::default();
        rooms.update_settings(
            "garage",
            &RoomSettings {
                is_active: Some(false),
                ..Default::default()
            },
        );
        rooms.get_mut("garage").unwrap().cleaning_count = 3;
        let awarded = evaluate_badges(&defs, &rooms, &[], now());
        assert_eq!(awarded[0].id, "garage_clean_3");
    }

    #[test]
    fn all_rooms_badge_ignores_inactive_rooms() {
        let defs = badge_definitions();
        let mut rooms = RoomRegistry::new(vec![
            Room::new("salon", "Salon", "🛋️"),
            Room::new("cave", "Cave", "🍾"),
        ]);
        rooms.get_mut("salon").unwrap().cleaning_count = 1;
        assert!(evaluate_badges(&defs, &rooms, &[], now()).is_empty());

        rooms.get_mut("cave").unwrap().is_active = false;
        let awarded = evaluate_badges(&defs, &rooms, &[], now());
        assert_eq!(awarded.len(), 1);
        assert_eq!(awarded[0].id, ALL_ROOMS_BADGE_ID);
    }

    #[test]
    fn all_rooms_badge_needs_an_active_room() {
        let defs = badge_definitions();
        let mut rooms = RoomRegistry::new(vec![Room::new("cave", "Cave", "🍾")]);
        rooms.get_mut("cave").unwrap().is_active = false;
        assert!(evaluate_badges(&defs, &rooms, &[], now()).is_empty());
    }
}
