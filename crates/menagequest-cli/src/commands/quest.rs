use chrono::Utc;
use clap::Subcommand;
use menagequest_core::suggestion::quest_urgency;
use menagequest_core::{classify_status, days_since, format_date, Room, RoomStatus};
use serde::Serialize;

use super::{load_state, print_json, print_outcome, CmdResult};

#[derive(Subcommand, Default, Clone, Copy)]
pub enum QuestAction {
    /// Show today's quest (default)
    #[default]
    Show,
    /// Mark today's quest as done
    Complete,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuestRoom<'a> {
    id: &'a str,
    name: &'a str,
    icon: &'a str,
    status: RoomStatus,
    last_cleaned: Option<chrono::DateTime<Utc>>,
    days_since: Option<i64>,
    urgency: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuestView<'a> {
    room: Option<QuestRoom<'a>>,
    cleaning_day_due: bool,
    house_cleanliness: f64,
}

fn quest_room(room: &Room, now: chrono::DateTime<Utc>) -> QuestRoom<'_> {
    QuestRoom {
        id: &room.id,
        name: &room.name,
        icon: &room.icon,
        status: classify_status(room, now),
        last_cleaned: room.last_cleaned_date,
        days_since: days_since(room.last_cleaned_date, now).days(),
        urgency: quest_urgency(room, now),
    }
}

pub fn run(action: QuestAction, json: bool) -> CmdResult {
    let (db, mut state) = load_state()?;
    let now = Utc::now();

    match action {
        QuestAction::Show => {
            let view = QuestView {
                room: state.suggested_room(now).map(|room| quest_room(room, now)),
                cleaning_day_due: state.is_cleaning_day_due(now),
                house_cleanliness: state.house_cleanliness(now),
            };
            if json {
                return print_json(&view);
            }

            println!("Propreté générale : {:.0}%", view.house_cleanliness);
            let Some(room) = view.room else {
                println!("Toutes les pièces sont impeccables !");
                println!("Revenez plus tard ou activez plus de pièces dans les réglages.");
                return Ok(());
            };

            println!("🌟 Quête du Jour 🌟");
            if view.cleaning_day_due {
                println!("Il est temps pour une nouvelle quête !");
            } else {
                println!("Vous avez nettoyé récemment. Reposez-vous ! La prochaine quête est bientôt.");
            }
            println!("{} {} [{}]", room.icon, room.name, room.id);
            println!("Statut : {}", room.status.label());
            match room.days_since {
                Some(days) => println!(
                    "Dernier nettoyage : {} ({days} jour(s) passés)",
                    format_date(room.last_cleaned)
                ),
                None => println!("Dernier nettoyage : {}", format_date(None)),
            }
            println!("Urgence : {:.0}%", room.urgency);
        }
        QuestAction::Complete => {
            let Some(room_id) = state.suggested_room(now).map(|room| room.id.clone()) else {
                println!("Toutes les pièces sont impeccables !");
                return Ok(());
            };
            if let Some(outcome) = state.complete_task(&room_id, now) {
                db.save_state(&state)?;
                if json {
                    return print_json(&outcome);
                }
                print_outcome(&outcome);
            }
        }
    }
    Ok(())
}
