pub mod config;
pub mod quest;
pub mod room;
pub mod stats;
pub mod tab;

use menagequest_core::storage::Database;
use menagequest_core::{AppState, CompletionOutcome};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the database and load the snapshot (or the initial state).
pub fn load_state() -> Result<(Database, AppState), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let state = db.load_state_or_default()?;
    Ok((db, state))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_outcome(outcome: &CompletionOutcome) {
    let score = &outcome.score;
    let timing = if score.on_time { "à l'heure" } else { "en retard" };
    println!("{} nettoyé(e) ({timing}) : +{} points", outcome.room_name, score.points);
    if score.bonus_awarded {
        println!("Bonus Streak ! Série de {}", score.streak);
    } else {
        println!("Série : {}", score.streak);
    }
    for badge in &outcome.new_badges {
        println!("Nouveau badge : {} {}", badge.icon, badge.name);
    }
}

/// Erase the saved snapshot.
pub fn reset(confirmed: bool) -> CmdResult {
    if !confirmed {
        return Err("refusing to erase all data without --yes".into());
    }
    let db = Database::open()?;
    if db.clear_state()? {
        println!("all data erased");
    } else {
        println!("nothing to erase");
    }
    Ok(())
}
