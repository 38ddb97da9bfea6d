use chrono::Utc;
use clap::Subcommand;
use menagequest_core::room::ICON_PALETTE;
use menagequest_core::{classify_status, days_since, format_date, Config, RoomQuery, RoomSettings};
use serde::Serialize;

use super::{load_state, print_json, print_outcome, CmdResult};

#[derive(Subcommand)]
pub enum RoomAction {
    /// List rooms with their status
    List {
        /// Include inactive rooms
        #[arg(long)]
        all: bool,
        /// Only rooms whose name contains this text
        #[arg(long)]
        search: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a room as cleaned now
    Complete {
        /// Room ID (e.g. "cuisine")
        id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a room's name, icon or active flag
    Set {
        /// Room ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// List the icons offered for rooms
    Icons,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoomLine<'a> {
    #[serde(flatten)]
    room: &'a menagequest_core::Room,
    status: menagequest_core::RoomStatus,
    days_since: Option<i64>,
}

pub fn run(action: RoomAction) -> CmdResult {
    match action {
        RoomAction::List { all, search, json } => list(all, search, json),
        RoomAction::Complete { id, json } => complete(&id, json),
        RoomAction::Set {
            id,
            name,
            icon,
            active,
        } => set(&id, RoomSettings { name, icon, is_active: active }),
        RoomAction::Icons => {
            println!("{}", ICON_PALETTE.join(" "));
            Ok(())
        }
    }
}

fn list(all: bool, search: Option<String>, json: bool) -> CmdResult {
    let config = Config::read_or_default();
    let (_db, state) = load_state()?;
    let now = Utc::now();

    let query = RoomQuery {
        search,
        include_inactive: all || config.rooms.show_inactive,
    };
    let lines: Vec<RoomLine> = state
        .rooms
        .list(&query)
        .into_iter()
        .map(|room| RoomLine {
            room,
            status: classify_status(room, now),
            days_since: days_since(room.last_cleaned_date, now).days(),
        })
        .collect();

    if json {
        return print_json(&lines);
    }
    if lines.is_empty() {
        println!("Aucune pièce trouvée.");
        return Ok(());
    }
    for line in &lines {
        let room = line.room;
        let days = line
            .days_since
            .map(|d| format!(" ({d} j)"))
            .unwrap_or_default();
        let inactive = if room.is_active { "" } else { " [inactive]" };
        println!(
            "{} {:<24} {:<16} dernier : {}{days}  x{}{inactive}  [{}]",
            room.icon,
            room.name,
            line.status.label(),
            format_date(room.last_cleaned_date),
            room.cleaning_count,
            room.id,
        );
    }
    Ok(())
}

fn complete(id: &str, json: bool) -> CmdResult {
    let (db, mut state) = load_state()?;
    let Some(outcome) = state.complete_task(id, Utc::now()) else {
        return Err(format!("unknown room: {id}").into());
    };
    db.save_state(&state)?;

    if json {
        return print_json(&outcome);
    }
    print_outcome(&outcome);
    Ok(())
}

fn set(id: &str, settings: RoomSettings) -> CmdResult {
    if settings.is_empty() {
        return Err("nothing to change: pass --name, --icon or --active".into());
    }
    if let Some(icon) = &settings.icon {
        if !ICON_PALETTE.contains(&icon.as_str()) {
            eprintln!("warning: icon {icon} is not in the palette (see `room icons`)");
        }
    }

    let (db, mut state) = load_state()?;
    if !state.update_room_settings(id, &settings) {
        return Err(format!("unknown room: {id}").into());
    }
    db.save_state(&state)?;
    println!("ok");
    Ok(())
}
