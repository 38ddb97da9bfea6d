use chrono::Utc;
use clap::Subcommand;
use menagequest_core::{format_date, Config};

use super::{load_state, print_json, CmdResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Score and streak
    Profile {
        #[arg(long)]
        json: bool,
    },
    /// Report for the last seven days
    Report {
        #[arg(long)]
        json: bool,
    },
    /// Cleaning history, newest first
    History {
        /// Number of entries (defaults to stats.history_limit)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Completions per day
    Calendar {
        /// Number of days (defaults to stats.calendar_days)
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Earned badges
    Badges {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StatsAction) -> CmdResult {
    let config = Config::read_or_default();
    let (_db, state) = load_state()?;
    let now = Utc::now();

    match action {
        StatsAction::Profile { json } => {
            let profile = &state.user_profile;
            if json {
                return print_json(profile);
            }
            println!("Score : {}", profile.score);
            println!("Série : {}", profile.current_streak);
            println!(
                "Dernière quête : {}",
                format_date(profile.last_task_completion_date)
            );
            println!("Badges : {}", state.earned_badges.len());
        }
        StatsAction::Report { json } => {
            let report = state.weekly_report(now);
            if json {
                return print_json(&report);
            }
            println!("Rapport Hebdomadaire (7 derniers jours)");
            println!("Pièces uniques nettoyées : {}", report.rooms_cleaned);
            println!("Total actions de nettoyage : {}", report.total_actions);
            println!("Pièces actuellement en retard : {}", report.overdue_rooms.len());
            if !report.overdue_rooms.is_empty() {
                println!("En retard : {}", report.overdue_rooms.join(", "));
            }
        }
        StatsAction::History { limit, json } => {
            let limit = limit.unwrap_or(config.stats.history_limit);
            let entries: Vec<_> = state.cleaning_history.recent(limit).collect();
            if json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("Aucun nettoyage enregistré pour le moment.");
            }
            for entry in entries {
                let bonus = if entry.is_bonus_streak_awarded {
                    "  Bonus Streak!"
                } else {
                    ""
                };
                println!(
                    "{}  {} nettoyé(e)  +{}{bonus}",
                    format_date(Some(entry.date)),
                    entry.room_name,
                    entry.points_earned
                );
            }
        }
        StatsAction::Calendar { days, json } => {
            let days = days.unwrap_or(config.stats.calendar_days);
            let calendar = state.cleaning_history.activity_calendar(days, now);
            if json {
                return print_json(&calendar);
            }
            for day in &calendar {
                let marks = "●".repeat(day.completions);
                println!("{}  {marks}", day.date.format("%a %d/%m"));
            }
        }
        StatsAction::Badges { json } => {
            if json {
                return print_json(&state.earned_badges);
            }
            if state.earned_badges.is_empty() {
                println!("Aucun badge gagné pour le moment. Continuez comme ça !");
            }
            for badge in &state.earned_badges {
                println!(
                    "{} {}  (gagné le {})",
                    badge.icon,
                    badge.name,
                    format_date(Some(badge.achieved_date))
                );
            }
        }
    }
    Ok(())
}
