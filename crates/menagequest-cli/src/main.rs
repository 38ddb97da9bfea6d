use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "menagequest", version, about = "Ménage Quest CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's quest
    Quest {
        #[command(subcommand)]
        action: Option<commands::quest::QuestAction>,
        /// Print as JSON
        #[arg(long, global = true)]
        json: bool,
    },
    /// Room listing, completion and settings
    Room {
        #[command(subcommand)]
        action: commands::room::RoomAction,
    },
    /// Score, history, reports and badges
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Persisted presentation tab
    Tab {
        #[command(subcommand)]
        action: commands::tab::TabAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Erase all progress and settings
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = menagequest_core::Config::read_or_default().logging.level;
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Quest { action, json } => commands::quest::run(action.unwrap_or_default(), json),
        Commands::Room { action } => commands::room::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Tab { action } => commands::tab::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reset { yes } => commands::reset(yes),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "menagequest", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
