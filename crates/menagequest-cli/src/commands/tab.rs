use clap::Subcommand;
use menagequest_core::Tab;

use super::{load_state, CmdResult};

#[derive(Subcommand)]
pub enum TabAction {
    /// Print the active tab
    Show,
    /// Select a tab (quest, rooms, stats, settings)
    Set { tab: Tab },
}

pub fn run(action: TabAction) -> CmdResult {
    let (db, mut state) = load_state()?;
    match action {
        TabAction::Show => println!("{}", state.active_tab.as_str()),
        TabAction::Set { tab } => {
            state.set_active_tab(tab);
            db.save_state(&state)?;
            println!("{}", tab.as_str());
        }
    }
    Ok(())
}
