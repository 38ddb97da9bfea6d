//! # Ménage Quest Core Library
//!
//! This library provides the scheduling and scoring engine behind Ménage
//! Quest, a gamified household cleaning tracker. All operations are exposed
//! through [`AppState`]; the `menagequest` CLI is a thin layer over the same
//! library.
//!
//! ## Architecture
//!
//! - **Clock**: day-granularity distances and room status classification
//! - **Rooms**: the room catalog and registry
//! - **Scoring**: points, on-time rule and streak bonus for one completion
//! - **Badges**: achievement definitions and evaluation
//! - **Suggestion**: today's quest, house cleanliness and the pacing gate
//! - **Storage**: SQLite snapshot persistence and TOML configuration
//!
//! Every time-dependent function takes the reference instant `now`
//! explicitly; nothing reads the system clock.
//!
//! ## Key Components
//!
//! - [`AppState`]: the persisted snapshot and its four mutating operations
//! - [`Database`]: snapshot persistence
//! - [`Config`]: user preferences

pub mod badges;
pub mod clock;
pub mod error;
pub mod history;
pub mod profile;
pub mod room;
pub mod rules;
pub mod scoring;
pub mod state;
pub mod storage;
pub mod suggestion;

pub use badges::{badge_definitions, BadgeDefinition, BadgeKind, EarnedBadge};
pub use clock::{classify_status, days_since, format_date, Elapsed, RoomStatus};
pub use error::{ConfigError, CoreError, DatabaseError};
pub use history::{CalendarDay, CleaningLog, CleaningLogEntry, WeeklyReport};
pub use profile::UserProfile;
pub use room::{Room, RoomQuery, RoomRegistry, RoomSettings};
pub use scoring::CompletionScore;
pub use state::{AppState, CompletionOutcome, Tab};
pub use storage::{Config, Database};
