//! Chess advisor: keeps a UCI engine analysing the game in progress and
//! republishes its suggestion with opening identification.

pub mod config;
pub mod orchestrator;
pub mod rules;
pub mod terminal;

pub use orchestrator::{
    spawn_advisor, AdvisorConfig, AdvisorError, AdvisorEvent, AdvisorHandle, AdvisorView,
};
pub use rules::{RulesEngine, RulesError, StandardRules};
