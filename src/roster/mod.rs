//! Roster management
//!
//! This module handles the roster data model (people, chores, preferences)
//! and the TOML configuration boundary.

pub mod config;
pub mod types;

pub use config::RosterConfig;
pub use types::{
    Assignment, Chore, ChoreCategory, ChoreId, CycleState, Person, PersonId, PreferenceSet,
    Roster, Week,
};
