//! Rota - Deterministic chore rotation runner
//!
//! Rota assigns recurring household chores across a repeating four-week
//! cycle and then brokers swaps that every trading party strictly prefers.
//! Rotation is a four-state week machine; optimization is consent-based
//! local improvement, never a global search.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod engine;
pub mod ledger;
pub mod report;
pub mod roster;

#[cfg(test)]
pub mod testutil;

// Re-export commonly used types
pub use engine::{plan_week, MiseryTable, OptimizeMode, Snapshot, Trade, WeekPlan};
pub use ledger::{HistoryLedger, JsonlLedger, LedgerSnapshot, WeekRecord};
pub use roster::{Assignment, CycleState, RosterConfig, Week};
