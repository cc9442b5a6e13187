//! Rotation and swap optimization engine
//!
//! This module holds the deterministic core: misery scoring, the four-week
//! rotation state machine, the consent-based swap optimizers, and the run
//! pipeline that ties them into one atomic batch.

pub mod misery;
pub mod rotation;
pub mod run;
pub mod swap;

pub use misery::MiseryTable;
pub use rotation::{OptimizeMode, Rotated};
pub use run::{plan_week, PersonReport, Snapshot, WeekPlan};
pub use swap::{SwapOutcome, Trade};
