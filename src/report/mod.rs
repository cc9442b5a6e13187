//! Reporting
//!
//! Downstream consumers of a finished `WeekPlan`: the colored terminal
//! summary, the HTML email body, and the before/after misery chart. None of
//! these feed back into the engine.

pub mod chart;
pub mod display;
pub mod email;

pub use display::WeekDisplay;
pub use email::{render_email, upcoming_friday, write_email};
