//! Misery bar chart
//!
//! Renders per-person misery before and after optimization as aligned
//! terminal bars, the text rendition of the original results chart.

use colored::Colorize;

use crate::engine::run::WeekPlan;
use crate::roster::Roster;

/// Maximum bar width in characters
const BAR_WIDTH: usize = 24;

/// Print the before/after chart to stderr
pub fn print_chart(plan: &WeekPlan, roster: &Roster) {
    let max = plan
        .reports
        .iter()
        .flat_map(|r| [r.misery_before, r.misery_after])
        .fold(1.0_f64, f64::max);

    eprintln!("\n  {}", "Misery before / after".dimmed());
    for report in &plan.reports {
        let name = roster.person_name(report.person);
        let before_chore = report
            .before_chore
            .map_or_else(|| "(idle)".to_string(), |c| roster.chore_name(c));
        let after_chore = report
            .after_chore
            .map_or_else(|| "(idle)".to_string(), |c| roster.chore_name(c));

        eprintln!(
            "  {:<6} {:<width$} {:>5.1}  {}",
            name.bold(),
            bar(report.misery_before, max).red(),
            report.misery_before,
            before_chore.dimmed(),
            width = BAR_WIDTH
        );
        eprintln!(
            "  {:<6} {:<width$} {:>5.1}  {}",
            "",
            bar(report.misery_after, max).blue(),
            report.misery_after,
            after_chore.dimmed(),
            width = BAR_WIDTH
        );
    }
}

/// A bar scaled so `max` fills the full width. Nonzero values always get at
/// least one block.
fn bar(value: f64, max: f64) -> String {
    "█".repeat(scaled_width(value, max))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_width(value: f64, max: f64) -> usize {
    if value <= 0.0 || max <= 0.0 {
        return 0;
    }
    let width = (value / max * BAR_WIDTH as f64).round() as usize;
    width.clamp(1, BAR_WIDTH)
}
