//! Rich CLI display for weekly runs
//!
//! Renders a `WeekPlan` as human-readable terminal output. All output goes
//! to stderr so stdout remains clean for piping.

use colored::Colorize;

use crate::engine::rotation::OptimizeMode;
use crate::engine::run::WeekPlan;
use crate::roster::Roster;

/// Display handler for a weekly run
pub struct WeekDisplay<'a> {
    roster: &'a Roster,
}

impl<'a> WeekDisplay<'a> {
    /// Create a display handler over the run's roster
    #[must_use]
    pub const fn new(roster: &'a Roster) -> Self {
        Self { roster }
    }

    /// Print the week header at the start of output
    pub fn print_header(&self, plan: &WeekPlan) {
        eprintln!(
            "\n{} {}",
            "===".bold().cyan(),
            format!(
                "Chores: cycle {}, week {}",
                plan.state.cycle_number,
                plan.state.week.index()
            )
            .bold()
            .cyan()
        );
        eprintln!("{}", "─".repeat(50).dimmed());
    }

    /// Print the final assignment table
    pub fn print_assignment(&self, plan: &WeekPlan) {
        for (chore, person) in plan.state.current.iter() {
            let marker = if plan.pre_optimization.holder(chore) == Some(person) {
                " ".normal()
            } else {
                "⇄".blue().bold()
            };
            eprintln!(
                "  {marker} {:<16} {}",
                self.roster.chore_name(chore),
                self.roster.person_name(person).bold()
            );
        }
    }

    /// Print the trades the optimizer committed
    pub fn print_trades(&self, plan: &WeekPlan) {
        if plan.trades.is_empty() {
            eprintln!("  {}", "No agreeable trades found".dimmed());
            return;
        }
        for trade in &plan.trades {
            let loop_text = trade
                .members
                .iter()
                .map(|&p| self.roster.person_name(p))
                .collect::<Vec<_>>()
                .join("  <-  ");
            eprintln!(
                "  {} {} {}",
                "⇄".blue(),
                loop_text,
                format!("(misery -{:.1})", trade.total_gain).dimmed()
            );
        }
    }

    /// Print the post-run summary line
    pub fn print_summary(&self, plan: &WeekPlan) {
        eprintln!("{}", "─".repeat(50).dimmed());

        let mode = match plan.mode {
            OptimizeMode::Full => "full optimization",
            OptimizeMode::Partial => "partial optimization",
        };
        let delta = plan.total_before - plan.total_after;
        let delta_text = if delta > 0.0 {
            format!("-{delta:.1}").green().bold().to_string()
        } else {
            "±0.0".dimmed().to_string()
        };
        eprintln!(
            "  {mode} | misery {:.1} → {:.1} ({delta_text})",
            plan.total_before, plan.total_after
        );

        if !plan.displaced.is_empty() {
            let names = plan
                .displaced
                .iter()
                .map(|&p| self.roster.person_name(p))
                .collect::<Vec<_>>()
                .join(", ");
            eprintln!("  {} {names}", "Displaced:".dimmed());
        }
    }

    /// Print the whole run report
    pub fn print_all(&self, plan: &WeekPlan) {
        self.print_header(plan);
        self.print_assignment(plan);
        self.print_trades(plan);
        self.print_summary(plan);
    }
}
