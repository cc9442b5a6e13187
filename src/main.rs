//! Rota - Deterministic chore rotation runner
//!
//! CLI entry point for the weekly chore run.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;

use rota::engine::run::{plan_week, Snapshot, WeekPlan};
use rota::ledger::jsonl::JsonlLedger;
use rota::ledger::{HistoryLedger, WeekRecord};
use rota::report::chart::print_chart;
use rota::report::display::WeekDisplay;
use rota::report::email::{render_email, upcoming_friday, write_email};
use rota::roster::{RosterConfig, Week};

/// Deterministic chore rotation runner
///
/// Advances the four-week chore cycle by one week, brokers swaps that every
/// trading party strictly prefers, and records the result in the history
/// ledger (unless --dry-run).
#[derive(Parser, Debug)]
#[command(name = "rota", version, about)]
struct Cli {
    /// Path to the roster.toml configuration file
    #[arg(long, default_value = "roster.toml")]
    config: PathBuf,

    /// Directory for the history ledger (.rota by default)
    #[arg(long, default_value = ".rota")]
    ledger_dir: PathBuf,

    /// Directory for the rendered email body (.rota by default)
    #[arg(long, default_value = ".rota")]
    out_dir: PathBuf,

    /// Override the week index within the cycle (1-4); otherwise derived
    /// from the ledger's last record
    #[arg(long)]
    week: Option<u8>,

    /// Compute and report without writing the ledger
    #[arg(long)]
    dry_run: bool,
}

/// Parse the optional `--week` flag into a typed week.
fn parse_week_flag(week: Option<u8>) -> Result<Option<Week>> {
    week.map(|w| {
        Week::from_index(w).with_context(|| format!("--week must be 1-4, got {w}"))
    })
    .transpose()
}

/// Build the ledger record for a finished plan.
fn build_record(plan: &WeekPlan) -> WeekRecord {
    let misery: BTreeMap<_, _> = plan
        .reports
        .iter()
        .map(|r| (r.person, r.misery_after))
        .collect();

    WeekRecord {
        recorded_at: Utc::now(),
        state: plan.state.clone(),
        misery,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and normalize the roster configuration
    let config = RosterConfig::from_path(&cli.config)
        .with_context(|| format!("Failed to load roster from '{}'", cli.config.display()))?;
    for name in config.people_without_preferences() {
        eprintln!("Note: no preferences for '{name}', using neutral ranks");
    }

    // Read the immutable snapshot: roster, preferences, history
    let ledger = JsonlLedger::new(&cli.ledger_dir).context("Failed to initialize ledger")?;
    let history = ledger.load().context("Failed to read history ledger")?;

    let snapshot = Snapshot {
        roster: config.roster(),
        preferences: config.preferences(),
        history: history.counts,
        prior: history.last_state,
        week_override: parse_week_flag(cli.week)?,
    };

    // The whole rotation-plus-optimization pipeline is one atomic batch
    let plan = plan_week(&snapshot)?;

    // Report
    let display = WeekDisplay::new(&snapshot.roster);
    display.print_all(&plan);
    print_chart(&plan, &snapshot.roster);

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Failed to create output directory: {}", cli.out_dir.display()))?;
    let friday = upcoming_friday(Local::now().date_naive());
    let email_path = cli.out_dir.join("email.html");
    write_email(&email_path, &render_email(&plan, &snapshot.roster, friday))?;
    eprintln!("\nEmail draft written to {}", email_path.display());

    // Persist: the ledger write is the commit point
    if cli.dry_run {
        eprintln!("Dry run: ledger not updated");
    } else {
        ledger
            .record(&build_record(&plan))
            .context("Failed to write history ledger")?;
        eprintln!("Recorded week {} in history", plan.state.week.index());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota::roster::PersonId;

    #[test]
    fn test_parse_week_flag_valid() {
        assert_eq!(parse_week_flag(None).unwrap(), None);
        assert_eq!(parse_week_flag(Some(1)).unwrap(), Some(Week::W1));
        assert_eq!(parse_week_flag(Some(4)).unwrap(), Some(Week::W4));
    }

    #[test]
    fn test_parse_week_flag_out_of_range() {
        let err = parse_week_flag(Some(5)).unwrap_err();
        assert!(err.to_string().contains("must be 1-4"));
        assert!(parse_week_flag(Some(0)).is_err());
    }

    #[test]
    fn test_build_record_carries_state_and_misery() {
        let config = RosterConfig::parse(
            r#"
[[person]]
id = 1
name = "AB"

[[person]]
id = 2
name = "CD"

[[chore]]
id = 1
name = "Dishes"
category = "one-week"

[[chore]]
id = 2
name = "Lawn"
category = "one-week"

[preferences.AB]
Dishes = 1
Lawn = 2

[preferences.CD]
Dishes = 2
Lawn = 1
"#,
        )
        .unwrap();

        let plan = plan_week(&Snapshot {
            roster: config.roster(),
            preferences: config.preferences(),
            history: rota::ledger::CompletionCounts::new(),
            prior: None,
            week_override: None,
        })
        .unwrap();

        let record = build_record(&plan);
        assert_eq!(record.state, plan.state);
        assert_eq!(record.misery.len(), 2);
        assert!(record.misery.contains_key(&PersonId(1)));
    }
}
