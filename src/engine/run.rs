//! Run pipeline
//!
//! One weekly run as a single atomic batch: check feasibility, score the
//! snapshot, advance the rotation, run the optimizer pass the cycle position
//! calls for, and assemble a `WeekPlan` for the downstream consumers
//! (display, email, chart, ledger). Everything here is pure over the
//! snapshot; persistence is the caller's decision.

use anyhow::{bail, Result};

use crate::engine::misery::MiseryTable;
use crate::engine::rotation::{advance, OptimizeMode};
use crate::engine::swap::{optimize_full, optimize_partial, Trade};
use crate::ledger::CompletionCounts;
use crate::roster::{Assignment, ChoreId, CycleState, PersonId, PreferenceSet, Roster, Week};

/// The immutable inputs of one run, read once at start
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// People and chores for this run
    pub roster: Roster,
    /// Normalized preference rankings
    pub preferences: PreferenceSet,
    /// Historical completion counts from the ledger
    pub history: CompletionCounts,
    /// The last recorded cycle state, if any
    pub prior: Option<CycleState>,
    /// Explicit week override; otherwise the week follows the prior state
    pub week_override: Option<Week>,
}

/// Per-person before/after view of the week
#[derive(Debug, Clone, PartialEq)]
pub struct PersonReport {
    /// Who this row describes
    pub person: PersonId,
    /// Chore after rotation, before optimization
    pub before_chore: Option<ChoreId>,
    /// Chore in the final assignment
    pub after_chore: Option<ChoreId>,
    /// Misery after rotation, before optimization
    pub misery_before: f64,
    /// Misery in the final assignment
    pub misery_after: f64,
}

/// Everything a finished run hands to its consumers
#[derive(Debug, Clone, PartialEq)]
pub struct WeekPlan {
    /// The cycle state to carry into the next run
    pub state: CycleState,
    /// Which optimizer pass ran
    pub mode: OptimizeMode,
    /// People displaced by the weekly rotation
    pub displaced: Vec<PersonId>,
    /// The raw rotated assignment the optimizer started from
    pub pre_optimization: Assignment,
    /// Trades the optimizer committed, in commit order
    pub trades: Vec<Trade>,
    /// Per-person before/after rows, ascending by id
    pub reports: Vec<PersonReport>,
    /// Total misery before optimization
    pub total_before: f64,
    /// Total misery after optimization
    pub total_after: f64,
}

/// Plan one week: rotate, optimize, and summarize.
///
/// Fatal conditions (infeasible roster, a swap-invariant violation) abort
/// before the caller ever reaches the ledger write.
pub fn plan_week(snapshot: &Snapshot) -> Result<WeekPlan> {
    check_feasibility(&snapshot.roster)?;

    let misery = MiseryTable::build(&snapshot.roster, &snapshot.preferences, &snapshot.history);
    let rotated = advance(
        &snapshot.roster,
        snapshot.prior.as_ref(),
        snapshot.week_override,
    );

    let outcome = match rotated.mode {
        OptimizeMode::Full => optimize_full(&snapshot.roster, &misery, &rotated.assignment)?,
        OptimizeMode::Partial => optimize_partial(
            &snapshot.roster,
            &misery,
            &rotated.assignment,
            &rotated.displaced,
        )?,
    };

    let total_before = misery.total(&rotated.assignment);
    let total_after = misery.total(&outcome.assignment);
    if total_after > total_before {
        bail!("Optimization increased total misery from {total_before} to {total_after}");
    }

    let reports = snapshot
        .roster
        .active_people()
        .map(|p| PersonReport {
            person: p.id,
            before_chore: rotated.assignment.chore_of(p.id),
            after_chore: outcome.assignment.chore_of(p.id),
            misery_before: misery.person_score(p.id, &rotated.assignment),
            misery_after: misery.person_score(p.id, &outcome.assignment),
        })
        .collect();

    // A full pass re-baselines the cycle on its optimized result; partial
    // passes keep the baseline the cycle started with.
    let cycle_start = match rotated.mode {
        OptimizeMode::Full => outcome.assignment.clone(),
        OptimizeMode::Partial => rotated.cycle_start,
    };

    Ok(WeekPlan {
        state: CycleState {
            cycle_number: rotated.cycle_number,
            week: rotated.week,
            cycle_start,
            current: outcome.assignment,
        },
        mode: rotated.mode,
        displaced: rotated.displaced,
        pre_optimization: rotated.assignment,
        trades: outcome.trades,
        reports,
        total_before,
        total_after,
    })
}

/// The roster can support a run only when there is at least one active
/// person, at least one chore, and no more chores than people.
fn check_feasibility(roster: &Roster) -> Result<()> {
    let people = roster.active_people().count();
    let chores = roster.chores().len();

    if people == 0 {
        bail!("Infeasible roster: no active people");
    }
    if chores == 0 {
        bail!("Infeasible roster: no chores defined");
    }
    if chores > people {
        bail!(
            "Infeasible roster: {chores} chores but only {people} active people; \
             deactivate {} chore(s) or bring people back",
            chores - people
        );
    }

    Ok(())
}
