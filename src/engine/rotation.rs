//! Rotation engine
//!
//! A four-state machine over the weeks of a chore cycle. The `W4 → W1`
//! transition starts a new cycle: every chore's owner shifts one step along
//! the ascending-id ring of active people, and the result becomes the new
//! cycle-start baseline. Mid-cycle transitions carry full-cycle chores over
//! from the baseline and pass each one-week chore further along the ring,
//! swapping assignments with the receiving person.
//!
//! Output is always the raw rotated assignment plus the set of people whose
//! one-week chore changed; the optimizers take it from there.

use crate::roster::{Assignment, ChoreCategory, CycleState, PersonId, Roster, Week};

/// Which optimizer pass follows a rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizeMode {
    /// Cycle trading among all eligible people (cycle start)
    Full,
    /// Pairwise trading among displaced people only (mid-cycle)
    Partial,
}

/// The result of advancing the week
#[derive(Debug, Clone, PartialEq)]
pub struct Rotated {
    /// Cycle counter after the transition
    pub cycle_number: u32,
    /// Week after the transition
    pub week: Week,
    /// The cycle-start baseline this week derives from
    pub cycle_start: Assignment,
    /// Raw rotated assignment, before any optimization
    pub assignment: Assignment,
    /// People whose one-week chore changed, ascending by id
    pub displaced: Vec<PersonId>,
    /// Which optimizer pass applies
    pub mode: OptimizeMode,
}

/// Advance the cycle state machine by one week.
///
/// With no prior state the run starts a fresh cycle at week 1 from the seed
/// assignment, whatever `week_override` says; otherwise the target week is
/// the override or the successor of the prior week.
#[must_use]
pub fn advance(
    roster: &Roster,
    prior: Option<&CycleState>,
    week_override: Option<Week>,
) -> Rotated {
    let Some(prior) = prior else {
        let seed = seed_assignment(roster);
        return Rotated {
            cycle_number: 1,
            week: Week::W1,
            cycle_start: seed.clone(),
            assignment: seed,
            displaced: Vec::new(),
            mode: OptimizeMode::Full,
        };
    };

    let week = week_override.unwrap_or_else(|| prior.week.next());
    if week.is_cycle_start() {
        full_rotation(roster, prior)
    } else {
        weekly_rotation(roster, prior, week)
    }
}

/// Start a new cycle: shift every chore's owner one active-ring step.
fn full_rotation(roster: &Roster, prior: &CycleState) -> Rotated {
    let base = repair(roster, &prior.current);
    let rotated: Assignment = base
        .iter()
        .map(|(chore, person)| (chore, roster.ring_step(person, 1)))
        .collect();

    Rotated {
        cycle_number: prior.cycle_number + 1,
        week: Week::W1,
        cycle_start: rotated.clone(),
        assignment: rotated,
        displaced: Vec::new(),
        mode: OptimizeMode::Full,
    }
}

/// Mid-cycle week: restore the baseline, then pass each one-week chore
/// `week - 1` ring steps along, swapping with the receiving person.
fn weekly_rotation(roster: &Roster, prior: &CycleState, week: Week) -> Rotated {
    let base = repair(roster, &prior.cycle_start);
    let steps = usize::from(week.index()) - 1;

    let mut working = base.clone();
    let mut displaced = Vec::new();

    for chore in roster.chores() {
        if chore.category != ChoreCategory::OneWeek {
            continue;
        }
        let Some(holder) = working.holder(chore.id) else {
            continue;
        };
        let target = roster.ring_step(holder, steps);
        if target == holder {
            continue;
        }

        // The one-week chore moves to the target; the displaced holder
        // takes whatever the target held, or goes idle.
        let target_chore = working.chore_of(target);
        working.assign(chore.id, target);
        if let Some(freed) = target_chore {
            working.assign(freed, holder);
        }

        for person in [holder, target] {
            if !displaced.contains(&person) {
                displaced.push(person);
            }
        }
    }

    displaced.sort_unstable();

    Rotated {
        cycle_number: prior.cycle_number,
        week,
        cycle_start: base,
        assignment: working,
        displaced,
        mode: OptimizeMode::Partial,
    }
}

/// Deterministic first-run assignment: chores and active people paired in
/// ascending-id order.
#[must_use]
pub fn seed_assignment(roster: &Roster) -> Assignment {
    roster
        .chores()
        .iter()
        .zip(roster.active_people())
        .map(|(chore, person)| (chore.id, person.id))
        .collect()
}

/// Reconcile a persisted assignment with the current roster.
///
/// Chores held by people no longer active become orphans; orphans are handed
/// to unassigned active people in ascending-id order. Chores absent from the
/// persisted assignment are treated as orphans too.
fn repair(roster: &Roster, persisted: &Assignment) -> Assignment {
    let mut repaired = Assignment::new();
    let mut used: Vec<PersonId> = Vec::new();
    let mut orphans = Vec::new();

    for chore in roster.chores() {
        match persisted.holder(chore.id) {
            Some(person)
                if roster.person(person).is_some_and(|p| p.active)
                    && !used.contains(&person) =>
            {
                repaired.assign(chore.id, person);
                used.push(person);
            }
            _ => orphans.push(chore.id),
        }
    }

    let mut idle = roster
        .active_people()
        .map(|p| p.id)
        .filter(|id| !used.contains(id));

    for chore in orphans {
        if let Some(person) = idle.next() {
            repaired.assign(chore, person);
        }
    }

    repaired
}
