//! Swap optimizers
//!
//! Consent-based local improvement over a rotated assignment. Both modes
//! commit a trade only when every party strictly lowers their misery, so the
//! result is guaranteed no worse than the raw rotation for anyone. No claim
//! of a global optimum is made.
//!
//! Full mode (cycle start) searches for directed trading cycles over all
//! eligible people: each person's candidate edge points at the holder of the
//! strictly-better chore they covet most, and any loop of such edges can
//! rotate chores around itself. Partial mode (mid-cycle) is deliberately
//! smaller: a single pass of pairwise trades among the people displaced by
//! the weekly rotation, no chaining.
//!
//! The graph is keyed by stable person ids and walked iteratively, so the
//! search restarts cleanly after every committed trade and never recurses.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{bail, Result};

use crate::engine::misery::MiseryTable;
use crate::roster::{Assignment, PersonId, Roster};

/// An executed trade: members in cycle order, each taking the chore of the
/// next member (wrapping). A pairwise trade is simply a 2-cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    /// Participants in cycle order, first member has the smallest id
    pub members: Vec<PersonId>,
    /// Total misery removed by this trade (always > 0)
    pub total_gain: f64,
}

/// Result of an optimizer pass
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOutcome {
    /// The assignment after all committed trades
    pub assignment: Assignment,
    /// Trades in commit order
    pub trades: Vec<Trade>,
}

/// Full-mode optimization: repeated cycle trading among all eligible people.
///
/// Committed members leave the pool, the candidate graph is rebuilt over the
/// remainder, and scanning repeats until no improving cycle exists. Each
/// person commits at most once per run; termination follows from the strict
/// total-misery decrease of every executed cycle.
pub fn optimize_full(
    roster: &Roster,
    misery: &MiseryTable,
    assignment: &Assignment,
) -> Result<SwapOutcome> {
    let mut working = assignment.clone();
    let mut committed: BTreeSet<PersonId> = BTreeSet::new();
    let mut trades = Vec::new();

    loop {
        let eligible: Vec<PersonId> = roster
            .active_person_ids()
            .into_iter()
            .filter(|id| !committed.contains(id) && working.chore_of(*id).is_some())
            .collect();

        let edges = candidate_edges(misery, &working, &eligible);
        let cycles = find_cycles(&edges, &eligible);
        if cycles.is_empty() {
            return Ok(SwapOutcome {
                assignment: working,
                trades,
            });
        }

        for cycle in cycles {
            let trade = execute_cycle(misery, &mut working, &cycle)?;
            committed.extend(&cycle);
            trades.push(trade);
        }
    }
}

/// Partial-mode optimization: one pass of pairwise trades among displaced
/// people, evaluated in ascending composite id order. A swapped person is
/// excluded from further pairing; no chaining.
pub fn optimize_partial(
    roster: &Roster,
    misery: &MiseryTable,
    assignment: &Assignment,
    displaced: &[PersonId],
) -> Result<SwapOutcome> {
    let mut working = assignment.clone();
    let mut trades = Vec::new();

    let mut eligible: Vec<PersonId> = displaced
        .iter()
        .copied()
        .filter(|&id| {
            roster.person(id).is_some_and(|p| p.active) && working.chore_of(id).is_some()
        })
        .collect();
    eligible.sort_unstable();
    eligible.dedup();

    let mut swapped: BTreeSet<PersonId> = BTreeSet::new();

    for (i, &a) in eligible.iter().enumerate() {
        if swapped.contains(&a) {
            continue;
        }
        for &b in &eligible[i + 1..] {
            if swapped.contains(&b) {
                continue;
            }
            if !pair_improves(misery, &working, a, b) {
                continue;
            }
            let trade = execute_cycle(misery, &mut working, &[a, b])?;
            trades.push(trade);
            swapped.insert(a);
            swapped.insert(b);
            break;
        }
    }

    Ok(SwapOutcome {
        assignment: working,
        trades,
    })
}

/// Build the candidate graph: at most one outgoing edge per person, pointing
/// at the holder of the minimal-misery chore among chores held by other
/// eligible people, and only when that chore is strictly better than their
/// own. Ties resolve to the lowest-id holder by scan order.
fn candidate_edges(
    misery: &MiseryTable,
    assignment: &Assignment,
    eligible: &[PersonId],
) -> BTreeMap<PersonId, PersonId> {
    let mut edges = BTreeMap::new();

    for &person in eligible {
        let Some(own_chore) = assignment.chore_of(person) else {
            continue;
        };
        let own = misery.score(person, own_chore);

        let mut best: Option<(f64, PersonId)> = None;
        for &other in eligible {
            if other == person {
                continue;
            }
            let Some(their_chore) = assignment.chore_of(other) else {
                continue;
            };
            let s = misery.score(person, their_chore);
            if s >= own {
                continue;
            }
            // Strict < keeps the first (lowest-id) holder on ties
            if best.is_none_or(|(b, _)| s < b) {
                best = Some((s, other));
            }
        }

        if let Some((_, target)) = best {
            edges.insert(person, target);
        }
    }

    edges
}

/// Find disjoint directed cycles of length >= 2 in a functional graph.
///
/// Walks successor chains iteratively from each node in ascending id order,
/// so discovered cycles come out smallest-starting-id first. Nodes on a walk
/// that ends without closing a loop are finished and never revisited.
fn find_cycles(
    edges: &BTreeMap<PersonId, PersonId>,
    eligible: &[PersonId],
) -> Vec<Vec<PersonId>> {
    let mut cycles = Vec::new();
    let mut done: BTreeSet<PersonId> = BTreeSet::new();

    for &start in eligible {
        if done.contains(&start) {
            continue;
        }

        let mut path: Vec<PersonId> = Vec::new();
        let mut node = start;

        loop {
            if let Some(pos) = path.iter().position(|&p| p == node) {
                // Closed a loop within this walk
                cycles.push(path[pos..].to_vec());
                break;
            }
            if done.contains(&node) {
                // Ran into an earlier walk; no new cycle here
                break;
            }
            path.push(node);
            match edges.get(&node) {
                Some(&next) => node = next,
                None => break,
            }
        }

        done.extend(path);
    }

    cycles
}

/// Whether both members of a pair strictly improve by taking each other's
/// chore.
fn pair_improves(misery: &MiseryTable, assignment: &Assignment, a: PersonId, b: PersonId) -> bool {
    let (Some(ca), Some(cb)) = (assignment.chore_of(a), assignment.chore_of(b)) else {
        return false;
    };
    misery.score(a, cb) < misery.score(a, ca) && misery.score(b, ca) < misery.score(b, cb)
}

/// Rotate chores around a cycle of people, validating first that every
/// member strictly improves. A violation means the candidate search is
/// broken, so it aborts the run rather than persisting a bad swap.
fn execute_cycle(
    misery: &MiseryTable,
    assignment: &mut Assignment,
    members: &[PersonId],
) -> Result<Trade> {
    let mut chores = Vec::with_capacity(members.len());
    for &person in members {
        match assignment.chore_of(person) {
            Some(chore) => chores.push(chore),
            None => bail!("Swap cycle includes a person holding no chore"),
        }
    }

    // Member i takes member (i + 1)'s chore; all-or-nothing commit
    let mut total_gain = 0.0;
    for (i, &person) in members.iter().enumerate() {
        let incoming = chores[(i + 1) % chores.len()];
        let before = misery.score(person, chores[i]);
        let after = misery.score(person, incoming);
        if after >= before {
            bail!(
                "Swap invariant violated: person {} would go from {before} to {after}",
                person.0
            );
        }
        total_gain += before - after;
    }

    for (i, &person) in members.iter().enumerate() {
        assignment.assign(chores[(i + 1) % chores.len()], person);
    }

    Ok(Trade {
        members: members.to_vec(),
        total_gain,
    })
}
