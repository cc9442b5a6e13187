//! Misery scoring
//!
//! Derives a per-(person, chore) misery score from the stated preference
//! rank and the historical completion count. Lower is better. The one hard
//! contract: a chore the person has never performed scores exactly zero,
//! regardless of rank, which steers newcomers toward chore coverage.
//!
//! For performed chores the score is `rank + 0.5 * count / (count + 4)`:
//! strictly monotonic in rank, bounded by `max_rank + 0.5`, with a fatigue
//! term that saturates so long-tenured residents are not penalized forever.
//! The optimizers only rely on the ordering being internally consistent.

use std::collections::BTreeMap;

use crate::ledger::CompletionCounts;
use crate::roster::{Assignment, ChoreId, PersonId, PreferenceSet, Roster};

/// Weight of the fatigue term relative to one rank step
const FATIGUE_WEIGHT: f64 = 0.5;

/// Completion count at which fatigue reaches half its maximum
const FATIGUE_SATURATION: f64 = 4.0;

/// Precomputed misery scores for every (active person, chore) pair
///
/// Built once per run from the immutable snapshot; pure thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct MiseryTable {
    scores: BTreeMap<(PersonId, ChoreId), f64>,
}

impl MiseryTable {
    /// Score every (active person, chore) pair from preferences and history
    #[must_use]
    pub fn build(roster: &Roster, preferences: &PreferenceSet, history: &CompletionCounts) -> Self {
        let mut scores = BTreeMap::new();
        for person in roster.active_people() {
            for chore in roster.chores() {
                let count = history.get(&(person.id, chore.id)).copied().unwrap_or(0);
                let rank = preferences.rank(person.id, chore.id);
                scores.insert((person.id, chore.id), score_for(rank, count));
            }
        }
        Self { scores }
    }

    /// Build a table from explicit scores, bypassing the formula
    #[cfg(test)]
    pub(crate) const fn from_scores(scores: BTreeMap<(PersonId, ChoreId), f64>) -> Self {
        Self { scores }
    }

    /// Misery of a chore for a person; zero for pairs outside the table
    #[must_use]
    pub fn score(&self, person: PersonId, chore: ChoreId) -> f64 {
        self.scores.get(&(person, chore)).copied().unwrap_or(0.0)
    }

    /// Misery of the chore a person holds in an assignment; zero when idle
    #[must_use]
    pub fn person_score(&self, person: PersonId, assignment: &Assignment) -> f64 {
        assignment
            .chore_of(person)
            .map_or(0.0, |chore| self.score(person, chore))
    }

    /// Total misery across all holders of an assignment
    #[must_use]
    pub fn total(&self, assignment: &Assignment) -> f64 {
        assignment.iter().map(|(c, p)| self.score(p, c)).sum()
    }
}

/// The scoring formula: zero for never-performed, otherwise rank plus a
/// bounded fatigue term growing with completion count.
fn score_for(rank: u32, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let count = f64::from(count);
    f64::from(rank) + FATIGUE_WEIGHT * count / (count + FATIGUE_SATURATION)
}
