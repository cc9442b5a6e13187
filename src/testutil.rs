//! Shared test utilities
//!
//! Common fixtures used across test modules. Only compiled in test builds.

use std::collections::BTreeMap;

use crate::engine::misery::MiseryTable;
use crate::ledger::CompletionCounts;
use crate::roster::{Chore, ChoreCategory, ChoreId, Person, PersonId, PreferenceSet, Roster};

/// Three active people and three one-week chores, with the canonical
/// three-way preference table.
#[must_use]
pub fn simple_roster() -> (Roster, PreferenceSet) {
    let roster = Roster::new(
        vec![person(1, "AB"), person(2, "CD"), person(3, "EF")],
        vec![
            chore(1, "Dishes", ChoreCategory::OneWeek),
            chore(2, "Lawn", ChoreCategory::OneWeek),
            chore(3, "Bathroom", ChoreCategory::OneWeek),
        ],
    );
    (roster, three_way_preferences())
}

/// Three active people; chore 1 is one-week, chores 2 and 3 full-cycle.
#[must_use]
pub fn mixed_roster() -> (Roster, PreferenceSet) {
    let roster = Roster::new(
        vec![person(1, "AB"), person(2, "CD"), person(3, "EF")],
        vec![
            chore(1, "Dishes", ChoreCategory::OneWeek),
            chore(2, "Lawn", ChoreCategory::FullCycle),
            chore(3, "Bathroom", ChoreCategory::FullCycle),
        ],
    );
    (roster, three_way_preferences())
}

/// The preference table behind the canonical scenario: with the seed
/// assignment everyone holds their worst chore and covets the next one.
#[must_use]
pub fn three_way_preferences() -> PreferenceSet {
    let mut ranks: BTreeMap<PersonId, BTreeMap<ChoreId, u32>> = BTreeMap::new();
    ranks.insert(PersonId(1), rank_map(&[(1, 5), (2, 1), (3, 3)]));
    ranks.insert(PersonId(2), rank_map(&[(1, 2), (2, 5), (3, 1)]));
    ranks.insert(PersonId(3), rank_map(&[(1, 1), (2, 3), (3, 5)]));
    PreferenceSet::new(ranks, 6)
}

/// Completion counts from explicit (person, chore, count) triples
#[must_use]
pub fn counts_from(triples: &[(u32, u32, u32)]) -> CompletionCounts {
    triples
        .iter()
        .map(|&(p, c, n)| ((PersonId(p), ChoreId(c)), n))
        .collect()
}

/// The same completion count for every (active person, chore) pair
#[must_use]
pub fn uniform_counts(roster: &Roster, count: u32) -> CompletionCounts {
    let mut counts = CompletionCounts::new();
    for p in roster.active_people() {
        for c in roster.chores() {
            counts.insert((p.id, c.id), count);
        }
    }
    counts
}

/// A misery table with explicit scores, bypassing the formula
#[must_use]
pub fn misery_from(rows: &[(u32, &[(u32, f64)])]) -> MiseryTable {
    let mut scores = BTreeMap::new();
    for &(p, chores) in rows {
        for &(c, s) in chores {
            scores.insert((PersonId(p), ChoreId(c)), s);
        }
    }
    MiseryTable::from_scores(scores)
}

fn person(id: u32, name: &str) -> Person {
    Person {
        id: PersonId(id),
        name: name.to_string(),
        active: true,
    }
}

fn chore(id: u32, name: &str, category: ChoreCategory) -> Chore {
    Chore {
        id: ChoreId(id),
        name: name.to_string(),
        category,
    }
}

fn rank_map(pairs: &[(u32, u32)]) -> BTreeMap<ChoreId, u32> {
    pairs.iter().map(|&(c, r)| (ChoreId(c), r)).collect()
}
