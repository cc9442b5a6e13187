//! Core data model for the rotation engine
//!
//! Strongly-typed people, chores, preferences, and assignments. Everything
//! downstream of the configuration boundary works exclusively with these
//! types; all deterministic orderings are ascending by stable id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stable identifier for a person
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub u32);

/// Stable identifier for a chore
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChoreId(pub u32);

/// When a chore rotates to a new owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChoreCategory {
    /// Owned for a whole four-week cycle; rotates only at cycle boundaries
    FullCycle,
    /// Rotates to a new owner every week within the cycle
    OneWeek,
}

/// A household member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Stable identifier, unique within the roster
    pub id: PersonId,
    /// Display name (initials in the original spreadsheet tradition)
    pub name: String,
    /// Whether this person participates in the current run
    pub active: bool,
}

/// A recurring chore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    /// Stable identifier, unique within the roster
    pub id: ChoreId,
    /// Display name
    pub name: String,
    /// Rotation category
    pub category: ChoreCategory,
}

/// The roster for a run: people and chores, held in ascending-id order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    people: Vec<Person>,
    chores: Vec<Chore>,
}

impl Roster {
    /// Build a roster, sorting both lists by id.
    ///
    /// Uniqueness of ids is the configuration boundary's responsibility.
    #[must_use]
    pub fn new(mut people: Vec<Person>, mut chores: Vec<Chore>) -> Self {
        people.sort_by_key(|p| p.id);
        chores.sort_by_key(|c| c.id);
        Self { people, chores }
    }

    /// All people, active or not, ascending by id
    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// All chores, ascending by id
    #[must_use]
    pub fn chores(&self) -> &[Chore] {
        &self.chores
    }

    /// Active people, ascending by id
    pub fn active_people(&self) -> impl Iterator<Item = &Person> {
        self.people.iter().filter(|p| p.active)
    }

    /// Ids of active people, ascending
    #[must_use]
    pub fn active_person_ids(&self) -> Vec<PersonId> {
        self.active_people().map(|p| p.id).collect()
    }

    /// Look up a person by id
    #[must_use]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Look up a chore by id
    #[must_use]
    pub fn chore(&self, id: ChoreId) -> Option<&Chore> {
        self.chores.iter().find(|c| c.id == id)
    }

    /// The active person `steps` positions after `from` in the ascending-id
    /// ring, skipping inactive people. Returns `from` itself when no other
    /// active person exists or `steps` wraps back around.
    #[must_use]
    pub fn ring_step(&self, from: PersonId, steps: usize) -> PersonId {
        let ring = self.active_person_ids();
        if ring.is_empty() {
            return from;
        }
        let start = ring.iter().position(|&id| id == from).unwrap_or(0);
        ring[(start + steps) % ring.len()]
    }

    /// Display name for a person id, falling back to the raw id
    #[must_use]
    pub fn person_name(&self, id: PersonId) -> String {
        self.person(id)
            .map_or_else(|| format!("#{}", id.0), |p| p.name.clone())
    }

    /// Display name for a chore id, falling back to the raw id
    #[must_use]
    pub fn chore_name(&self, id: ChoreId) -> String {
        self.chore(id)
            .map_or_else(|| format!("#{}", id.0), |c| c.name.clone())
    }
}

/// Per-person ordinal chore rankings (1 = most preferred)
///
/// Chores a person never rated resolve to the neutral rank, which is the
/// lowest priority. Missing people likewise resolve to neutral across the
/// board; absence is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSet {
    ranks: BTreeMap<PersonId, BTreeMap<ChoreId, u32>>,
    neutral: u32,
}

impl PreferenceSet {
    /// Build a preference set with the given neutral (maximal) rank
    #[must_use]
    pub const fn new(ranks: BTreeMap<PersonId, BTreeMap<ChoreId, u32>>, neutral: u32) -> Self {
        Self { ranks, neutral }
    }

    /// The rank this person gave this chore, or the neutral rank
    #[must_use]
    pub fn rank(&self, person: PersonId, chore: ChoreId) -> u32 {
        self.ranks
            .get(&person)
            .and_then(|r| r.get(&chore))
            .copied()
            .unwrap_or(self.neutral)
    }

    /// Whether this person supplied any rankings at all
    #[must_use]
    pub fn has_rankings(&self, person: PersonId) -> bool {
        self.ranks.contains_key(&person)
    }
}

/// One week's chore ownership: chore → person
///
/// Immutable snapshot semantics: rotation produces a fresh value, an
/// optimizer pass commits trades onto a working copy, and the frozen result
/// is what the ledger persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(BTreeMap<ChoreId, PersonId>);

impl Assignment {
    /// An empty assignment
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Assign a chore to a person, replacing any previous holder
    pub fn assign(&mut self, chore: ChoreId, person: PersonId) {
        self.0.insert(chore, person);
    }

    /// The person currently holding a chore
    #[must_use]
    pub fn holder(&self, chore: ChoreId) -> Option<PersonId> {
        self.0.get(&chore).copied()
    }

    /// The chore a person currently holds, if any
    #[must_use]
    pub fn chore_of(&self, person: PersonId) -> Option<ChoreId> {
        self.0
            .iter()
            .find(|(_, &p)| p == person)
            .map(|(&c, _)| c)
    }

    /// Iterate (chore, person) pairs in ascending chore-id order
    pub fn iter(&self) -> impl Iterator<Item = (ChoreId, PersonId)> + '_ {
        self.0.iter().map(|(&c, &p)| (c, p))
    }

    /// Number of assigned chores
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no chores are assigned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Swap the holders of two chores
    pub fn swap_holders(&mut self, a: ChoreId, b: ChoreId) {
        if let (Some(pa), Some(pb)) = (self.holder(a), self.holder(b)) {
            self.0.insert(a, pb);
            self.0.insert(b, pa);
        }
    }
}

impl FromIterator<(ChoreId, PersonId)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (ChoreId, PersonId)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Position within the four-week cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Week {
    /// Cycle start; full rotation and full optimization happen here
    W1,
    /// Second week
    W2,
    /// Third week
    W3,
    /// Final week; the next transition starts a new cycle
    W4,
}

impl Week {
    /// The following week; `W4` wraps to `W1`
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::W1 => Self::W2,
            Self::W2 => Self::W3,
            Self::W3 => Self::W4,
            Self::W4 => Self::W1,
        }
    }

    /// 1-based index within the cycle
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::W1 => 1,
            Self::W2 => 2,
            Self::W3 => 3,
            Self::W4 => 4,
        }
    }

    /// Parse a 1-based week index
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::W1),
            2 => Some(Self::W2),
            3 => Some(Self::W3),
            4 => Some(Self::W4),
            _ => None,
        }
    }

    /// Whether this is the first week of a cycle
    #[must_use]
    pub const fn is_cycle_start(self) -> bool {
        matches!(self, Self::W1)
    }
}

/// The rotation state carried between runs
///
/// Passed into each run and returned from it; persisted only through the
/// history ledger, never held as global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleState {
    /// How many full cycles have started, counting from 1
    pub cycle_number: u32,
    /// Current position within the cycle
    pub week: Week,
    /// The assignment recorded at week 1 of this cycle
    pub cycle_start: Assignment,
    /// The assignment for the current week
    pub current: Assignment,
}
