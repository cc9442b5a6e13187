//! Roster configuration parser
//!
//! Parses `roster.toml` into people, chores, and preference rankings, and
//! normalizes everything into the strongly-typed model before the engine
//! ever sees it.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::roster::types::{
    Chore, ChoreCategory, ChoreId, Person, PersonId, PreferenceSet, Roster,
};

/// A person entry in `roster.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonConfig {
    /// Stable identifier, unique within the file
    pub id: u32,
    /// Display name, unique within the file
    pub name: String,
    /// Whether this person participates in runs (default: true)
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// A chore entry in `roster.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoreConfig {
    /// Stable identifier, unique within the file
    pub id: u32,
    /// Display name, unique within the file
    pub name: String,
    /// Rotation category: `"full-cycle"` or `"one-week"`
    pub category: ChoreCategory,
}

/// Top-level roster configuration parsed from roster.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterConfig {
    /// People entries
    #[serde(rename = "person")]
    pub people: Vec<PersonConfig>,
    /// Chore entries
    #[serde(rename = "chore")]
    pub chores: Vec<ChoreConfig>,
    /// Per-person rank maps keyed by person name, then chore name.
    /// Rank 1 is most preferred. Missing people or chores are allowed.
    #[serde(default)]
    pub preferences: BTreeMap<String, BTreeMap<String, u32>>,
}

impl RosterConfig {
    /// Parse a roster.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse roster.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse roster.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Build the typed roster from this configuration
    #[must_use]
    pub fn roster(&self) -> Roster {
        let people = self
            .people
            .iter()
            .map(|p| Person {
                id: PersonId(p.id),
                name: p.name.clone(),
                active: p.active,
            })
            .collect();
        let chores = self
            .chores
            .iter()
            .map(|c| Chore {
                id: ChoreId(c.id),
                name: c.name.clone(),
                category: c.category,
            })
            .collect();
        Roster::new(people, chores)
    }

    /// Build the typed preference set from this configuration.
    ///
    /// The neutral rank for unrated chores is one past the chore count, so
    /// unrated always sorts behind every explicit ranking.
    #[must_use]
    pub fn preferences(&self) -> PreferenceSet {
        let neutral = u32::try_from(self.chores.len()).unwrap_or(u32::MAX).saturating_add(1);
        let mut ranks: BTreeMap<PersonId, BTreeMap<ChoreId, u32>> = BTreeMap::new();

        for (person_name, chore_ranks) in &self.preferences {
            // validate() guarantees these lookups succeed
            let Some(person) = self.people.iter().find(|p| &p.name == person_name) else {
                continue;
            };
            let entry = ranks.entry(PersonId(person.id)).or_default();
            for (chore_name, &rank) in chore_ranks {
                if let Some(chore) = self.chores.iter().find(|c| &c.name == chore_name) {
                    entry.insert(ChoreId(chore.id), rank);
                }
            }
        }

        PreferenceSet::new(ranks, neutral)
    }

    /// Names of active people who supplied no preference block.
    ///
    /// Missing preferences are non-fatal; callers use this to log a note.
    #[must_use]
    pub fn people_without_preferences(&self) -> Vec<&str> {
        self.people
            .iter()
            .filter(|p| p.active && !self.preferences.contains_key(&p.name))
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.people.is_empty() {
            bail!("Roster must define at least one person");
        }
        if self.chores.is_empty() {
            bail!("Roster must define at least one chore");
        }

        // Check for duplicate person ids and names
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for person in &self.people {
            if person.name.trim().is_empty() {
                bail!("Person name cannot be empty");
            }
            if !ids.insert(person.id) {
                bail!("Duplicate person id: {}", person.id);
            }
            if !names.insert(&person.name) {
                bail!("Duplicate person name: '{}'", person.name);
            }
        }

        // Check for duplicate chore ids and names
        let mut chore_ids = HashSet::new();
        let mut chore_names = HashSet::new();
        for chore in &self.chores {
            if chore.name.trim().is_empty() {
                bail!("Chore name cannot be empty");
            }
            if !chore_ids.insert(chore.id) {
                bail!("Duplicate chore id: {}", chore.id);
            }
            if !chore_names.insert(&chore.name) {
                bail!("Duplicate chore name: '{}'", chore.name);
            }
        }

        // Preference blocks must reference known people and chores
        for (person_name, chore_ranks) in &self.preferences {
            if !names.contains(person_name) {
                bail!("Preferences reference unknown person '{person_name}'");
            }
            for (chore_name, &rank) in chore_ranks {
                if !chore_names.contains(chore_name) {
                    bail!(
                        "Preferences for '{person_name}' reference unknown chore '{chore_name}'"
                    );
                }
                if rank == 0 {
                    bail!(
                        "Preferences for '{person_name}': rank for '{chore_name}' must be >= 1"
                    );
                }
            }
        }

        Ok(())
    }
}
