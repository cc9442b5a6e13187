//! History ledger
//!
//! The engine's only collaborator with storage: a read at run start for
//! completion counts and the last recorded cycle state, and a write after
//! optimization for the finalized assignment with its misery values. The
//! core treats both as synchronous, already-consistent calls and performs
//! no other I/O; the write is the commit point of a run.

pub mod jsonl;

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roster::{ChoreId, CycleState, PersonId};

pub use jsonl::JsonlLedger;

/// Historical completion counts per (person, chore)
pub type CompletionCounts = BTreeMap<(PersonId, ChoreId), u32>;

/// One persisted week: the full cycle state plus the misery each holder
/// carried into the week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekRecord {
    /// When the record was written
    pub recorded_at: DateTime<Utc>,
    /// The cycle state after this week's run
    pub state: CycleState,
    /// Final misery per person id for the week's assignment
    pub misery: BTreeMap<PersonId, f64>,
}

/// Everything the engine needs from history at run start
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot {
    /// Completion counts accumulated over all recorded weeks
    pub counts: CompletionCounts,
    /// The most recent cycle state, if any week was ever recorded
    pub last_state: Option<CycleState>,
}

/// The storage seam the engine depends on
pub trait HistoryLedger {
    /// Read the accumulated history as of run start
    fn load(&self) -> Result<LedgerSnapshot>;

    /// Persist a finalized week. Called at most once per run, and never
    /// on dry runs.
    fn record(&self, record: &WeekRecord) -> Result<()>;
}

/// Fold a sequence of week records into a snapshot.
///
/// Every recorded week counts one completion for each (person, chore) pair
/// in its assignment; the last record supplies the cycle state.
#[must_use]
pub fn snapshot_from_records(records: &[WeekRecord]) -> LedgerSnapshot {
    let mut counts = CompletionCounts::new();
    for record in records {
        for (chore, person) in record.state.current.iter() {
            *counts.entry((person, chore)).or_insert(0) += 1;
        }
    }

    LedgerSnapshot {
        counts,
        last_state: records.last().map(|r| r.state.clone()),
    }
}
