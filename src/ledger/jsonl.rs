//! JSONL (JSON Lines) history ledger
//!
//! Append-only persistence of week records to `.rota/history.jsonl`.
//! Each line is a JSON object representing one recorded week.

use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::ledger::{snapshot_from_records, HistoryLedger, LedgerSnapshot, WeekRecord};

/// File-backed history ledger
///
/// Append-only: a run that aborts before `record` leaves the file untouched,
/// which is what makes the ledger write the commit point.
pub struct JsonlLedger {
    history_path: PathBuf,
}

impl JsonlLedger {
    /// Create a ledger rooted at the given directory (typically `.rota`).
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(ledger_dir: P) -> Result<Self> {
        let ledger_dir = ledger_dir.as_ref();

        fs::create_dir_all(ledger_dir).with_context(|| {
            format!("Failed to create ledger directory: {}", ledger_dir.display())
        })?;

        Ok(Self {
            history_path: ledger_dir.join("history.jsonl"),
        })
    }

    /// Read all week records in chronological order.
    ///
    /// A missing file is an empty history, not an error.
    pub fn read_all(&self) -> Result<Vec<WeekRecord>> {
        if !self.history_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.history_path).with_context(|| {
            format!("Failed to read history file: {}", self.history_path.display())
        })?;

        let mut records = Vec::new();
        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: WeekRecord = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))?;
            records.push(record);
        }

        Ok(records)
    }

    /// Path of the underlying history file
    #[must_use]
    pub fn history_path(&self) -> &Path {
        &self.history_path
    }
}

impl HistoryLedger for JsonlLedger {
    fn load(&self) -> Result<LedgerSnapshot> {
        let records = self.read_all()?;
        Ok(snapshot_from_records(&records))
    }

    fn record(&self, record: &WeekRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.history_path)
            .with_context(|| {
                format!("Failed to open history file: {}", self.history_path.display())
            })?;

        let json =
            serde_json::to_string(record).context("Failed to serialize week record to JSON")?;

        writeln!(file, "{json}").context("Failed to write to history file")?;

        Ok(())
    }
}
