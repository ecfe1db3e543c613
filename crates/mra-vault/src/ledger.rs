//! Durable history ledger: which report identities have been emitted.
//!
//! The ledger is a dedup hint, never the source of truth — the scanner
//! and the filesystem decide what the aggregation views reflect. It is
//! a single JSON file, rewritten whole after every mutation, scoped per
//! archive root so separate archives (test fixtures included) never
//! cross-contaminate. Single coordinating process assumed; callers that
//! run topic tasks in parallel must serialize access externally.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use mra_core::identity::sha256_hex;
use mra_core::{HistoryRecord, MraError, ReportStatus, Result};

/// Current on-disk ledger format version.
pub const LEDGER_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    version: u32,
    updated_at: DateTime<Utc>,
    items: Vec<HistoryRecord>,
}

/// The emitted-report ledger for one archive root.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    items: BTreeMap<String, HistoryRecord>,
}

impl Ledger {
    /// Scope key isolating ledgers per archive root: the first 8 hex
    /// chars of the root path's Sha256.
    #[must_use]
    pub fn scope_key(archive_root: &Path) -> String {
        sha256_hex(&archive_root.to_string_lossy())[..8].to_string()
    }

    /// Open the ledger for an archive root, loading existing state.
    ///
    /// An absent or unreadable ledger file is non-fatal: it loads as an
    /// empty state (logged, never surfaced as an error). Duplicate IDs in
    /// the file resolve last-write-wins.
    #[must_use]
    pub fn open(state_dir: &Path, archive_root: &Path) -> Self {
        let path = state_dir.join(format!("history.{}.json", Self::scope_key(archive_root)));
        let items = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<LedgerFile>(&raw) {
                Ok(file) => file
                    .items
                    .into_iter()
                    .map(|rec| (rec.id.clone(), rec))
                    .collect(),
                Err(err) => {
                    warn!(path = %path.display(), error = %err,
                          "corrupt ledger file, starting from empty state");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, items }
    }

    /// Insert or replace the record with the same ID (last write wins),
    /// then rewrite the whole ledger file.
    ///
    /// # Errors
    ///
    /// Returns [`MraError::Ledger`] if the state cannot be persisted.
    pub fn upsert(&mut self, record: HistoryRecord) -> Result<()> {
        self.items.insert(record.id.clone(), record);
        self.persist()
    }

    /// Membership test used for skip-on-duplicate decisions.
    #[must_use]
    pub fn has(&self, id: &str, status: ReportStatus) -> bool {
        self.items.get(id).is_some_and(|rec| rec.status == status)
    }

    /// The current record for an ID, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HistoryRecord> {
        self.items.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = LedgerFile {
            version: LEDGER_VERSION,
            updated_at: Utc::now(),
            items: self.items.values().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| MraError::Ledger(e.to_string()))?;
        // Write-then-rename so a crash mid-write can never leave a
        // truncated ledger behind.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
