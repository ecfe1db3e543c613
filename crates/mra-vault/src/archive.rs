//! The `Archive` handle: one root directory, all vault operations.

use std::fs;
use std::path::{Path, PathBuf};

use mra_core::{ArchiveIndexEntry, ReportMetadata, Result};

use crate::digest;
use crate::navigation;
use crate::scanner;
use crate::writer::{self, WriteOutcome, REPORTS_DIR};

/// A handle on one archive root. Cheap to clone; holds no open state —
/// the filesystem is the state.
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
}

impl Archive {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the fixed directory layout. The only run-fatal filesystem
    /// condition: if the root is unavailable, nothing else can proceed.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the directories cannot be created.
    pub fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(self.root.join(REPORTS_DIR).join("uncategorized"))?;
        Ok(())
    }

    /// Change-aware report write; see [`writer::write_if_changed`].
    ///
    /// # Errors
    ///
    /// Propagates write failures for this report only.
    pub fn write_if_changed(&self, meta: &ReportMetadata, document: &str) -> Result<WriteOutcome> {
        writer::write_if_changed(&self.root, meta, document)
    }

    /// Rebuild the ephemeral archive index by scanning disk.
    #[must_use]
    pub fn scan(&self) -> Vec<ArchiveIndexEntry> {
        scanner::scan(&self.root)
    }

    /// Regenerate NAVIGATION.md from a fresh scan.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be written.
    pub fn update_navigation(&self) -> Result<PathBuf> {
        navigation::update_navigation(&self.root)
    }

    /// Regenerate the README today section for a target date.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be written.
    pub fn update_digest(&self, date: &str, max: usize) -> Result<PathBuf> {
        digest::update_digest(&self.root, date, max)
    }
}
