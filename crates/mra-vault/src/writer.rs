//! Change-aware report persistence and the archive path policy.
//!
//! A report's path is a pure function of its metadata, so re-deriving
//! metadata always finds the same file. Writes are byte-compared first:
//! re-running an unchanged batch performs zero filesystem writes here.

use std::fs;
use std::path::{Path, PathBuf};

use mra_core::naming::{safe_file_name, slugify};
use mra_core::{ReportMetadata, Result};

/// Directory under the archive root that holds all report files.
pub const REPORTS_DIR: &str = "reports";

/// The deterministic location of a report inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPath {
    pub abs: PathBuf,
    /// Relative to the archive root, forward slashes.
    pub rel: String,
}

/// Result of a change-aware write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path_abs: PathBuf,
    pub path_rel: String,
    pub changed: bool,
}

/// Compute the archive path for a report.
///
/// Grammar: `reports/{category_slug}/{safe_title}-{date}--{edition}.md`.
/// The category directory is re-sanitized through [`slugify`] so a
/// malformed slug can never escape the reports tree.
#[must_use]
pub fn report_path(root: &Path, meta: &ReportMetadata) -> ReportPath {
    let file_name = format!(
        "{}-{}--{}.md",
        safe_file_name(&meta.title),
        meta.date,
        meta.edition
    );
    let rel = format!("{REPORTS_DIR}/{}/{file_name}", slugify(&meta.category_slug));
    ReportPath {
        abs: root.join(&rel),
        rel,
    }
}

/// Write a report document only if its bytes differ from what is on disk.
///
/// Missing file counts as changed; an identical file is left untouched
/// and reported `changed: false`.
///
/// # Errors
///
/// Returns an IO error if the category directory cannot be created or
/// the file cannot be written.
pub fn write_if_changed(root: &Path, meta: &ReportMetadata, document: &str) -> Result<WriteOutcome> {
    let path = report_path(root, meta);
    if let Some(parent) = path.abs.parent() {
        fs::create_dir_all(parent)?;
    }

    let changed = match fs::read(&path.abs) {
        Ok(existing) => existing != document.as_bytes(),
        Err(_) => true,
    };
    if changed {
        fs::write(&path.abs, document)?;
    }

    Ok(WriteOutcome {
        path_abs: path.abs,
        path_rel: path.rel,
        changed,
    })
}
