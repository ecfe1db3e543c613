//! Today digest: the README.md date marker and date-filtered report list.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use mra_core::naming::safe_file_name;
use mra_core::{ArchiveIndexEntry, Result};

use crate::navigation::NO_DATA_LINE;
use crate::patcher::{replace_region, replace_value};
use crate::scanner;

/// Well-known digest file at the archive root.
pub const DIGEST_FILE: &str = "README.md";
pub const DATE_START: &str = "<!-- DATE -->";
pub const DATE_END: &str = "<!-- /DATE -->";
/// Full start marker written into fresh documents.
pub const TODAY_START: &str = "<!-- TODAY_REPORTS:START max=20 -->";
/// Prefix used to locate the start marker regardless of attributes.
pub const TODAY_START_PREFIX: &str = "<!-- TODAY_REPORTS:START";
pub const TODAY_END: &str = "<!-- TODAY_REPORTS:END -->";

/// Default cap on the digest list.
pub const DEFAULT_MAX: usize = 20;

fn scaffold() -> String {
    format!(
        "# Today's Reports\n\
         \n\
         This page shows only the latest day's reports; the full archive\n\
         navigation lives in NAVIGATION.md. The section between the\n\
         markers is regenerated on every run.\n\
         \n\
         Date: {DATE_START}1970-01-01{DATE_END}\n\
         \n\
         ## Today\n\
         \n\
         {TODAY_START}\n\
         {NO_DATA_LINE}\n\
         {TODAY_END}\n"
    )
}

/// Render the date-filtered, capped digest list. Zero matches render the
/// explicit no-data placeholder rather than an empty list.
#[must_use]
pub fn render_today_list(entries: &[ArchiveIndexEntry], date: &str, max: usize) -> String {
    let mut todays: Vec<&ArchiveIndexEntry> =
        entries.iter().filter(|e| e.date == date).collect();
    todays.sort_by(|a, b| b.path_rel.cmp(&a.path_rel));
    todays.truncate(max);

    if todays.is_empty() {
        return NO_DATA_LINE.to_string();
    }
    todays
        .iter()
        .map(|e| {
            format!(
                "- [{}]({}) ({})",
                safe_file_name(&e.title),
                e.path_rel,
                e.edition
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Regenerate the digest file for a target date from a fresh scan.
///
/// The date marker is rewritten unconditionally to `date`, whether or not
/// any reports exist for it. A missing file, or one without the expected
/// markers, is rebuilt from the scaffold (same trade-off as
/// [`crate::patcher::patch_region`]).
///
/// # Errors
///
/// Returns an IO error if the digest file cannot be written.
pub fn update_digest(root: &Path, date: &str, max: usize) -> Result<PathBuf> {
    let entries = scanner::scan(root);
    let list = render_today_list(&entries, date, max);

    let digest_path = root.join(DIGEST_FILE);
    let existing = fs::read_to_string(&digest_path).ok();
    let base = match existing {
        Some(text)
            if text.contains(DATE_START)
                && text.contains(TODAY_START_PREFIX)
                && text.contains(TODAY_END) =>
        {
            text
        }
        _ => scaffold(),
    };

    let dated = replace_value(&base, DATE_START, DATE_END, date).unwrap_or(base);
    let patched = replace_region(&dated, TODAY_START_PREFIX, TODAY_END, &list).unwrap_or(dated);
    fs::write(&digest_path, patched)?;
    info!(path = %digest_path.display(), date, "digest updated");
    Ok(digest_path)
}
