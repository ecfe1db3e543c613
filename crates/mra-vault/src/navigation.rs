//! Full category navigation: pure renderer plus the NAVIGATION.md updater.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use mra_core::category::display_name;
use mra_core::naming::safe_file_name;
use mra_core::{ArchiveIndexEntry, Result};

use crate::patcher::{patch_region, replace_value};
use crate::scanner;

/// Well-known navigation file at the archive root.
pub const NAV_FILE: &str = "NAVIGATION.md";
/// Full start marker written into fresh documents.
pub const NAV_START: &str = "<!-- NAV:START version=1 maxPerCategory=20 collapsible=true -->";
/// Prefix used to locate the start marker regardless of attributes.
pub const NAV_START_PREFIX: &str = "<!-- NAV:START";
pub const NAV_END: &str = "<!-- NAV:END -->";
/// Single-value marker pair for the last-updated stamp.
pub const UPDATED_AT_START: &str = "<!-- UPDATED_AT -->";
pub const UPDATED_AT_END: &str = "<!-- /UPDATED_AT -->";

/// Per-category entry cap in the rendered index.
pub const MAX_PER_CATEGORY: usize = 20;
/// Placeholder emitted instead of an empty list.
pub const NO_DATA_LINE: &str = "- No data yet";

/// Render the category-grouped navigation section.
///
/// Pure: groups by category slug (lexicographic order), sorts each group
/// by date descending (stable, so scan-order ties persist), caps each
/// group at [`MAX_PER_CATEGORY`].
#[must_use]
pub fn render_navigation(entries: &[ArchiveIndexEntry]) -> String {
    let mut by_category: BTreeMap<&str, Vec<&ArchiveIndexEntry>> = BTreeMap::new();
    for entry in entries {
        by_category
            .entry(entry.category_slug.as_str())
            .or_default()
            .push(entry);
    }

    let mut lines: Vec<String> = Vec::new();
    for (slug, group) in &mut by_category {
        lines.push(format!("## {} ({slug})", display_name(slug)));
        lines.push(String::new());
        lines.push("<details><summary>Show reports</summary>".to_string());
        lines.push(String::new());

        group.sort_by(|a, b| b.date.cmp(&a.date));
        for entry in group.iter().take(MAX_PER_CATEGORY) {
            lines.push(entry_line(entry));
        }
        if group.is_empty() {
            lines.push(NO_DATA_LINE.to_string());
        }

        lines.push(String::new());
        lines.push("</details>".to_string());
        lines.push(String::new());
    }
    lines.join("\n")
}

fn entry_line(entry: &ArchiveIndexEntry) -> String {
    let title = if entry.title.is_empty() {
        file_stem(&entry.path_rel)
    } else {
        entry.title.clone()
    };
    let source = entry
        .source
        .as_ref()
        .map(|url| format!(" [source]({url})"))
        .unwrap_or_default();
    format!(
        "- [{} - {}]({}) ({}){}",
        safe_file_name(&title),
        entry.date,
        entry.path_rel,
        entry.edition,
        source
    )
}

fn file_stem(path_rel: &str) -> String {
    Path::new(path_rel)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path_rel)
        .to_string()
}

/// Regenerate NAVIGATION.md from a fresh scan of the archive.
///
/// Only the NAV marker block is replaced; content outside the pair
/// survives verbatim, and the `UPDATED_AT` stamp is refreshed in place
/// when present. A document without markers is replaced wholesale by
/// the scaffold (see [`patch_region`]).
///
/// # Errors
///
/// Returns an IO error if the navigation file cannot be written.
pub fn update_navigation(root: &Path) -> Result<PathBuf> {
    let entries = scanner::scan(root);
    let stamp = Utc::now().to_rfc3339();
    let block = format!(
        "{NAV_START}\n\
         \n\
         {}\n\
         {NAV_END}",
        render_navigation(&entries),
    );
    let scaffold = format!(
        "# Report Archive Navigation\n\
         \n\
         Generated automatically on every run; edits between the NAV\n\
         markers will be overwritten.\n\
         \n\
         Updated: {UPDATED_AT_START}{stamp}{UPDATED_AT_END}\n\
         \n\
         {block}\n"
    );

    let nav_path = root.join(NAV_FILE);
    let existing = fs::read_to_string(&nav_path).ok();
    let patched = patch_region(existing.as_deref(), NAV_START_PREFIX, NAV_END, &block, &scaffold);
    let patched =
        replace_value(&patched, UPDATED_AT_START, UPDATED_AT_END, &stamp).unwrap_or(patched);
    fs::write(&nav_path, patched)?;
    info!(path = %nav_path.display(), entries = entries.len(), "navigation updated");
    Ok(nav_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, date: &str, slug: &str) -> ArchiveIndexEntry {
        ArchiveIndexEntry {
            title: title.to_string(),
            date: date.to_string(),
            edition: "v1".to_string(),
            category_slug: slug.to_string(),
            path_rel: format!("reports/{slug}/{title}-{date}--v1.md"),
            source: None,
        }
    }

    #[test]
    fn groups_categories_in_slug_order() {
        let entries = vec![
            entry("Zeta", "2025-01-01", "software-dev"),
            entry("Alpha", "2025-01-01", "llm"),
        ];
        let out = render_navigation(&entries);
        let llm = out.find("## Large Language Models (llm)").unwrap();
        let dev = out.find("## Software Engineering (software-dev)").unwrap();
        assert!(llm < dev);
        assert!(out.contains("<details><summary>Show reports</summary>"));
    }

    #[test]
    fn caps_each_category_at_twenty_most_recent() {
        let entries: Vec<_> = (1..=30)
            .map(|day| entry(&format!("Topic {day:02}"), &format!("2025-01-{day:02}"), "llm"))
            .collect();
        let out = render_navigation(&entries);

        let count = out.matches("- [Topic").count();
        assert_eq!(count, MAX_PER_CATEGORY);
        // Most recent kept, oldest dropped.
        assert!(out.contains("2025-01-30"));
        assert!(!out.contains("2025-01-10"));
    }

    #[test]
    fn unknown_category_header_uses_raw_slug() {
        let out = render_navigation(&[entry("A", "2025-01-01", "mystery")]);
        assert!(out.contains("## mystery (mystery)"));
    }

    #[test]
    fn entry_line_includes_source_link_when_present() {
        let mut e = entry("A", "2025-01-01", "llm");
        e.source = Some("https://example.com".to_string());
        assert!(entry_line(&e).ends_with("[source](https://example.com)"));
    }

    #[test]
    fn empty_title_falls_back_to_file_stem() {
        let mut e = entry("A", "2025-01-01", "llm");
        e.title = String::new();
        e.path_rel = "reports/llm/Recovered-2025-01-01--v1.md".to_string();
        assert!(entry_line(&e).contains("Recovered-2025-01-01--v1"));
    }

    #[test]
    fn update_navigation_scaffolds_empty_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = update_navigation(dir.path()).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains(NAV_START));
        assert!(text.contains(NAV_END));
    }

    #[test]
    fn repeated_updates_never_duplicate_the_header() {
        let dir = tempfile::tempdir().unwrap();
        update_navigation(dir.path()).unwrap();
        update_navigation(dir.path()).unwrap();
        let text = fs::read_to_string(dir.path().join(NAV_FILE)).unwrap();

        assert_eq!(text.matches("# Report Archive Navigation").count(), 1);
        assert_eq!(text.matches(UPDATED_AT_START).count(), 1);
        assert_eq!(text.matches(NAV_START_PREFIX).count(), 1);
        assert_eq!(text.matches(NAV_END).count(), 1);
    }

    #[test]
    fn update_refreshes_the_updated_at_stamp_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let nav = dir.path().join(NAV_FILE);
        fs::write(
            &nav,
            format!(
                "# Hand Title\n\nUpdated: {UPDATED_AT_START}1970-01-01T00:00:00+00:00{UPDATED_AT_END}\n\n\
                 {NAV_START}\nstale\n{NAV_END}\n"
            ),
        )
        .unwrap();

        update_navigation(dir.path()).unwrap();
        let text = fs::read_to_string(&nav).unwrap();
        assert!(text.starts_with("# Hand Title\n"));
        assert!(!text.contains("1970-01-01T00:00:00"));
        assert!(!text.contains("stale"));
        assert_eq!(text.matches(UPDATED_AT_START).count(), 1);
    }

    #[test]
    fn update_navigation_preserves_hand_content_outside_markers() {
        let dir = tempfile::tempdir().unwrap();
        let nav = dir.path().join(NAV_FILE);
        fs::write(
            &nav,
            "# Hand Title\n\nkeep this intro\n\n<!-- NAV:START version=0 -->\nstale\n<!-- NAV:END -->\n\n_footer remains_\n",
        )
        .unwrap();

        update_navigation(dir.path()).unwrap();
        let text = fs::read_to_string(&nav).unwrap();
        assert!(text.starts_with("# Hand Title\n\nkeep this intro\n\n"));
        assert!(text.ends_with("_footer remains_\n"));
        assert!(!text.contains("stale"));
        assert!(text.contains(NAV_START));
    }
}
