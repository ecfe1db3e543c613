//! Archive reconstruction by scanning report files on disk.
//!
//! For each markdown file under the reports tree the scanner first tries
//! the frontmatter header, then falls back to parsing the writer's
//! filename grammar in reverse. Files that cannot be read are logged and
//! skipped; a single bad file never aborts the scan.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::warn;
use walkdir::WalkDir;

use mra_core::frontmatter::split_frontmatter;
use mra_core::ArchiveIndexEntry;

use crate::writer::REPORTS_DIR;

/// Edition assumed when a file carries none.
const DEFAULT_EDITION: &str = "v1";
/// Category assumed when neither header nor directory provide one.
const DEFAULT_CATEGORY: &str = "uncategorized";

/// Tolerant frontmatter shape: every field optional so a partial header
/// still contributes what it has.
#[derive(Debug, Default, Deserialize)]
struct ScannedHeader {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    edition: Option<String>,
    #[serde(default)]
    category_slug: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

static DATE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\d{4}-\d{2}-\d{2})$").expect("date suffix pattern"));

/// Scan the archive's reports tree into an index.
///
/// Output ordering is unspecified; callers sort as needed.
#[must_use]
pub fn scan(root: &Path) -> Vec<ArchiveIndexEntry> {
    let reports_root = root.join(REPORTS_DIR);
    let mut entries = Vec::new();

    for item in WalkDir::new(&reports_root) {
        let item = match item {
            Ok(item) => item,
            Err(err) => {
                warn!(error = %err, "skipping unreadable archive entry");
                continue;
            }
        };
        if !item.file_type().is_file() {
            continue;
        }
        let path = item.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let rel = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable report");
                continue;
            }
        };

        entries.push(index_entry(path, &rel, &content));
    }

    entries
}

fn index_entry(path: &Path, rel: &str, content: &str) -> ArchiveIndexEntry {
    if let Some(header) = parse_header(content) {
        return ArchiveIndexEntry {
            title: header.title.unwrap_or_default(),
            date: header.date.unwrap_or_default(),
            edition: header
                .edition
                .unwrap_or_else(|| DEFAULT_EDITION.to_string()),
            category_slug: header
                .category_slug
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            path_rel: rel.to_string(),
            source: header.source,
        };
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let (title, date, edition) = parse_stem(stem);

    // Category from the immediate parent directory when headerless.
    let category_slug = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .filter(|n| *n != REPORTS_DIR)
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    ArchiveIndexEntry {
        title,
        date,
        edition,
        category_slug,
        path_rel: rel.to_string(),
        source: None,
    }
}

fn parse_header(content: &str) -> Option<ScannedHeader> {
    let (yaml, _body) = split_frontmatter(content).ok()?;
    serde_yaml::from_str(yaml).ok()
}

/// Parse the writer's filename grammar in reverse:
/// `{title}-{YYYY-MM-DD}--{edition}`.
///
/// Best-effort by design: a title that itself ends in a date-shaped
/// `-YYYY-MM-DD` substring is indistinguishable from the real date
/// suffix and parses as one.
fn parse_stem(stem: &str) -> (String, String, String) {
    let (left, edition) = match stem.split_once("--") {
        Some((left, ed)) if !ed.is_empty() => (left, ed.to_string()),
        Some((left, _)) => (left, DEFAULT_EDITION.to_string()),
        None => (stem, DEFAULT_EDITION.to_string()),
    };

    if let Some(m) = DATE_SUFFIX.find(left) {
        let date = left[m.start() + 1..].to_string();
        let title = left[..m.start()].to_string();
        return (title, date, edition);
    }

    // No dated suffix: split on the last dash, else the whole segment is
    // the title with an empty date.
    match left.rfind('-') {
        Some(pos) if pos > 0 => (
            left[..pos].to_string(),
            left[pos + 1..].to_string(),
            edition,
        ),
        _ => (left.to_string(), String::new(), edition),
    }
}
