//! Record types shared across the archive, ledger, and pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::naming::slugify;

/// A classified topic handed to the core by the extraction collaborator.
/// Immutable once handed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    pub title: String,
    pub category_slug: String,
    pub category_display: String,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Edition tag distinguishing multiple reports for the same
    /// title/date ("v1", "v2", ...).
    pub edition: String,
    /// Target calendar day, `YYYY-MM-DD`.
    pub date: String,
}

/// Metadata that fully determines a report's front matter and archive
/// path. Created once per report, never mutated after write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub title: String,
    pub date: String,
    pub edition: String,
    pub category_slug: String,
    pub category_display: String,
    pub source: String,
    pub slug: String,
    pub run_id: String,
}

impl ReportMetadata {
    /// Derive report metadata from a classified topic.
    ///
    /// `fallback_source` is recorded when the topic carries no source URL
    /// (typically the trend batch's source tag).
    #[must_use]
    pub fn from_topic(topic: &TopicRecord, fallback_source: &str, run_id: &str) -> Self {
        Self {
            title: topic.title.clone(),
            date: topic.date.clone(),
            edition: topic.edition.clone(),
            category_slug: topic.category_slug.clone(),
            category_display: topic.category_display.clone(),
            source: topic
                .source_url
                .clone()
                .unwrap_or_else(|| fallback_source.to_string()),
            slug: slugify(&topic.title),
            run_id: run_id.to_string(),
        }
    }
}

/// A named link in a report's references section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub url: String,
}

/// Structured report body: five ordered sections of itemized prose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportBody {
    pub summary: Vec<String>,
    pub background: Vec<String>,
    pub analysis: Vec<String>,
    pub references: Vec<Reference>,
    pub conclusions: Vec<String>,
}

/// Lifecycle status of an emitted report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Ok,
    Failed,
}

/// A ledger entry: one emitted report identity with a denormalized copy
/// of its metadata. Keyed by the content-addressed ID; last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub title: String,
    pub date: String,
    pub edition: String,
    pub category_slug: String,
    pub slug: String,
    /// Path relative to the archive root; empty until the report is written.
    pub path: String,
    pub source: String,
    pub run_id: String,
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// A fresh `pending` record for a report about to be generated.
    #[must_use]
    pub fn pending(id: String, meta: &ReportMetadata) -> Self {
        Self {
            id,
            title: meta.title.clone(),
            date: meta.date.clone(),
            edition: meta.edition.clone(),
            category_slug: meta.category_slug.clone(),
            slug: meta.slug.clone(),
            path: String::new(),
            source: meta.source.clone(),
            run_id: meta.run_id.clone(),
            status: ReportStatus::Pending,
            error: None,
            updated_at: Utc::now(),
        }
    }

    /// Mark this record `ok` with its emitted archive path.
    #[must_use]
    pub fn completed(mut self, path_rel: &str) -> Self {
        self.status = ReportStatus::Ok;
        self.path = path_rel.to_string();
        self.error = None;
        self.updated_at = Utc::now();
        self
    }

    /// Mark this record `failed` with the terminal error.
    #[must_use]
    pub fn failed(mut self, error: &str) -> Self {
        self.status = ReportStatus::Failed;
        self.error = Some(error.to_string());
        self.updated_at = Utc::now();
        self
    }
}

/// An archive index entry reconstructed from disk by the scanner.
/// Ephemeral: recomputed every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveIndexEntry {
    pub title: String,
    pub date: String,
    pub edition: String,
    pub category_slug: String,
    /// Path relative to the archive root, forward slashes.
    pub path_rel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> TopicRecord {
        TopicRecord {
            title: "Local LLM Optimization".to_string(),
            category_slug: "llm".to_string(),
            category_display: "Large Language Models".to_string(),
            confidence: 0.9,
            source_url: None,
            edition: "v1".to_string(),
            date: "2025-01-01".to_string(),
        }
    }

    #[test]
    fn metadata_from_topic_uses_fallback_source() {
        let meta = ReportMetadata::from_topic(&topic(), "daily-trends", "run-1");
        assert_eq!(meta.source, "daily-trends");
        assert_eq!(meta.slug, "local-llm-optimization");
        assert_eq!(meta.run_id, "run-1");
    }

    #[test]
    fn metadata_from_topic_prefers_topic_source() {
        let mut t = topic();
        t.source_url = Some("https://example.com/item".to_string());
        let meta = ReportMetadata::from_topic(&t, "daily-trends", "run-1");
        assert_eq!(meta.source, "https://example.com/item");
    }

    #[test]
    fn history_record_lifecycle_transitions() {
        let meta = ReportMetadata::from_topic(&topic(), "s", "run-1");
        let rec = HistoryRecord::pending("id-1".to_string(), &meta);
        assert_eq!(rec.status, ReportStatus::Pending);
        assert!(rec.path.is_empty());

        let ok = rec.clone().completed("reports/llm/x.md");
        assert_eq!(ok.status, ReportStatus::Ok);
        assert_eq!(ok.path, "reports/llm/x.md");

        let failed = rec.failed("generation timed out");
        assert_eq!(failed.status, ReportStatus::Failed);
        assert_eq!(failed.error.as_deref(), Some("generation timed out"));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(serde_json::to_string(&ReportStatus::Ok).unwrap(), "\"ok\"");
    }
}
