//! Topic extraction capability.
//!
//! Two variants behind one trait: a heuristic source that takes the
//! top-ranked headlines, and a degrading wrapper that runs a
//! model-backed primary and falls back to the heuristic on any failure —
//! extraction problems never propagate out of this module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use mra_core::category::classify;
use mra_core::identity::normalize_title;
use mra_core::{Result, TopicRecord};

/// One ranked headline from the trend collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendItem {
    pub rank: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_score: Option<u64>,
}

/// A day's worth of ranked headlines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendBatch {
    /// Batch calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// Where the batch came from (source tag, not a URL).
    pub source: String,
    pub items: Vec<TrendItem>,
}

/// A topic picked for report generation, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTopic {
    pub title: String,
    pub reason: String,
    pub edition: String,
    pub source_url: Option<String>,
}

/// Drop duplicate titles (case/whitespace-insensitive), re-rank by hot
/// score descending.
#[must_use]
pub fn dedupe_by_title(items: Vec<TrendItem>) -> Vec<TrendItem> {
    let mut seen = std::collections::HashSet::new();
    let mut out: Vec<TrendItem> = items
        .into_iter()
        .filter(|item| seen.insert(normalize_title(&item.title)))
        .collect();
    out.sort_by(|a, b| b.hot_score.unwrap_or(0).cmp(&a.hot_score.unwrap_or(0)));
    for (i, item) in out.iter_mut().enumerate() {
        item.rank = i as u32 + 1;
    }
    out
}

/// Classify a candidate into a full topic record for a batch date.
#[must_use]
pub fn classify_candidate(candidate: &CandidateTopic, date: &str) -> TopicRecord {
    let class = classify(&candidate.title);
    TopicRecord {
        title: candidate.title.clone(),
        category_slug: class.slug,
        category_display: class.display,
        confidence: class.confidence,
        source_url: candidate.source_url.clone(),
        edition: candidate.edition.clone(),
        date: date.to_string(),
    }
}

/// A source of candidate topics for a trend batch.
#[async_trait]
pub trait TopicExtractor: Send + Sync {
    /// Pick at most `max` candidates from the batch.
    async fn extract(&self, trends: &TrendBatch, max: usize) -> Result<Vec<CandidateTopic>>;
}

/// Heuristic extraction: the top-ranked headlines, edition v1.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

#[async_trait]
impl TopicExtractor for HeuristicExtractor {
    async fn extract(&self, trends: &TrendBatch, max: usize) -> Result<Vec<CandidateTopic>> {
        Ok(trends
            .items
            .iter()
            .take(max.max(1))
            .map(|item| CandidateTopic {
                title: item.title.clone(),
                reason: "high-ranking headline in the daily trend batch".to_string(),
                edition: "v1".to_string(),
                source_url: item.url.clone(),
            })
            .collect())
    }
}

/// Wraps a model-backed primary extractor; any failure or empty result
/// degrades to [`HeuristicExtractor`] instead of propagating.
#[derive(Debug, Clone)]
pub struct DegradingExtractor<P> {
    primary: P,
    fallback: HeuristicExtractor,
}

impl<P> DegradingExtractor<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            fallback: HeuristicExtractor,
        }
    }
}

#[async_trait]
impl<P: TopicExtractor> TopicExtractor for DegradingExtractor<P> {
    async fn extract(&self, trends: &TrendBatch, max: usize) -> Result<Vec<CandidateTopic>> {
        match self.primary.extract(trends, max).await {
            Ok(candidates) if !candidates.is_empty() => Ok(candidates),
            Ok(_) => {
                warn!("primary extractor returned no candidates, using heuristic fallback");
                self.fallback.extract(trends, max).await
            }
            Err(err) => {
                warn!(error = %err, "primary extractor failed, using heuristic fallback");
                self.fallback.extract(trends, max).await
            }
        }
    }
}
