//! Report body generation and the retry policy for transient failures.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use mra_core::{Reference, ReportBody, Result, TopicRecord};

/// Produces the prose body for one classified topic. Implementations may
/// call out to a model service; the template generator below is the
/// offline default.
#[async_trait]
pub trait BodyGenerator: Send + Sync {
    async fn generate(&self, topic: &TopicRecord) -> Result<ReportBody>;
}

/// Deterministic, offline body generator: a research-note template
/// filled from the topic itself. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

#[async_trait]
impl BodyGenerator for TemplateGenerator {
    async fn generate(&self, topic: &TopicRecord) -> Result<ReportBody> {
        let confidence_pct = (topic.confidence * 100.0).round() as u32;
        let mut references = vec![Reference {
            name: "Web search".to_string(),
            url: format!(
                "https://www.google.com/search?q={}",
                topic.title.replace(' ', "+")
            ),
        }];
        if let Some(url) = &topic.source_url {
            references.push(Reference {
                name: "Trend source".to_string(),
                url: url.clone(),
            });
        }

        Ok(ReportBody {
            summary: vec![
                format!(
                    "\"{}\" surfaced in the daily trend batch and was flagged as worth a closer look.",
                    topic.title
                ),
                format!(
                    "Category: {} ({confidence_pct}% confidence).",
                    topic.category_display
                ),
            ],
            background: vec![
                "The topic is drawing attention across social and media channels; cross-check against primary sources before relying on it.".to_string(),
                "Mind the freshness and reliability of the underlying data.".to_string(),
            ],
            analysis: vec![
                "Break the topic down along user, product, technology, and market dimensions to identify drivers and constraints.".to_string(),
                "Compare against adjacent fields to surface transferable lessons and risks.".to_string(),
                "Weigh short-term against long-term impact to gauge the opportunity window.".to_string(),
            ],
            references,
            conclusions: vec![
                "Short term: gather first-hand data, verify across sources, and draft an initial finding for peer review.".to_string(),
                "Mid term: turn the finding into action items with verifiable metrics.".to_string(),
            ],
        })
    }
}

/// Exponential backoff policy for transient generation failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            factor: 2.0,
        }
    }
}

/// Run a fallible async operation under a retry policy. The last error
/// surfaces to the caller once attempts are exhausted.
///
/// # Errors
///
/// Returns the final attempt's error.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = policy.initial_backoff;
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_attempts => {
                warn!(attempt, error = %err, "{label} failed, retrying");
                tokio::time::sleep(delay).await;
                delay = delay.mul_f64(policy.factor);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mra_core::MraError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn topic() -> TopicRecord {
        TopicRecord {
            title: "Local LLM Optimization".to_string(),
            category_slug: "llm".to_string(),
            category_display: "Large Language Models".to_string(),
            confidence: 0.9,
            source_url: Some("https://example.com/item".to_string()),
            edition: "v1".to_string(),
            date: "2025-01-01".to_string(),
        }
    }

    #[tokio::test]
    async fn template_generator_is_deterministic_and_complete() {
        let a = TemplateGenerator.generate(&topic()).await.unwrap();
        let b = TemplateGenerator.generate(&topic()).await.unwrap();
        assert_eq!(a, b);
        assert!(!a.summary.is_empty());
        assert!(!a.analysis.is_empty());
        assert!(!a.conclusions.is_empty());
        assert!(a.summary[1].contains("90%"));
    }

    #[tokio::test]
    async fn template_generator_includes_source_reference() {
        let body = TemplateGenerator.generate(&topic()).await.unwrap();
        assert_eq!(body.references.len(), 2);
        assert_eq!(body.references[1].url, "https://example.com/item");

        let mut t = topic();
        t.source_url = None;
        let body = TemplateGenerator.generate(&t).await.unwrap();
        assert_eq!(body.references.len(), 1);
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1),
            factor: 1.0,
        }
    }

    #[tokio::test]
    async fn with_retry_recovers_from_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_policy(), "flaky op", || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(MraError::Pipeline("transient".to_string()))
            } else {
                Ok(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn with_retry_surfaces_the_final_error() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_retry(&fast_policy(), "always fails", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(MraError::Pipeline("permanent".to_string()))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
