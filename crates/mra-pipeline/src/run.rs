//! The batch run loop.
//!
//! Each topic runs its own strictly-ordered sequence (dedup check, mark
//! pending, generate with retry, write, mark ok/failed) as an
//! independent task under a concurrency cap; per-topic failures are
//! isolated. The two aggregation views are regenerated from a fresh
//! scan only after every topic task has joined, so the scan never races
//! a report write.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use mra_core::identity::compute_id;
use mra_core::report::build_report;
use mra_core::{HistoryRecord, ReportMetadata, ReportStatus, Result, TopicRecord};
use mra_vault::{Archive, Ledger};

use crate::generate::{with_retry, BodyGenerator, RetryPolicy};

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Batch calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// Identifier stamped into every report written by this run.
    pub run_id: String,
    /// Concurrency cap for topic tasks.
    pub concurrency: usize,
    /// Cap on the today-digest list.
    pub digest_max: usize,
    pub retry: RetryPolicy,
}

impl RunOptions {
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        let date = date.into();
        let run_id = format!("{date}-{:x}", Utc::now().timestamp_millis());
        Self {
            date,
            run_id,
            concurrency: 4,
            digest_max: 20,
            retry: RetryPolicy::default(),
        }
    }
}

/// End-of-run counts surfaced to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum TopicOutcome {
    Generated { changed: bool },
    Skipped,
    Failed,
}

/// Process a batch of classified topics, then regenerate the navigation
/// index and today digest from a fresh archive scan.
///
/// # Errors
///
/// Only archive-root-level failures are fatal (layout creation, view
/// regeneration); individual topic failures are counted, not raised.
pub async fn run_batch<G>(
    archive: &Archive,
    ledger: Arc<Mutex<Ledger>>,
    generator: Arc<G>,
    topics: Vec<TopicRecord>,
    opts: &RunOptions,
) -> Result<RunSummary>
where
    G: BodyGenerator + 'static,
{
    info!(run_id = %opts.run_id, topics = topics.len(), "run started");
    archive.ensure_layout()?;

    let semaphore = Arc::new(Semaphore::new(opts.concurrency.max(1)));
    let mut tasks = JoinSet::new();
    for topic in topics {
        let semaphore = Arc::clone(&semaphore);
        let archive = archive.clone();
        let ledger = Arc::clone(&ledger);
        let generator = Arc::clone(&generator);
        let run_id = opts.run_id.clone();
        let retry = opts.retry;
        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return TopicOutcome::Failed,
            };
            process_topic(&archive, &ledger, generator.as_ref(), &topic, &run_id, &retry).await
        });
    }

    let mut summary = RunSummary::default();
    let mut changed = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(TopicOutcome::Generated { changed: c }) => {
                summary.generated += 1;
                changed += usize::from(c);
            }
            Ok(TopicOutcome::Skipped) => summary.skipped += 1,
            Ok(TopicOutcome::Failed) => summary.failed += 1,
            Err(err) => {
                error!(error = %err, "topic task panicked");
                summary.failed += 1;
            }
        }
    }

    // Aggregation views always reflect disk, even after a run where every
    // topic failed or was skipped.
    archive.update_navigation()?;
    archive.update_digest(&opts.date, opts.digest_max)?;

    info!(
        run_id = %opts.run_id,
        generated = summary.generated,
        skipped = summary.skipped,
        failed = summary.failed,
        changed,
        "run finished"
    );
    Ok(summary)
}

async fn process_topic<G: BodyGenerator>(
    archive: &Archive,
    ledger: &Mutex<Ledger>,
    generator: &G,
    topic: &TopicRecord,
    run_id: &str,
    retry: &RetryPolicy,
) -> TopicOutcome {
    let id = compute_id(&topic.title, &topic.date, &topic.edition);
    let meta = ReportMetadata::from_topic(topic, "daily-trends", run_id);

    // Dedup check and pending mark under one lock acquisition.
    let pending = {
        let mut guard = ledger.lock().await;
        if guard.has(&id, ReportStatus::Ok) {
            info!(title = %topic.title, date = %topic.date, edition = %topic.edition,
                  "duplicate topic, skipping");
            return TopicOutcome::Skipped;
        }
        let rec = HistoryRecord::pending(id.clone(), &meta);
        if let Err(err) = guard.upsert(rec.clone()) {
            error!(title = %topic.title, error = %err, "failed to mark topic pending");
            return TopicOutcome::Failed;
        }
        rec
    };

    let body = match with_retry(retry, "report body generation", || generator.generate(topic)).await
    {
        Ok(body) => body,
        Err(err) => {
            warn!(title = %topic.title, error = %err, "report generation failed");
            mark_failed(ledger, pending, &err.to_string()).await;
            return TopicOutcome::Failed;
        }
    };

    let document = match build_report(&meta, &body) {
        Ok(document) => document,
        Err(err) => {
            mark_failed(ledger, pending, &err.to_string()).await;
            return TopicOutcome::Failed;
        }
    };

    let outcome = match archive.write_if_changed(&meta, &document) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(title = %topic.title, error = %err, "report write failed");
            mark_failed(ledger, pending, &err.to_string()).await;
            return TopicOutcome::Failed;
        }
    };

    {
        let mut guard = ledger.lock().await;
        if let Err(err) = guard.upsert(pending.completed(&outcome.path_rel)) {
            // The report is on disk; a ledger persist failure only costs
            // dedup on the next run.
            warn!(title = %topic.title, error = %err, "failed to mark topic ok");
        }
    }

    TopicOutcome::Generated {
        changed: outcome.changed,
    }
}

async fn mark_failed(ledger: &Mutex<Ledger>, pending: HistoryRecord, error: &str) {
    let mut guard = ledger.lock().await;
    if let Err(err) = guard.upsert(pending.failed(error)) {
        warn!(error = %err, "failed to record topic failure in ledger");
    }
}
