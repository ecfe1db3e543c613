//! # mra-pipeline
//!
//! Batch orchestration for the report archive: turning a day's trend
//! batch into persisted reports and regenerated aggregation views.
//!
//! - [`extract`] — topic extraction capability (heuristic source plus a
//!   degrading wrapper for model-backed sources)
//! - [`generate`] — report body generation trait, the offline template
//!   generator, and the retry policy
//! - [`run`] — the bounded-concurrency run loop and run summary

pub mod extract;
pub mod generate;
pub mod run;

pub use extract::{CandidateTopic, TopicExtractor, TrendBatch, TrendItem};
pub use generate::{BodyGenerator, RetryPolicy, TemplateGenerator};
pub use run::{run_batch, RunOptions, RunSummary};
