//! # mra-vault
//!
//! Filesystem engine for the Markdown report archive.
//!
//! The archive on disk is the authoritative source of truth. The history
//! ledger is only a dedup hint; the two aggregation views (navigation
//! index and today digest) are always regenerated from a fresh scan of
//! the files that actually exist, never from in-memory state.
//!
//! Modules:
//! - [`writer`] — deterministic path policy and change-aware writes
//! - [`scanner`] — archive index reconstruction by scanning
//! - [`ledger`] — durable emitted-report ledger
//! - [`patcher`] — marker-delimited region replacement
//! - [`navigation`] — full category index renderer and updater
//! - [`digest`] — today-digest updater

pub mod archive;
pub mod digest;
pub mod ledger;
pub mod navigation;
pub mod patcher;
pub mod scanner;
pub mod writer;

pub use archive::Archive;
pub use ledger::Ledger;
pub use writer::{WriteOutcome, REPORTS_DIR};
