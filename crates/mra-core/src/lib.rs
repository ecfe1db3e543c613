//! # mra-core
//!
//! Core types and pure functions for the Markdown report archive.
//!
//! This crate defines the foundational pieces used across all other mra
//! crates:
//! - [`record`] — the shared record types ([`TopicRecord`],
//!   [`ReportMetadata`], [`ReportBody`], [`HistoryRecord`],
//!   [`ArchiveIndexEntry`])
//! - [`identity`] — content-addressed report IDs
//! - [`naming`] — URL slugs and filesystem-safe names
//! - [`frontmatter`] — YAML frontmatter split/parse/write
//! - [`report`] — report document assembly
//! - [`category`] — the ordered category rule table
//! - Error hierarchy ([`MraError`])

pub mod category;
pub mod error;
pub mod frontmatter;
pub mod identity;
pub mod naming;
pub mod record;
pub mod report;

pub use error::{MraError, Result};
pub use record::{
    ArchiveIndexEntry, HistoryRecord, Reference, ReportBody, ReportMetadata, ReportStatus,
    TopicRecord,
};
