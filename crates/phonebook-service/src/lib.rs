//! Directory service for the phonebook.
//!
//! Sits between a transport and an [`EntryStore`](phonebook_store::EntryStore):
//! validates requests, applies the one-entry-per-name rule, and reports
//! every failure as a [`DirectoryError`].
//!
//! # Policies
//!
//! - A name or number that is absent or the empty string is missing.
//! - Names are compared exactly (case-sensitive).
//! - Uniqueness is checked by the service or left to the store, see
//!   [`UniquenessStrategy`].
//! - Deleting an absent id succeeds with [`DeleteOutcome::Absent`].

pub mod error;
pub mod service;
pub mod upsert;

pub use error::{DirectoryError, DirectoryResult, ErrorClass};
pub use service::{DeleteOutcome, DirectoryInfo, DirectoryService, UniquenessStrategy};
pub use upsert::{apply_upsert, plan_upsert, UpsertOutcome, UpsertPlan};
