//! Entry storage for the phonebook directory.
//!
//! The store owns the durable set of entries and hands out identifiers.
//! It knows nothing about request validation; that lives in the directory
//! service, which talks to every backend through the [`EntryStore`] trait.
//!
//! # Storage Backends
//!
//! - [`InMemoryEntryStore`] -- `HashMap`-based store that draws random ids
//!   from a bounded range and resamples on collision
//! - [`JournalEntryStore`] -- append-only, CRC-framed journal on disk with
//!   sequential store-assigned ids and a native unique-name constraint
//!
//! # Design Rules
//!
//! 1. An id is assigned exactly once and never reassigned.
//! 2. Every mutation is atomic with respect to every other mutation.
//! 3. Storage failures are propagated as [`StoreError`], never swallowed.
//! 4. Constraint violations are reported as distinct error variants so the
//!    caller can classify them without inspecting messages.

pub mod error;
pub mod journal;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use journal::{JournalConfig, JournalEntryStore, SyncMode};
pub use memory::{InMemoryEntryStore, DEFAULT_ID_SPACE};
pub use traits::EntryStore;
