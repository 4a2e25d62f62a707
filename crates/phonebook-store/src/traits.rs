use async_trait::async_trait;
use phonebook_types::{Entry, EntryId, NewEntry};

use crate::error::StoreResult;

/// Identifier-indexed storage of directory entries.
///
/// All implementations must satisfy these invariants:
/// - `insert` assigns an id that no other entry in the collection holds, and
///   that id never changes afterwards.
/// - Each mutation (`insert`, `update_number`, `remove`) is atomic: two
///   mutations never interleave.
/// - `list` returns a consistent snapshot ordered by id.
/// - All I/O errors are propagated, never silently ignored.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries, ordered by id.
    async fn list(&self) -> StoreResult<Vec<Entry>>;

    /// Read an entry by id.
    ///
    /// Returns `Ok(None)` if no entry has that id.
    async fn get(&self, id: EntryId) -> StoreResult<Option<Entry>>;

    /// Persist a new entry and return it with its freshly assigned id.
    ///
    /// Stores that enforce unique names fail with
    /// [`StoreError::UniqueViolation`](crate::StoreError::UniqueViolation)
    /// when the name is taken.
    async fn insert(&self, entry: NewEntry) -> StoreResult<Entry>;

    /// Overwrite the number of an existing entry.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) if
    /// the id is absent.
    async fn update_number(&self, id: EntryId, number: &str) -> StoreResult<Entry>;

    /// Delete an entry by id. Returns `true` if the entry existed.
    async fn remove(&self, id: EntryId) -> StoreResult<bool>;

    /// Look up an entry by its exact name.
    ///
    /// Default implementation scans `list()`. Backends with a name index
    /// should override it.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Entry>> {
        Ok(self.list().await?.into_iter().find(|e| e.name == name))
    }

    /// Number of stored entries.
    async fn count(&self) -> StoreResult<usize> {
        Ok(self.list().await?.len())
    }

    /// Whether `insert` itself rejects duplicate names.
    fn enforces_unique_names(&self) -> bool;

    /// A short backend name, used in logs.
    fn name(&self) -> &str;
}
