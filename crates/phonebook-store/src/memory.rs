use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use phonebook_types::{Entry, EntryId, Field, NewEntry};
use rand::Rng;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::EntryStore;

/// Default size of the id space ids are drawn from: `[0, 1000)`.
pub const DEFAULT_ID_SPACE: u64 = 1000;

/// In-memory, HashMap-based entry store.
///
/// Ids are drawn uniformly at random from `[0, id_space)`. A draw that
/// collides with an existing id is thrown away and a new one is drawn, so
/// insertion is an unbounded retry loop that terminates almost surely while
/// the collection is smaller than the id space. A completely full id space
/// is reported as [`StoreError::IdSpaceExhausted`] up front.
///
/// The write lock is taken once per draw for the check-and-insert step and
/// released before the next draw.
pub struct InMemoryEntryStore {
    entries: RwLock<HashMap<EntryId, Entry>>,
    id_space: u64,
    unique_names: bool,
}

impl InMemoryEntryStore {
    /// Create a new empty store drawing ids from `[0, DEFAULT_ID_SPACE)`.
    pub fn new() -> Self {
        Self::with_id_space(DEFAULT_ID_SPACE)
    }

    /// Create a new empty store drawing ids from `[0, id_space)`.
    ///
    /// An `id_space` of zero is treated as one.
    pub fn with_id_space(id_space: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            id_space: id_space.max(1),
            unique_names: false,
        }
    }

    /// Enforce unique names inside the store itself.
    ///
    /// The name check then runs in the same critical section as the insert.
    pub fn with_unique_names(mut self) -> Self {
        self.unique_names = true;
        self
    }

    /// Create a store pre-populated with entries whose ids are already set.
    ///
    /// Later entries replace earlier ones with the same id.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.entries.write() {
            map.extend(entries.into_iter().map(|e| (e.id, e)));
        }
        store
    }

    /// Upper bound (exclusive) of the id space.
    pub fn id_space(&self) -> u64 {
        self.id_space
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<EntryId, Entry>>> {
        self.entries.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<EntryId, Entry>>> {
        self.entries.write().map_err(|_| StoreError::LockPoisoned)
    }

    fn draw_id(&self) -> EntryId {
        EntryId::new(rand::thread_rng().gen_range(0..self.id_space))
    }

    fn snapshot(&self) -> StoreResult<Vec<Entry>> {
        let map = self.read()?;
        let mut entries: Vec<Entry> = map.values().cloned().collect();
        entries.sort_by_key(|e| e.id);
        Ok(entries)
    }

    fn insert_entry(&self, entry: NewEntry) -> StoreResult<Entry> {
        loop {
            let candidate = self.draw_id();
            let mut map = self.write()?;

            if map.len() as u64 >= self.id_space {
                return Err(StoreError::IdSpaceExhausted {
                    capacity: self.id_space,
                });
            }
            if self.unique_names && map.values().any(|e| e.name == entry.name) {
                return Err(StoreError::UniqueViolation {
                    field: Field::Name,
                    value: entry.name,
                });
            }
            if map.contains_key(&candidate) {
                debug!(id = %candidate, "duplicate id drawn, resampling");
                continue;
            }

            let stored = entry.with_id(candidate);
            map.insert(candidate, stored.clone());
            return Ok(stored);
        }
    }

    fn update_entry(&self, id: EntryId, number: &str) -> StoreResult<Entry> {
        let mut map = self.write()?;
        let entry = map.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        entry.number = number.to_string();
        Ok(entry.clone())
    }
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn list(&self) -> StoreResult<Vec<Entry>> {
        self.snapshot()
    }

    async fn get(&self, id: EntryId) -> StoreResult<Option<Entry>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn insert(&self, entry: NewEntry) -> StoreResult<Entry> {
        self.insert_entry(entry)
    }

    async fn update_number(&self, id: EntryId, number: &str) -> StoreResult<Entry> {
        self.update_entry(id, number)
    }

    async fn remove(&self, id: EntryId) -> StoreResult<bool> {
        Ok(self.write()?.remove(&id).is_some())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Entry>> {
        Ok(self.read()?.values().find(|e| e.name == name).cloned())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    fn enforces_unique_names(&self) -> bool {
        self.unique_names
    }

    fn name(&self) -> &str {
        "memory"
    }
}

impl std::fmt::Debug for InMemoryEntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEntryStore")
            .field("entry_count", &self.len())
            .field("id_space", &self.id_space)
            .field("unique_names", &self.unique_names)
            .finish()
    }
}
