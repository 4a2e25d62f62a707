use std::sync::Arc;

use chrono::{DateTime, Local};
use phonebook_store::EntryStore;
use phonebook_types::{Entry, EntryId, Field, NewEntry};
use tracing::{debug, info, warn};

use crate::error::{DirectoryError, DirectoryResult};

/// Where the one-entry-per-name rule is enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniquenessStrategy {
    /// The service looks the name up before inserting.
    Service,
    /// The store rejects duplicates itself; the service skips the lookup and
    /// maps the store's violation to [`DirectoryError::DuplicateName`].
    Store,
}

impl UniquenessStrategy {
    /// `Store` if the store enforces unique names, `Service` otherwise.
    pub fn for_store<S: EntryStore + ?Sized>(store: &S) -> Self {
        if store.enforces_unique_names() {
            Self::Store
        } else {
            Self::Service
        }
    }
}

/// Result of a delete request.
///
/// Deletes are idempotent: an absent id is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    Absent,
}

/// Data for the directory summary page.
#[derive(Clone, Debug)]
pub struct DirectoryInfo {
    pub count: usize,
    pub generated_at: DateTime<Local>,
}

/// Validation and business rules over an [`EntryStore`].
///
/// The service holds no state of its own besides the injected store handle,
/// so it is cheap to clone and share between request handlers. Operations
/// that take an id accept its raw textual form and report
/// [`DirectoryError::MalformedId`] when it does not parse.
pub struct DirectoryService<S: EntryStore + ?Sized = dyn EntryStore> {
    store: Arc<S>,
    uniqueness: UniquenessStrategy,
}

impl<S: EntryStore + ?Sized> Clone for DirectoryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            uniqueness: self.uniqueness,
        }
    }
}

impl<S: EntryStore + ?Sized> DirectoryService<S> {
    /// Create a service over `store`, choosing the uniqueness strategy from
    /// what the store enforces.
    pub fn new(store: Arc<S>) -> Self {
        let uniqueness = UniquenessStrategy::for_store(&*store);
        debug!(backend = store.name(), ?uniqueness, "directory service created");
        Self { store, uniqueness }
    }

    /// Override the uniqueness strategy.
    pub fn with_uniqueness(mut self, uniqueness: UniquenessStrategy) -> Self {
        if uniqueness == UniquenessStrategy::Store && !self.store.enforces_unique_names() {
            warn!(
                backend = self.store.name(),
                "store does not enforce unique names; duplicate names will be accepted"
            );
        }
        self.uniqueness = uniqueness;
        self
    }

    pub fn uniqueness(&self) -> UniquenessStrategy {
        self.uniqueness
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // ---- Reads ----

    pub async fn list_entries(&self) -> DirectoryResult<Vec<Entry>> {
        Ok(self.store.list().await?)
    }

    pub async fn get_entry(&self, raw_id: &str) -> DirectoryResult<Entry> {
        self.get_entry_by_id(EntryId::parse(raw_id)?).await
    }

    pub async fn get_entry_by_id(&self, id: EntryId) -> DirectoryResult<Entry> {
        self.store
            .get(id)
            .await?
            .ok_or(DirectoryError::NotFound(id))
    }

    pub async fn count(&self) -> DirectoryResult<usize> {
        Ok(self.store.count().await?)
    }

    /// Live entry count stamped with the current local time.
    pub async fn info(&self) -> DirectoryResult<DirectoryInfo> {
        Ok(DirectoryInfo {
            count: self.count().await?,
            generated_at: Local::now(),
        })
    }

    // ---- Writes ----

    /// Create a new entry.
    ///
    /// Checks, in order: name present, number present, name not taken.
    /// Missing-field checks never touch the store.
    pub async fn add_entry(
        &self,
        name: Option<&str>,
        number: Option<&str>,
    ) -> DirectoryResult<Entry> {
        let name = required(Field::Name, name)?;
        let number = required(Field::Number, number)?;

        if self.uniqueness == UniquenessStrategy::Service
            && self.store.find_by_name(name).await?.is_some()
        {
            return Err(DirectoryError::DuplicateName(name.to_string()));
        }

        let entry = self.store.insert(NewEntry::new(name, number)).await?;
        info!(id = %entry.id, name = %entry.name, "entry added");
        Ok(entry)
    }

    /// Overwrite the number of an existing entry. The name is never changed,
    /// so uniqueness is not re-checked.
    pub async fn update_entry(
        &self,
        raw_id: &str,
        number: Option<&str>,
    ) -> DirectoryResult<Entry> {
        self.update_entry_by_id(EntryId::parse(raw_id)?, number).await
    }

    pub async fn update_entry_by_id(
        &self,
        id: EntryId,
        number: Option<&str>,
    ) -> DirectoryResult<Entry> {
        let number = required(Field::Number, number)?;
        let entry = self.store.update_number(id, number).await?;
        info!(id = %entry.id, "entry updated");
        Ok(entry)
    }

    pub async fn delete_entry(&self, raw_id: &str) -> DirectoryResult<DeleteOutcome> {
        self.delete_entry_by_id(EntryId::parse(raw_id)?).await
    }

    pub async fn delete_entry_by_id(&self, id: EntryId) -> DirectoryResult<DeleteOutcome> {
        if self.store.remove(id).await? {
            info!(%id, "entry deleted");
            Ok(DeleteOutcome::Removed)
        } else {
            debug!(%id, "delete of absent entry");
            Ok(DeleteOutcome::Absent)
        }
    }
}

fn required(field: Field, value: Option<&str>) -> DirectoryResult<&str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DirectoryError::MissingField(field)),
    }
}
