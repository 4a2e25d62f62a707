//! Add-or-update by name.
//!
//! The directory service only offers Add and Update as separate operations.
//! Callers that want "save this name and number, replacing the number if the
//! name is already listed" compose them here: [`plan_upsert`] decides which
//! operation applies to a snapshot of entries, and [`apply_upsert`] runs it,
//! asking the caller for confirmation before overwriting a number.

use phonebook_store::EntryStore;
use phonebook_types::{Entry, EntryId};
use tracing::debug;

use crate::error::DirectoryResult;
use crate::service::DirectoryService;

/// What saving `(name, number)` should do, given the entries already known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpsertPlan {
    /// No entry has the name.
    Add,
    /// An entry has the name but a different number.
    Update { id: EntryId, current: Entry },
    /// An entry has the name and the same number; nothing to do.
    Unchanged(Entry),
}

/// What [`apply_upsert`] ended up doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    Added(Entry),
    Updated(Entry),
    Unchanged(Entry),
    /// The caller declined to overwrite the existing number.
    Declined(Entry),
}

/// Decide between Add, Update and no-op by exact name match.
pub fn plan_upsert(entries: &[Entry], name: &str, number: &str) -> UpsertPlan {
    match entries.iter().find(|e| e.name == name) {
        None => UpsertPlan::Add,
        Some(existing) if existing.number == number => UpsertPlan::Unchanged(existing.clone()),
        Some(existing) => UpsertPlan::Update {
            id: existing.id,
            current: existing.clone(),
        },
    }
}

/// Plan against the service's current listing and carry the plan out.
///
/// `confirm` is called with the existing entry and the proposed number
/// before an overwrite; returning `false` leaves the entry alone. Failures of
/// the chosen operation are returned unchanged, e.g. `NotFound` when the
/// entry was deleted between the listing and the update.
pub async fn apply_upsert<S, F>(
    service: &DirectoryService<S>,
    name: &str,
    number: &str,
    confirm: F,
) -> DirectoryResult<UpsertOutcome>
where
    S: EntryStore + ?Sized,
    F: FnOnce(&Entry, &str) -> bool,
{
    let entries = service.list_entries().await?;
    match plan_upsert(&entries, name, number) {
        UpsertPlan::Add => service
            .add_entry(Some(name), Some(number))
            .await
            .map(UpsertOutcome::Added),
        UpsertPlan::Unchanged(entry) => {
            debug!(id = %entry.id, "upsert is a no-op");
            Ok(UpsertOutcome::Unchanged(entry))
        }
        UpsertPlan::Update { id, current } => {
            if !confirm(&current, number) {
                return Ok(UpsertOutcome::Declined(current));
            }
            service
                .update_entry_by_id(id, Some(number))
                .await
                .map(UpsertOutcome::Updated)
        }
    }
}
