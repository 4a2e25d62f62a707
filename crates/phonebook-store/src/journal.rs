use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use phonebook_types::{Entry, EntryId, Field, NewEntry};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::EntryStore;

/// A single mutation recorded in the journal.
///
/// On-disk format of each record:
/// ```text
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized JournalRecord)]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum JournalRecord {
    Insert(Entry),
    UpdateNumber { id: EntryId, number: String },
    Remove { id: EntryId },
}

/// Flush/sync strategy for the journal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// `fsync` after every record (safest, highest latency).
    EveryWrite,
    /// Hand every record to the OS and rely on its page cache.
    #[default]
    OsDefault,
}

/// Configuration for a [`JournalEntryStore`].
#[derive(Clone, Debug, Default)]
pub struct JournalConfig {
    /// Sync strategy.
    pub sync_mode: SyncMode,
    /// Maximum length, in characters, of `name` and `number`. `None` means
    /// unlimited.
    pub max_field_len: Option<usize>,
}

/// Header size: 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 8;

/// The file records are appended to.
trait JournalFile: Write + Send {
    fn truncate(&mut self, len: u64) -> io::Result<()>;
    fn sync(&mut self) -> io::Result<()>;
}

impl JournalFile for File {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

struct JournalState {
    entries: BTreeMap<EntryId, Entry>,
    names: HashMap<String, EntryId>,
    next_id: u64,
    file: Box<dyn JournalFile>,
    /// Length of the journal up to the end of the last committed record.
    offset: u64,
    /// A failed append may have left bytes past `offset` that could not be
    /// cut off yet.
    dirty: bool,
}

impl JournalState {
    fn apply(&mut self, record: JournalRecord) {
        match record {
            JournalRecord::Insert(entry) => {
                self.next_id = self.next_id.max(entry.id.get().saturating_add(1));
                self.names.insert(entry.name.clone(), entry.id);
                self.entries.insert(entry.id, entry);
            }
            JournalRecord::UpdateNumber { id, number } => {
                if let Some(entry) = self.entries.get_mut(&id) {
                    entry.number = number;
                }
            }
            JournalRecord::Remove { id } => {
                if let Some(entry) = self.entries.remove(&id) {
                    self.names.remove(&entry.name);
                }
            }
        }
    }

    /// Account for a record that could not be read. It may have been an
    /// insert holding the next id, so that id is retired.
    fn skip(&mut self) {
        self.next_id = self.next_id.saturating_add(1);
    }
}

/// Durable entry store backed by an append-only journal file.
///
/// Ids are assigned by the store itself: each new entry gets one more than
/// the highest id ever recorded in the journal, so ids are never reused,
/// not even after the entry holding the highest id is deleted and the store
/// is reopened. Names are unique; a duplicate insert fails with
/// [`StoreError::UniqueViolation`].
///
/// Opening the store replays the journal front-to-back. Records that fail
/// the CRC check are skipped with a warning, and each one retires an id so
/// that an unreadable insert cannot have its id handed out again. A record
/// cut short at the very end of the file (a torn write) ends recovery and is
/// cut off so that new records are appended after the last good one. A
/// damaged record header with intact records behind it fails the open with
/// [`StoreError::Serialization`] and leaves the file as it is. The journal
/// is never compacted.
pub struct JournalEntryStore {
    path: PathBuf,
    state: Mutex<JournalState>,
    config: JournalConfig,
}

impl JournalEntryStore {
    /// Open (or create) a journal at the given path and replay it.
    pub fn open(path: &Path, config: JournalConfig) -> StoreResult<Self> {
        Self::open_with(path, config, |file| -> Box<dyn JournalFile> { Box::new(file) })
    }

    fn open_with(
        path: &Path,
        config: JournalConfig,
        wrap: impl FnOnce(File) -> Box<dyn JournalFile>,
    ) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        let file_len = bytes.len() as u64;

        let recovery = recover(&bytes)?;
        if recovery.valid_len < file_len {
            warn!(
                path = %path.display(),
                valid_len = recovery.valid_len,
                file_len,
                "discarding torn journal tail"
            );
            file.set_len(recovery.valid_len)?;
        }

        let mut state = JournalState {
            entries: BTreeMap::new(),
            names: HashMap::new(),
            next_id: 1,
            file: wrap(file),
            offset: recovery.valid_len,
            dirty: false,
        };
        let replayed = recovery.records.len();
        let mut skipped = 0;
        for record in recovery.records {
            match record {
                Some(record) => state.apply(record),
                None => {
                    skipped += 1;
                    state.skip();
                }
            }
        }

        info!(
            path = %path.display(),
            records = replayed,
            skipped,
            entries = state.entries.len(),
            "journal store opened"
        );

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(state),
            config,
        })
    }

    /// Path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current size of the journal in bytes.
    pub fn offset(&self) -> StoreResult<u64> {
        Ok(self.lock()?.offset)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, JournalState>> {
        self.state.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn check_len(&self, field: Field, value: &str) -> StoreResult<()> {
        if let Some(max) = self.config.max_field_len {
            let len = value.chars().count();
            if len > max {
                return Err(StoreError::ConstraintViolation {
                    field,
                    reason: format!("length {len} exceeds maximum of {max}"),
                });
            }
        }
        Ok(())
    }

    /// Append a record to the journal and, once it is written, apply it to
    /// the in-memory view.
    ///
    /// A failed append is cut back off the file, so neither the file nor the
    /// view keeps any trace of it.
    fn commit(&self, state: &mut JournalState, record: JournalRecord) -> StoreResult<()> {
        let frame = encode_frame(&record)?;

        if state.dirty {
            state.file.truncate(state.offset)?;
            state.dirty = false;
        }
        if let Err(e) = self.append(&mut *state.file, &frame) {
            state.dirty = true;
            match state.file.truncate(state.offset) {
                Ok(()) => state.dirty = false,
                Err(te) => warn!(offset = state.offset, error = %te, "failed to roll back journal append"),
            }
            return Err(e.into());
        }

        debug!(offset = state.offset, len = frame.len(), "journal append");
        state.offset += frame.len() as u64;
        state.apply(record);
        Ok(())
    }

    fn append(&self, file: &mut dyn JournalFile, frame: &[u8]) -> io::Result<()> {
        file.write_all(frame)?;
        file.flush()?;
        if self.config.sync_mode == SyncMode::EveryWrite {
            file.sync()?;
        }
        Ok(())
    }

    fn insert_entry(&self, entry: NewEntry) -> StoreResult<Entry> {
        self.check_len(Field::Name, &entry.name)?;
        self.check_len(Field::Number, &entry.number)?;

        let mut state = self.lock()?;
        if state.names.contains_key(&entry.name) {
            return Err(StoreError::UniqueViolation {
                field: Field::Name,
                value: entry.name,
            });
        }
        let stored = entry.with_id(EntryId::new(state.next_id));
        self.commit(&mut state, JournalRecord::Insert(stored.clone()))?;
        Ok(stored)
    }

    fn update_entry(&self, id: EntryId, number: &str) -> StoreResult<Entry> {
        self.check_len(Field::Number, number)?;

        let mut state = self.lock()?;
        if !state.entries.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        self.commit(
            &mut state,
            JournalRecord::UpdateNumber {
                id,
                number: number.to_string(),
            },
        )?;
        state.entries.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn remove_entry(&self, id: EntryId) -> StoreResult<bool> {
        let mut state = self.lock()?;
        if !state.entries.contains_key(&id) {
            return Ok(false);
        }
        self.commit(&mut state, JournalRecord::Remove { id })?;
        Ok(true)
    }
}

fn encode_frame(record: &JournalRecord) -> StoreResult<Vec<u8>> {
    let payload =
        bincode::serialize(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
    let length = u32::try_from(payload.len())
        .map_err(|_| StoreError::Serialization("journal record too large".into()))?;

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.extend_from_slice(&length.to_le_bytes());
    frame.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Split a frame off the front of `buf` into its expected CRC and payload.
///
/// Returns `None` when the header is incomplete, declares an empty payload,
/// or declares more bytes than `buf` holds.
fn read_frame(buf: &[u8]) -> Option<(u32, &[u8])> {
    let header = buf.get(..HEADER_SIZE)?;
    let length = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
    let crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if length == 0 {
        return None;
    }
    let payload = buf.get(HEADER_SIZE..HEADER_SIZE.checked_add(length)?)?;
    Some((crc, payload))
}

/// Offset of the first checksum-valid frame at or after `from`.
fn find_intact_frame(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len()).find(|&pos| {
        read_frame(&bytes[pos..]).is_some_and(|(crc, payload)| crc32fast::hash(payload) == crc)
    })
}

struct Recovery {
    /// Records in journal order; `None` marks one skipped as unreadable.
    records: Vec<Option<JournalRecord>>,
    /// Length of the readable prefix; anything past it is a torn write.
    valid_len: u64,
}

/// Read every record from the journal contents.
fn recover(bytes: &[u8]) -> StoreResult<Recovery> {
    let mut records = Vec::new();
    let mut offset = 0usize;

    while offset < bytes.len() {
        let Some((expected_crc, payload)) = read_frame(&bytes[offset..]) else {
            if let Some(intact) = find_intact_frame(bytes, offset + 1) {
                return Err(StoreError::Serialization(format!(
                    "corrupt journal record header at offset {offset} \
                     (intact record follows at offset {intact})"
                )));
            }
            break;
        };

        let next = offset + HEADER_SIZE + payload.len();
        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            warn!(
                offset,
                expected = expected_crc,
                actual = actual_crc,
                "CRC mismatch; skipping journal record"
            );
            records.push(None);
        } else {
            match bincode::deserialize::<JournalRecord>(payload) {
                Ok(record) => records.push(Some(record)),
                Err(e) => {
                    warn!(offset, error = %e, "failed to decode journal record; skipping");
                    records.push(None);
                }
            }
        }
        offset = next;
    }

    debug!(recovered = records.len(), "journal recovery complete");
    Ok(Recovery {
        records,
        valid_len: offset as u64,
    })
}

#[async_trait]
impl EntryStore for JournalEntryStore {
    async fn list(&self) -> StoreResult<Vec<Entry>> {
        Ok(self.lock()?.entries.values().cloned().collect())
    }

    async fn get(&self, id: EntryId) -> StoreResult<Option<Entry>> {
        Ok(self.lock()?.entries.get(&id).cloned())
    }

    async fn insert(&self, entry: NewEntry) -> StoreResult<Entry> {
        self.insert_entry(entry)
    }

    async fn update_number(&self, id: EntryId, number: &str) -> StoreResult<Entry> {
        self.update_entry(id, number)
    }

    async fn remove(&self, id: EntryId) -> StoreResult<bool> {
        self.remove_entry(id)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Entry>> {
        let state = self.lock()?;
        Ok(state
            .names
            .get(name)
            .and_then(|id| state.entries.get(id))
            .cloned())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.lock()?.entries.len())
    }

    fn enforces_unique_names(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "journal"
    }
}

impl std::fmt::Debug for JournalEntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JournalEntryStore")
            .field("path", &self.path)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// File that, when armed, writes half of the next buffer and then fails.
    struct FailingFile {
        inner: File,
        fail_next: Arc<AtomicBool>,
    }

    impl Write for FailingFile {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                self.inner.write_all(&buf[..buf.len() / 2])?;
                return Err(io::Error::new(io::ErrorKind::Other, "no space left on device"));
            }
            self.inner.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }
    }

    impl JournalFile for FailingFile {
        fn truncate(&mut self, len: u64) -> io::Result<()> {
            self.inner.set_len(len)
        }

        fn sync(&mut self) -> io::Result<()> {
            self.inner.sync_all()
        }
    }

    fn overwrite_byte(path: &Path, at: u64, value: u8) {
        let mut file = OpenOptions::new().read(true).write(true).open(path).unwrap();
        file.seek(SeekFrom::Start(at)).unwrap();
        file.write_all(&[value]).unwrap();
        file.sync_all().unwrap();
    }

    fn open(path: &Path) -> JournalEntryStore {
        JournalEntryStore::open(path, JournalConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir.path().join("entries.journal"));

        let a = store.insert(NewEntry::new("Arto Hellas", "040-123456")).await.unwrap();
        let b = store.insert(NewEntry::new("Ada Lovelace", "39-44-5323523")).await.unwrap();
        assert_eq!(a.id, EntryId::new(1));
        assert_eq!(b.id, EntryId::new(2));
        assert!(store.enforces_unique_names());
    }

    #[tokio::test]
    async fn state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.journal");
        {
            let store = open(&path);
            let a = store.insert(NewEntry::new("Arto Hellas", "040-123456")).await.unwrap();
            let b = store.insert(NewEntry::new("Ada Lovelace", "39-44-5323523")).await.unwrap();
            store.update_number(b.id, "00-000000").await.unwrap();
            assert!(store.remove(a.id).await.unwrap());
        }

        let store = open(&path);
        let entries = store.list().await.unwrap();
        assert_eq!(entries, vec![Entry::new(EntryId::new(2), "Ada Lovelace", "00-000000")]);
        assert!(store.find_by_name("Arto Hellas").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.journal");
        {
            let store = open(&path);
            store.insert(NewEntry::new("a", "1")).await.unwrap();
            let b = store.insert(NewEntry::new("b", "2")).await.unwrap();
            store.remove(b.id).await.unwrap();
        }

        let store = open(&path);
        let c = store.insert(NewEntry::new("c", "3")).await.unwrap();
        assert_eq!(c.id, EntryId::new(3));
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir.path().join("entries.journal"));
        store.insert(NewEntry::new("Ada Lovelace", "1")).await.unwrap();

        let err = store.insert(NewEntry::new("Ada Lovelace", "2")).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { field: Field::Name, .. }));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn name_is_free_again_after_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir.path().join("entries.journal"));
        let a = store.insert(NewEntry::new("Ada Lovelace", "1")).await.unwrap();
        store.remove(a.id).await.unwrap();
        let b = store.insert(NewEntry::new("Ada Lovelace", "2")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn missing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir.path().join("entries.journal"));
        let before = store.offset().unwrap();

        assert!(store.get(EntryId::new(9)).await.unwrap().is_none());
        assert!(matches!(
            store.update_number(EntryId::new(9), "1").await.unwrap_err(),
            StoreError::NotFound(_)
        ));
        assert!(!store.remove(EntryId::new(9)).await.unwrap());
        // Nothing is journaled for a no-op.
        assert_eq!(store.offset().unwrap(), before);
    }

    #[tokio::test]
    async fn field_length_limit() {
        let dir = tempfile::tempdir().unwrap();
        let config = JournalConfig {
            max_field_len: Some(5),
            ..JournalConfig::default()
        };
        let store = JournalEntryStore::open(&dir.path().join("entries.journal"), config).unwrap();

        let err = store.insert(NewEntry::new("Ada Lovelace", "1")).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation { field: Field::Name, .. }));

        let ok = store.insert(NewEntry::new("Ada", "12345")).await.unwrap();
        let err = store.update_number(ok.id, "123456").await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation { field: Field::Number, .. }));
    }

    #[tokio::test]
    async fn crc_mismatch_skips_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.journal");
        {
            let store = open(&path);
            store.insert(NewEntry::new("a", "1")).await.unwrap();
            store.insert(NewEntry::new("b", "2")).await.unwrap();
        }

        // Flip the first payload byte of the first record.
        {
            let mut file = OpenOptions::new().read(true).write(true).open(&path).unwrap();
            file.seek(SeekFrom::Start(HEADER_SIZE as u64)).unwrap();
            let mut buf = [0u8; 1];
            file.read_exact(&mut buf).unwrap();
            buf[0] ^= 0xFF;
            file.seek(SeekFrom::Start(HEADER_SIZE as u64)).unwrap();
            file.write_all(&buf).unwrap();
            file.sync_all().unwrap();
        }

        let store = open(&path);
        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "b");
    }

    #[tokio::test]
    async fn torn_tail_is_discarded_and_appends_continue() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.journal");
        let total = {
            let store = open(&path);
            store.insert(NewEntry::new("a", "1")).await.unwrap();
            store.insert(NewEntry::new("b", "2")).await.unwrap();
            store.offset().unwrap()
        };
        {
            let file = OpenOptions::new().write(true).open(&path).unwrap();
            file.set_len(total - 3).unwrap();
        }

        {
            let store = open(&path);
            assert_eq!(store.count().await.unwrap(), 1);
            store.insert(NewEntry::new("c", "3")).await.unwrap();
        }

        let store = open(&path);
        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn sync_every_write_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = JournalConfig {
            sync_mode: SyncMode::EveryWrite,
            ..JournalConfig::default()
        };
        let store = JournalEntryStore::open(&dir.path().join("sync.journal"), config).unwrap();
        store.insert(NewEntry::new("a", "1")).await.unwrap();
        assert!(store.offset().unwrap() > HEADER_SIZE as u64);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("entries.journal");
        let store = open(&path);
        assert_eq!(store.path(), path.as_path());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn failed_append_leaves_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.journal");
        let fail_next = Arc::new(AtomicBool::new(false));
        {
            let flag = Arc::clone(&fail_next);
            let store = JournalEntryStore::open_with(&path, JournalConfig::default(), move |file| -> Box<dyn JournalFile> {
                Box::new(FailingFile { inner: file, fail_next: flag })
            })
            .unwrap();

            store.insert(NewEntry::new("a", "1")).await.unwrap();
            let committed = store.offset().unwrap();

            fail_next.store(true, Ordering::SeqCst);
            let err = store.insert(NewEntry::new("b", "2")).await.unwrap_err();
            assert!(matches!(err, StoreError::Io(_)));
            assert_eq!(store.offset().unwrap(), committed);
            assert_eq!(fs::metadata(&path).unwrap().len(), committed);
            assert!(store.find_by_name("b").await.unwrap().is_none());

            let c = store.insert(NewEntry::new("c", "3")).await.unwrap();
            assert_eq!(c.id, EntryId::new(2));
        }

        let store = open(&path);
        assert_eq!(
            store.list().await.unwrap(),
            vec![
                Entry::new(EntryId::new(1), "a", "1"),
                Entry::new(EntryId::new(2), "c", "3"),
            ]
        );
        assert!(store.find_by_name("b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn damaged_header_mid_file_refuses_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.journal");
        let second_record = {
            let store = open(&path);
            store.insert(NewEntry::new("a", "1")).await.unwrap();
            let second_record = store.offset().unwrap();
            store.insert(NewEntry::new("b", "2")).await.unwrap();
            store.insert(NewEntry::new("c", "3")).await.unwrap();
            second_record
        };
        let len_before = fs::metadata(&path).unwrap().len();

        // Top byte of the second record's length: it now runs past EOF.
        overwrite_byte(&path, second_record + 3, 0x7f);

        let err = JournalEntryStore::open(&path, JournalConfig::default()).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)), "{err}");
        assert_eq!(fs::metadata(&path).unwrap().len(), len_before);
    }

    #[tokio::test]
    async fn skipped_record_id_is_not_reissued() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.journal");
        let second_record = {
            let store = open(&path);
            store.insert(NewEntry::new("a", "1")).await.unwrap();
            let second_record = store.offset().unwrap();
            let b = store.insert(NewEntry::new("b", "2")).await.unwrap();
            assert_eq!(b.id, EntryId::new(2));
            second_record
        };

        // Last payload byte of the record holding the highest id.
        let end = fs::metadata(&path).unwrap().len();
        assert!(end > second_record + HEADER_SIZE as u64);
        overwrite_byte(&path, end - 1, b'#');

        let store = open(&path);
        assert_eq!(store.count().await.unwrap(), 1);
        let c = store.insert(NewEntry::new("c", "3")).await.unwrap();
        assert_eq!(c.id, EntryId::new(3));
    }
}
