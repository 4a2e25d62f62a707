use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use phonebook_store::{
    EntryStore, InMemoryEntryStore, JournalConfig, JournalEntryStore, SyncMode, DEFAULT_ID_SPACE,
};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Which entry store the server runs on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Volatile store with random ids and unique names; contents are lost
    /// on shutdown.
    #[default]
    Memory,
    /// Journal file on disk with store-assigned ids and unique names.
    Journal,
}

/// Server configuration, loadable from TOML. Missing keys take defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    /// Journal file, used by the `journal` backend.
    pub journal_path: PathBuf,
    /// Exclusive upper bound of random ids, used by the `memory` backend.
    pub id_space: u64,
    /// `fsync` the journal after every record.
    pub sync_every_write: bool,
    /// Maximum length of `name` and `number` enforced by the journal store.
    pub max_field_len: Option<usize>,
    /// Insert the sample entries at startup if the store is empty.
    pub seed_sample_entries: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 3001)),
            backend: StoreBackend::Memory,
            journal_path: PathBuf::from("phonebook.journal"),
            id_space: DEFAULT_ID_SPACE,
            sync_every_write: false,
            max_field_len: None,
            seed_sample_entries: false,
        }
    }
}

impl ServerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Open the configured entry store.
    pub fn open_store(&self) -> ServerResult<Arc<dyn EntryStore>> {
        let store: Arc<dyn EntryStore> = match self.backend {
            StoreBackend::Memory => {
                Arc::new(InMemoryEntryStore::with_id_space(self.id_space).with_unique_names())
            }
            StoreBackend::Journal => {
                let config = JournalConfig {
                    sync_mode: if self.sync_every_write {
                        SyncMode::EveryWrite
                    } else {
                        SyncMode::OsDefault
                    },
                    max_field_len: self.max_field_len,
                };
                Arc::new(JournalEntryStore::open(&self.journal_path, config)?)
            }
        };
        Ok(store)
    }
}
