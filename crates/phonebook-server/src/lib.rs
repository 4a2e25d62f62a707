//! HTTP server for the phonebook directory.
//!
//! A thin adapter over [`DirectoryService`](phonebook_service::DirectoryService):
//! decodes JSON requests, calls the directory, and maps its errors to
//! status codes with `{"error": "..."}` bodies.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{ServerConfig, StoreBackend};
pub use error::{ApiError, ErrorBody, ServerError, ServerResult};
pub use handler::{AppState, EntryRequest};
pub use router::build_router;
pub use server::{seed_sample_entries, PhonebookServer, SAMPLE_ENTRIES};
