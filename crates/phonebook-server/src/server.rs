use phonebook_service::{DirectoryError, DirectoryService};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Entries loaded by `seed_sample_entries`.
pub const SAMPLE_ENTRIES: [(&str, &str); 4] = [
    ("Arto Hellas", "040-123456"),
    ("Ada Lovelace", "39-44-5323523"),
    ("Dan Abramov", "12-43-234345"),
    ("Mary Poppendieck", "39-23-6423122"),
];

/// Phonebook HTTP server.
pub struct PhonebookServer {
    config: ServerConfig,
}

impl PhonebookServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the configured store and wrap it in a directory service,
    /// seeding it first if configured to.
    pub async fn directory(&self) -> ServerResult<DirectoryService> {
        let store = self.config.open_store()?;
        let directory = DirectoryService::new(store);
        if self.config.seed_sample_entries {
            seed_sample_entries(&directory).await?;
        }
        Ok(directory)
    }

    /// Build the router over a freshly opened store (useful for testing).
    pub async fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(AppState::new(self.directory().await?)))
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let directory = self.directory().await?;
        info!(
            backend = directory.store().name(),
            uniqueness = ?directory.uniqueness(),
            entries = directory.count().await?,
            "directory ready"
        );

        let app = build_router(AppState::new(directory));
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!("Phonebook server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

/// Insert [`SAMPLE_ENTRIES`] into an empty directory. A non-empty directory
/// is left untouched.
pub async fn seed_sample_entries(directory: &DirectoryService) -> ServerResult<usize> {
    if directory.count().await? > 0 {
        return Ok(0);
    }
    let mut added = 0;
    for (name, number) in SAMPLE_ENTRIES {
        match directory.add_entry(Some(name), Some(number)).await {
            Ok(_) => added += 1,
            Err(DirectoryError::DuplicateName(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    info!(added, "seeded sample entries");
    Ok(added)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
