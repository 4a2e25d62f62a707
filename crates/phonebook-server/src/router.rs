use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all phonebook endpoints.
///
/// Unmatched paths, and unsupported methods on known paths, answer
/// `404 {"error": "unknown endpoint"}`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::root_handler).fallback(handler::unknown_endpoint))
        .route("/health", get(handler::health_handler).fallback(handler::unknown_endpoint))
        .route("/info", get(handler::info_handler).fallback(handler::unknown_endpoint))
        .route(
            "/entries",
            get(handler::list_entries_handler)
                .post(handler::create_entry_handler)
                .fallback(handler::unknown_endpoint),
        )
        .route(
            "/entries/:id",
            get(handler::get_entry_handler)
                .put(handler::update_entry_handler)
                .delete(handler::delete_entry_handler)
                .fallback(handler::unknown_endpoint),
        )
        .fallback(handler::unknown_endpoint)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
