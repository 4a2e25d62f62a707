use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use phonebook_service::{DirectoryInfo, DirectoryService};
use phonebook_types::Entry;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub directory: DirectoryService,
}

impl AppState {
    pub fn new(directory: DirectoryService) -> Self {
        Self { directory }
    }
}

/// Body of add and update requests. Both fields are optional on the wire so
/// that their absence is reported by the directory, not by the decoder.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryRequest {
    pub name: Option<String>,
    pub number: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

fn decode(payload: Result<Json<EntryRequest>, JsonRejection>) -> Result<EntryRequest, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))
}

/// Render the summary page.
pub fn render_info(info: &DirectoryInfo) -> String {
    format!(
        "<div><p>Phonebook has info for {} people</p><p>{}</p></div>",
        info.count,
        info.generated_at.format("%a %b %d %Y %H:%M:%S GMT%z")
    )
}

pub async fn root_handler() -> Html<&'static str> {
    Html("<h1>Phonebook</h1>")
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

#[instrument(skip(state))]
pub async fn info_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let info = state.directory.info().await?;
    Ok(Html(render_info(&info)))
}

#[instrument(skip(state))]
pub async fn list_entries_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    Ok(Json(state.directory.list_entries().await?))
}

#[instrument(skip(state))]
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Entry>, ApiError> {
    Ok(Json(state.directory.get_entry(&id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let body = decode(payload)?;
    info!(name = ?body.name, number = ?body.number, "add entry request");
    let entry = state
        .directory
        .add_entry(body.name.as_deref(), body.number.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state, payload))]
pub async fn update_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> Result<Json<Entry>, ApiError> {
    let body = decode(payload)?;
    let entry = state
        .directory
        .update_entry(&id, body.number.as_deref())
        .await?;
    Ok(Json(entry))
}

/// Deletes are idempotent: an absent id still answers 204.
#[instrument(skip(state))]
pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.directory.delete_entry(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn info_page_format() {
        let info = DirectoryInfo {
            count: 3,
            generated_at: Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap(),
        };
        let html = render_info(&info);
        assert!(html.starts_with("<div><p>Phonebook has info for 3 people</p><p>Mon Oct 19 2026 09:30:00 GMT"));
        assert!(html.ends_with("</p></div>"));
    }

    #[test]
    fn entry_request_fields_are_optional() {
        let body: EntryRequest = serde_json::from_str(r#"{"name": "Ada Lovelace"}"#).unwrap();
        assert_eq!(body.name.as_deref(), Some("Ada Lovelace"));
        assert!(body.number.is_none());

        let body: EntryRequest = serde_json::from_str("{}").unwrap();
        assert!(body.name.is_none());
    }
}
