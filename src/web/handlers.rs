//! Request handlers for the JSON API
//!
//! Error bodies are `{"error": "<message>"}` with fixed messages; internal
//! error text is logged, never returned.

use std::borrow::Cow;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{filter_by_query, parse_status, AdrDetail, AdrSummary, Status};
use crate::error::{AdrError, ErrorKind};

use super::AppState;

/// Largest accepted PATCH body, in bytes
const MAX_BODY_BYTES: usize = 1024;

/// An error response with a fixed, client-safe message
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: Cow<'static, str>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn not_configured() -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "repository not configured")
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "ADR not found")
    }

    /// A missing collaborator
    fn unsupported(what: &'static str) -> Self {
        Self::from_repo(&AdrError::Unsupported(what), false, "internal error")
    }

    /// Maps a repository failure; anything unexpected becomes a 500 with `fallback`
    fn from_repo(err: &AdrError, invalid_is_client_error: bool, fallback: &'static str) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::not_found(),
            ErrorKind::Unsupported => Self::new(StatusCode::NOT_IMPLEMENTED, err.to_string()),
            ErrorKind::Invalid if invalid_is_client_error => {
                warn!(error = %err, "rejected request");
                Self::bad_request("invalid request")
            }
            _ => {
                error!(error = %err, "{}", fallback);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Runs blocking repository work off the async executor
async fn blocking<T, F>(work: F) -> Result<crate::error::Result<T>, ApiError>
where
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        error!(error = %e, "repository task failed");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    })
}

fn parse_number(raw: &str) -> Result<u32, ApiError> {
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ApiError::bad_request("invalid ADR number")),
    }
}

pub(crate) async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn statuses() -> Json<Vec<&'static str>> {
    Json(Status::all().iter().map(Status::as_str).collect())
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    #[serde(default)]
    q: Option<String>,
}

pub(crate) async fn list_adrs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<AdrSummary>> {
    let repo = state.repo.clone().ok_or_else(ApiError::not_configured)?;

    let records = blocking(move || repo.list())
        .await?
        .map_err(|e| ApiError::from_repo(&e, false, "failed to list ADRs"))?;

    let records = match params.q.as_deref() {
        Some(q) if !q.is_empty() => filter_by_query(records, q),
        _ => records,
    };

    Ok(Json(records.iter().map(AdrSummary::from).collect()))
}

pub(crate) async fn get_adr(State(state): State<AppState>, Path(raw): Path<String>) -> ApiResult<AdrDetail> {
    let repo = state.repo.clone().ok_or_else(ApiError::not_configured)?;
    let number = parse_number(&raw)?;

    let record = blocking(move || repo.get(number))
        .await?
        .map_err(|e| ApiError::from_repo(&e, false, "failed to get ADR"))?;

    Ok(Json(AdrDetail::from(&record)))
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    #[serde(default)]
    status: String,
    #[serde(default, rename = "supersededBy")]
    superseded_by: Option<i64>,
}

pub(crate) async fn update_status(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<AdrDetail> {
    if state.repo.is_none() {
        return Err(ApiError::not_configured());
    }
    let updater = state
        .updater
        .clone()
        .ok_or_else(|| ApiError::unsupported("status updates"))?;

    let number = parse_number(&raw)?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !content_type.starts_with("application/json") {
        return Err(ApiError::bad_request("Content-Type must be application/json"));
    }

    if body.len() > MAX_BODY_BYTES {
        return Err(ApiError::bad_request("invalid request body"));
    }
    let update: StatusUpdate =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request("invalid request body"))?;

    let status = parse_status(&update.status).ok_or_else(|| ApiError::bad_request("invalid status"))?;

    let result = if status == Status::Superseded {
        let superseding = update
            .superseded_by
            .ok_or_else(|| ApiError::bad_request("supersededBy is required when status is Superseded"))?;
        let superseding = u32::try_from(superseding)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ApiError::bad_request("invalid supersededBy"))?;
        let superseder = state
            .superseder
            .clone()
            .ok_or_else(|| ApiError::unsupported("supersede"))?;

        blocking(move || superseder.supersede(number, superseding)).await?
    } else {
        let name = update.status;
        blocking(move || updater.update_status(number, &name)).await?
    };

    let record = result.map_err(|e| ApiError::from_repo(&e, true, "failed to update status"))?;
    Ok(Json(AdrDetail::from(&record)))
}
