//! Snapshot routes
//!
//! - `POST /save`: multipart ingest; responds with the retrieval link
//! - `GET /d/:key`: fetch the stored segments, hex-rendered

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::snapshot::{IngestError, RetrieveError};
use crate::state::AppState;

/// Uploads are three console memory images; 8 MiB covers every variant.
const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

// ============================================================================
// Error Responses
// ============================================================================

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            IngestError::MalformedMultipart(_) => (StatusCode::BAD_REQUEST, "MALFORMED_MULTIPART"),
            IngestError::UnknownSegment(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_SEGMENT"),
            IngestError::MissingRequiredSegment(_) => {
                (StatusCode::BAD_REQUEST, "MISSING_REQUIRED_SEGMENT")
            }
            IngestError::UpstreamIo(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_IO"),
            IngestError::StoreWrite(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_WRITE"),
        };

        // Server-side faults are logged in full but not echoed to the caller.
        let message = if status.is_server_error() {
            tracing::error!(code, error = %self, "save failed");
            "internal error".to_string()
        } else {
            tracing::warn!(code, error = %self, "save rejected");
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message, code })).into_response()
    }
}

impl IntoResponse for RetrieveError {
    fn into_response(self) -> Response {
        tracing::error!(code = "STORE_READ", error = %self, "fetch failed");

        let body = Json(ErrorResponse {
            error: "internal error".to_string(),
            code: "STORE_READ",
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// ============================================================================
// Router
// ============================================================================

/// Create the snapshot router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save", post(save_snapshot))
        .route("/d/:key", get(fetch_snapshot))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Serialize)]
struct SaveResponse {
    key: String,
    location: String,
}

/// POST /save
///
/// Ingest a multipart snapshot and answer with the retrieval link. The
/// `HX-Location` header carries the same link for htmx-driven clients.
async fn save_snapshot(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, IngestError> {
    let key = state.ingest().ingest(multipart).await?;
    let location = format!("/d/{key}");

    Ok((
        StatusCode::CREATED,
        [
            ("location", location.clone()),
            ("hx-location", location.clone()),
        ],
        Json(SaveResponse { key, location }),
    )
        .into_response())
}

/// Hex rendering keeps absent and empty fields distinct: an absent segment
/// serializes as `null`, a present-but-empty one as `""`.
#[derive(Serialize)]
struct SnapshotResponse {
    key: String,
    header: Option<String>,
    wram: Option<String>,
    sram: Option<String>,
}

#[derive(Serialize)]
struct NotFoundResponse {
    error: String,
    code: &'static str,
    key: String,
}

/// GET /d/:key
///
/// Fetch the segments stored under a key. Absence is a 404, not a failure.
async fn fetch_snapshot(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, RetrieveError> {
    let Some(set) = state.retrieval().retrieve(&key).await? else {
        tracing::debug!(key = %key, "snapshot not found");
        let body = Json(NotFoundResponse {
            error: format!("no snapshot stored under '{key}'"),
            code: "NOT_FOUND",
            key,
        });
        return Ok((StatusCode::NOT_FOUND, body).into_response());
    };

    let body = SnapshotResponse {
        key,
        header: set.header.as_deref().map(hex::encode),
        wram: set.wram.as_deref().map(hex::encode),
        sram: set.sram.as_deref().map(hex::encode),
    };
    Ok(Json(body).into_response())
}

// ============================================================================
// Tests
// ============================================================================
