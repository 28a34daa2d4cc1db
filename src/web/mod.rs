//! Web API module for Pagesmith.
//!
//! This module provides the persistence API the page editor saves to and
//! loads from. Every `/website` request is scoped to the caller identified
//! by the `x-user-id` header.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /website` - List the caller's pages
//! - `GET /website?id=` - Load one page
//! - `POST /website` - Create a page
//! - `PUT /website` - Replace a page (id in the body)
//! - `DELETE /website?id=` - Delete a page

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Query, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::models::PageDraft;
use crate::services::{FileStore, PageError, PageService, PageStore};

/// Header carrying the session user id.
pub const USER_HEADER: &str = "x-user-id";

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Ownership-checked page access
    pages: PageService,
}

impl AppState {
    /// Creates a new application state over `store`.
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self {
            pages: PageService::new(store),
        }
    }

    /// Creates a state backed by the configured data directory.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = FileStore::open(&config.storage.data_dir)?;
        info!("Data directory: {}", store.root().display());
        Ok(Self::new(Arc::new(store)))
    }

    /// Page service.
    #[must_use]
    pub fn pages(&self) -> &PageService {
        &self.pages
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Query parameters selecting one page.
#[derive(Debug, Deserialize)]
pub struct WebsiteQuery {
    /// Page id.
    pub id: Option<String>,
}

/// Body of `PUT /website`.
#[derive(Debug, Deserialize)]
pub struct UpdateWebsiteRequest {
    /// Page id.
    #[serde(default)]
    pub id: Option<String>,
    /// New document.
    #[serde(flatten)]
    pub draft: PageDraft,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiFailure = (StatusCode, Json<ApiError>);

/// Maps a page service failure onto a status and error body.
fn page_failure(error: PageError) -> ApiFailure {
    match error {
        PageError::MissingId => (StatusCode::BAD_REQUEST, Json(ApiError::new("ID required"))),
        PageError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ApiError::with_details("Website not found", id)),
        ),
        PageError::Forbidden => (StatusCode::FORBIDDEN, Json(ApiError::new("Forbidden"))),
        PageError::Storage(e) => {
            tracing::error!(error = %format!("{e:#}"), "Storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::with_details("Internal Server Error", format!("{e:#}"))),
            )
        }
    }
}

fn bad_body(rejection: &JsonRejection) -> ApiFailure {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::with_details("Invalid request body", rejection.body_text())),
    )
}

// ============================================================================
// Session Identity
// ============================================================================

/// Caller identity taken from the [`USER_HEADER`] header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser(pub String);

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiFailure;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|user| !user.is_empty())
            .map(|user| Self(user.to_string()))
            .ok_or_else(|| (StatusCode::UNAUTHORIZED, Json(ApiError::new("Unauthorized"))))
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /website - List pages, or load one with `?id=`.
async fn get_website(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<WebsiteQuery>,
) -> Result<Response, ApiFailure> {
    match query.id.filter(|id| !id.is_empty()) {
        Some(id) => {
            let record = state.pages.get(&user, &id).map_err(page_failure)?;
            Ok(Json(record).into_response())
        }
        None => {
            let records = state.pages.list(&user).map_err(page_failure)?;
            Ok(Json(records).into_response())
        }
    }
}

/// POST /website - Create a page owned by the caller.
async fn create_website(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    body: Result<Json<PageDraft>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let Json(draft) = body.map_err(|e| bad_body(&e))?;
    let record = state.pages.create(&user, draft).map_err(page_failure)?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

/// PUT /website - Replace a page owned by the caller.
async fn update_website(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    body: Result<Json<UpdateWebsiteRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let Json(request) = body.map_err(|e| bad_body(&e))?;
    let id = request
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| page_failure(PageError::MissingId))?;

    let record = state
        .pages
        .update(&user, &id, request.draft)
        .map_err(page_failure)?;
    Ok(Json(record).into_response())
}

/// DELETE /website?id= - Delete a page owned by the caller.
async fn delete_website(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<WebsiteQuery>,
) -> Result<Json<MessageResponse>, ApiFailure> {
    state
        .pages
        .delete(&user, query.id.as_deref())
        .map_err(page_failure)?;
    Ok(Json(MessageResponse {
        message: "Website deleted successfully".to_string(),
    }))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // The editor frontend is served from a different origin in development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/website",
            get(get_website)
                .post(create_website)
                .put(update_website)
                .delete(delete_website),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the server fails to bind or stops with an error.
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(state);

    info!("Starting Pagesmith web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
