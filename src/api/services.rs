use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tracing::info;

use super::{
    models::{
        CreateSnippetRequest, HealthResponse, LatestParams, SnippetCreatedResponse,
        SnippetResponse, SnippetSummary,
    },
    state::AppState,
    utils,
};
use crate::api::error::ApiError;
use crate::engine::SnippetError;

/// Snippet ingestion endpoint (POST /api/snippets)
///
/// Accepts a JSON body (optionally gzip-compressed; the decompression
/// middleware has already run) with the content and the two optional
/// budgets. Budgets arrive as signed integers so negative values fail
/// with `INVALID_BUDGET` instead of a generic decode error. Responds
/// 201 with the fresh id; nothing is persisted on any failure path.
pub async fn create_snippet(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Body,
) -> Result<impl IntoResponse, ApiError> {
    utils::ensure_json(&headers)?;

    let max_bytes = state.config.server.api.max_payload_bytes.as_usize();
    let body_bytes = utils::read_body_limited(body, max_bytes).await?;

    let request: CreateSnippetRequest = serde_json::from_slice(&body_bytes)?;

    let snippet = state.service.create(
        &request.content,
        request.time_budget_seconds,
        request.view_budget,
    )?;

    state.metrics.snippet_created();

    Ok((
        StatusCode::CREATED,
        Json(SnippetCreatedResponse { id: snippet.id }),
    ))
}

/// Snippet read endpoint (GET /api/snippets/{id})
///
/// Restricted snippets pass through the expiration engine, which may
/// consume a view and may evict; absent, expired, and exhausted are all
/// reported as the same 404.
pub async fn get_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    match state.service.get(&id) {
        Ok(grant) => {
            state.metrics.snippet_served();
            Ok((StatusCode::OK, Json(SnippetResponse::from(grant))))
        }
        Err(SnippetError::NotFound) => {
            state.metrics.read_rejected();
            Err(ApiError::NotFound(format!("snippet {id}")))
        }
        Err(other) => Err(other.into()),
    }
}

/// Latest-snippets endpoint (GET /api/snippets/latest?limit=n)
///
/// Only unrestricted snippets are listed, newest first, so this path can
/// never consume a budget or evict anything. The limit defaults from
/// config and is clamped to the configured maximum.
pub async fn list_latest(
    State(state): State<AppState>,
    Query(params): Query<LatestParams>,
) -> Result<impl IntoResponse, ApiError> {
    let limits = &state.config.server.api;
    let limit = params
        .limit
        .unwrap_or(limits.default_latest_limit)
        .min(limits.max_latest_limit);

    let snippets = state.service.latest(limit)?;
    info!(count = snippets.len(), limit, "served latest snippets");

    let summaries: Vec<SnippetSummary> = snippets.into_iter().map(SnippetSummary::from).collect();
    Ok((StatusCode::OK, Json(summaries)))
}

/// Health check endpoint (GET /health)
///
/// Returns 200 with a component map; in this build, being able to
/// respond means both the API and the embedded store are up.
pub async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    use std::collections::HashMap;

    let mut components = HashMap::new();
    components.insert("api".to_string(), "healthy".to_string());
    components.insert("store".to_string(), "healthy".to_string());

    let response = HealthResponse {
        status: "healthy".to_string(),
        components,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
