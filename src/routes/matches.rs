// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Match recording and editing routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Match, MatchId};
use crate::services::matches::CreateMatchRequest;
use crate::services::MatchService;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
    Extension, Json, Router,
};
use std::sync::Arc;

/// Match routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/matches", post(create_match))
        .route("/api/matches/{id}", put(update_match).delete(delete_match))
}

/// Record a match for the caller.
async fn create_match(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<Match>)> {
    let record = MatchService::new(&state.db)
        .create(user.profile_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Edit a match the caller recorded. The sets in the body replace the
/// stored ones.
async fn update_match(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<MatchId>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<Json<Match>> {
    let record = MatchService::new(&state.db)
        .update(user.profile_id, id, req)
        .await?;
    Ok(Json(record))
}

/// Delete a match the caller recorded.
async fn delete_match(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<MatchId>,
) -> Result<StatusCode> {
    MatchService::new(&state.db)
        .delete(user.profile_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
