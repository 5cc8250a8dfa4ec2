// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for profiles and statistics.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    FrequentPlayer, HeadToHead, LinkedMatch, MatchId, MatchResult, MatchSet, MatchType, Profile,
    ProfileId, Stats,
};
use crate::services::account::UpdateProfileRequest;
use crate::services::{AccountService, ProfileService, ProfileSnapshot};
use crate::stats::{participants, score_line, viewer_sets, AnnotatedMatch, Side};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).put(update_me))
        .route("/api/profiles/{id}", get(get_profile))
        .route(
            "/api/profiles/{id}/head-to-head/{other_id}",
            get(get_head_to_head),
        )
}

// ─── Current User ────────────────────────────────────────────

/// Get the caller's own profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Profile>> {
    let profile = state.db.get_profile(user.profile_id).await?.ok_or_else(|| {
        AppError::NotFound(format!("Profile {} not found", user.profile_id))
    })?;
    Ok(Json(profile))
}

/// Create or edit the caller's own profile.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>> {
    let profile = AccountService::new(&state.db)
        .save_profile(user.profile_id, req)
        .await?;
    Ok(Json(profile))
}

// ─── Profile Page ────────────────────────────────────────────

/// One match as listed on a profile, oriented for the profile's owner.
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MatchSummary {
    pub id: MatchId,
    pub match_type: MatchType,
    pub played_at: NaiveDate,
    pub location: Option<String>,
    pub is_public: bool,
    /// Result for the profile being viewed
    pub result: Option<MatchResult>,
    /// Sets from the profile owner's side of the net
    pub sets: Vec<MatchSet>,
    pub score_line: String,
    pub partners: Vec<String>,
    pub opponents: Vec<String>,
    /// Whether the caller recorded this match (and may delete it)
    pub can_delete: bool,
}

impl MatchSummary {
    fn from_annotated(m: &AnnotatedMatch<'_>, owner: ProfileId, requester: ProfileId) -> Self {
        let record = m.record();
        let side = m.perspective.side;
        let sets = viewer_sets(&record.sets, side);

        let partners = participants(m.linked, side)
            .into_iter()
            .filter(|p| p.profile_id != Some(owner))
            .map(|p| p.display_name())
            .collect();
        let opponents = participants(m.linked, side.opposite())
            .into_iter()
            .map(|p| p.display_name())
            .collect();

        Self {
            id: record.id,
            match_type: record.match_type,
            played_at: record.played_at,
            location: record.location.clone(),
            is_public: record.is_public,
            result: m.result,
            score_line: score_line(&sets),
            sets,
            partners,
            opponents,
            can_delete: record.creator_id == requester,
        }
    }
}

/// Profile page response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub stats: Stats,
    pub frequent_opponents: Vec<FrequentPlayer>,
    pub frequent_partners: Vec<FrequentPlayer>,
    /// Most recent first
    pub matches: Vec<MatchSummary>,
}

impl ProfileResponse {
    fn from_snapshot(snapshot: ProfileSnapshot, requester: ProfileId) -> Self {
        let owner = snapshot.profile.id;
        let matches = snapshot
            .matches
            .iter()
            .map(|m: &LinkedMatch| AnnotatedMatch::new(m, owner))
            .filter(|m| m.perspective.side != Side::None)
            .map(|m| MatchSummary::from_annotated(&m, owner, requester))
            .collect();

        Self {
            profile: snapshot.profile,
            stats: snapshot.report.stats,
            frequent_opponents: snapshot.report.frequent_opponents,
            frequent_partners: snapshot.report.frequent_partners,
            matches,
        }
    }
}

/// Get a profile with its statistics and match list.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<ProfileId>,
) -> Result<Json<ProfileResponse>> {
    tracing::debug!(profile_id = %id, requester = %user.profile_id, "Fetching profile stats");

    let snapshot = ProfileService::new(&state.db)
        .load_snapshot(id, user.profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))?;

    Ok(Json(ProfileResponse::from_snapshot(
        snapshot,
        user.profile_id,
    )))
}

// ─── Head to Head ────────────────────────────────────────────

/// Head-to-head response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HeadToHeadResponse {
    pub player_a: ProfileId,
    pub player_b: ProfileId,
    #[serde(flatten)]
    pub record: HeadToHead,
}

/// Get the record between two players.
async fn get_head_to_head(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((id, other_id)): Path<(ProfileId, ProfileId)>,
) -> Result<Json<HeadToHeadResponse>> {
    let record = ProfileService::new(&state.db)
        .head_to_head(id, other_id, user.profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(HeadToHeadResponse {
        player_a: id,
        player_b: other_id,
        record,
    }))
}
