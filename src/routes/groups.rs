// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Group and membership routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Group, GroupId, GroupMember, GroupMembership, ProfileId};
use crate::services::groups::{ChangeRoleRequest, CreateGroupRequest, UpdateGroupRequest};
use crate::services::GroupService;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch},
    Extension, Json, Router,
};
use std::sync::Arc;

/// Group routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/groups", get(list_public_groups).post(create_group))
        .route("/api/me/groups", get(my_groups))
        .route("/api/groups/{id}", patch(update_group).delete(delete_group))
        .route("/api/groups/{id}/members", get(list_members).post(join_group))
        .route("/api/groups/{id}/members/me", delete(leave_group))
        .route("/api/groups/{id}/members/{user_id}", patch(change_role))
}

/// Browse public groups.
async fn list_public_groups(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Group>>> {
    let groups = GroupService::new(&state.db).list_public().await?;
    Ok(Json(groups))
}

/// Groups the caller belongs to.
async fn my_groups(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<GroupMembership>>> {
    let groups = GroupService::new(&state.db)
        .memberships(user.profile_id)
        .await?;
    Ok(Json(groups))
}

async fn create_group(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>)> {
    let group = GroupService::new(&state.db)
        .create(user.profile_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(group)))
}

async fn update_group(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<GroupId>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<Json<Group>> {
    let group = GroupService::new(&state.db)
        .update(user.profile_id, id, req)
        .await?;
    Ok(Json(group))
}

async fn delete_group(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<GroupId>,
) -> Result<StatusCode> {
    GroupService::new(&state.db)
        .delete(user.profile_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_members(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<GroupId>,
) -> Result<Json<Vec<GroupMember>>> {
    let members = GroupService::new(&state.db)
        .members(user.profile_id, id)
        .await?;
    Ok(Json(members))
}

/// Join a public group.
async fn join_group(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<GroupId>,
) -> Result<(StatusCode, Json<GroupMember>)> {
    let member = GroupService::new(&state.db)
        .join(user.profile_id, id)
        .await?;
    Ok((StatusCode::CREATED, Json(member)))
}

async fn leave_group(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<GroupId>,
) -> Result<StatusCode> {
    GroupService::new(&state.db)
        .leave(user.profile_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change a member's role (admins only).
async fn change_role(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((id, user_id)): Path<(GroupId, ProfileId)>,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<Json<GroupMember>> {
    let member = GroupService::new(&state.db)
        .set_role(user.profile_id, id, user_id, req.role)
        .await?;
    Ok(Json(member))
}
