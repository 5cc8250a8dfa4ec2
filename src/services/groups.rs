// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Group creation, administration and membership.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Group, GroupId, GroupMember, GroupMembership, GroupRole, ProfileId};

const DEFAULT_ICON: &str = "🎾";

/// Most public groups returned by one listing.
pub const PUBLIC_GROUP_LIMIT: u32 = 100;

fn default_public() -> bool {
    true
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

/// Body of `POST /api/groups`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 60))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 16))]
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

/// Body of `PATCH /api/groups/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 60))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 16))]
    pub icon: Option<String>,
    pub is_public: Option<bool>,
}

/// Build a new group and the creator's admin membership.
pub fn new_group(
    creator: ProfileId,
    req: CreateGroupRequest,
    now: DateTime<Utc>,
) -> Result<(Group, GroupMember)> {
    req.validate()?;

    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Group name is required".to_string()));
    }

    let group = Group {
        id: Uuid::new_v4(),
        name,
        description: req.description.filter(|d| !d.trim().is_empty()),
        icon: req.icon,
        is_public: req.is_public,
        created_by: creator,
        created_at: now,
        updated_at: now,
    };
    let admin = GroupMember {
        group_id: group.id,
        user_id: creator,
        role: GroupRole::Admin,
        joined_at: now,
    };
    Ok((group, admin))
}

/// Apply an update request to a group.
pub fn apply_update(group: &mut Group, req: UpdateGroupRequest, now: DateTime<Utc>) -> Result<()> {
    req.validate()?;

    if let Some(name) = req.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Group name is required".to_string()));
        }
        group.name = name;
    }
    if let Some(description) = req.description {
        group.description = Some(description).filter(|d| !d.trim().is_empty());
    }
    if let Some(icon) = req.icon {
        group.icon = icon;
    }
    if let Some(is_public) = req.is_public {
        group.is_public = is_public;
    }
    group.updated_at = now;
    Ok(())
}

/// Body of `PATCH /api/groups/{id}/members/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: GroupRole,
}

/// Check that `target` may be given `role`.
///
/// The target has to be a member, and a group never loses its last admin.
pub fn check_role_change(
    members: &[GroupMember],
    target: ProfileId,
    role: GroupRole,
) -> Result<()> {
    if !members.iter().any(|m| m.user_id == target) {
        return Err(AppError::NotFound("Not a member of this group".to_string()));
    }
    if role != GroupRole::Admin && is_last_admin(members, target) {
        return Err(AppError::BadRequest(
            "A group needs at least one admin".to_string(),
        ));
    }
    Ok(())
}

/// True if `user` is the only admin among `members`.
pub fn is_last_admin(members: &[GroupMember], user: ProfileId) -> bool {
    let mut admins = members.iter().filter(|m| m.is_admin());
    matches!(
        (admins.next(), admins.next()),
        (Some(only), None) if only.user_id == user
    )
}

/// Group operations against Firestore.
pub struct GroupService<'a> {
    db: &'a FirestoreDb,
}

impl<'a> GroupService<'a> {
    pub fn new(db: &'a FirestoreDb) -> Self {
        Self { db }
    }

    async fn load(&self, id: GroupId) -> Result<Group> {
        self.db
            .get_group(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", id)))
    }

    async fn require_admin(&self, id: GroupId, user: ProfileId) -> Result<()> {
        match self.db.get_member(id, user).await? {
            Some(member) if member.is_admin() => Ok(()),
            _ => Err(AppError::Forbidden(
                "Only group admins can do that".to_string(),
            )),
        }
    }

    /// Create a group; the creator becomes its admin.
    pub async fn create(&self, creator: ProfileId, req: CreateGroupRequest) -> Result<Group> {
        let (group, admin) = new_group(creator, req, Utc::now())?;
        self.db.create_group_with_admin(&group, &admin).await?;
        Ok(group)
    }

    /// Update group details (admins only).
    pub async fn update(
        &self,
        requester: ProfileId,
        id: GroupId,
        req: UpdateGroupRequest,
    ) -> Result<Group> {
        let mut group = self.load(id).await?;
        self.require_admin(id, requester).await?;

        apply_update(&mut group, req, Utc::now())?;
        self.db.set_group(&group).await?;

        tracing::info!(group_id = %id, by = %requester, "Group updated");
        Ok(group)
    }

    /// Delete a group and its memberships (admins only).
    pub async fn delete(&self, requester: ProfileId, id: GroupId) -> Result<()> {
        self.load(id).await?;
        self.require_admin(id, requester).await?;
        self.db.delete_group(id).await?;
        Ok(())
    }

    /// Join a public group as a regular member.
    pub async fn join(&self, user: ProfileId, id: GroupId) -> Result<GroupMember> {
        let group = self.load(id).await?;
        if !group.is_public {
            return Err(AppError::Forbidden("This group is private".to_string()));
        }
        if self.db.get_member(id, user).await?.is_some() {
            return Err(AppError::Conflict("Already a member".to_string()));
        }

        let member = GroupMember {
            group_id: id,
            user_id: user,
            role: GroupRole::Member,
            joined_at: Utc::now(),
        };
        self.db.set_member(&member).await?;

        tracing::info!(group_id = %id, user = %user, "Joined group");
        Ok(member)
    }

    /// Leave a group. The last admin has to delete the group instead.
    pub async fn leave(&self, user: ProfileId, id: GroupId) -> Result<()> {
        if self.db.get_member(id, user).await?.is_none() {
            return Err(AppError::NotFound("Not a member of this group".to_string()));
        }

        let members = self.db.list_members(id).await?;
        if is_last_admin(&members, user) {
            return Err(AppError::BadRequest(
                "The last admin cannot leave; delete the group instead".to_string(),
            ));
        }

        self.db.delete_member(id, user).await?;
        tracing::info!(group_id = %id, user = %user, "Left group");
        Ok(())
    }

    /// Public groups anyone can browse and join.
    pub async fn list_public(&self) -> Result<Vec<Group>> {
        self.db.list_public_groups(PUBLIC_GROUP_LIMIT).await
    }

    /// Groups `user` belongs to, with their role in each.
    pub async fn memberships(&self, user: ProfileId) -> Result<Vec<GroupMembership>> {
        let rows = self.db.list_memberships(user).await?;
        let ids: Vec<GroupId> = rows.iter().map(|m| m.group_id).collect();
        let mut groups = self.db.get_groups(&ids).await?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                groups.remove(&m.group_id).map(|group| GroupMembership {
                    group,
                    role: m.role,
                    joined_at: m.joined_at,
                })
            })
            .collect())
    }

    /// Give a member a new role (admins only).
    pub async fn set_role(
        &self,
        requester: ProfileId,
        id: GroupId,
        target: ProfileId,
        role: GroupRole,
    ) -> Result<GroupMember> {
        self.load(id).await?;
        self.require_admin(id, requester).await?;

        let members = self.db.list_members(id).await?;
        check_role_change(&members, target, role)?;

        let mut member = members
            .into_iter()
            .find(|m| m.user_id == target)
            .ok_or_else(|| AppError::NotFound("Not a member of this group".to_string()))?;
        member.role = role;
        self.db.set_member(&member).await?;

        tracing::info!(group_id = %id, user = %target, role = ?role, by = %requester, "Member role changed");
        Ok(member)
    }

    /// Members of a group, visible to anyone for public groups and to
    /// members otherwise.
    pub async fn members(&self, requester: ProfileId, id: GroupId) -> Result<Vec<GroupMember>> {
        let group = self.load(id).await?;
        let members = self.db.list_members(id).await?;

        if !group.is_public && !members.iter().any(|m| m.user_id == requester) {
            return Err(AppError::Forbidden("This group is private".to_string()));
        }
        Ok(members)
    }
}
