// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Self-service profile editing.
//!
//! A profile document is created the first time its owner saves it; the
//! auth provider only hands us an id.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Profile, ProfileId, SkillLevel};

/// Body of `PUT /api/me`. Absent fields are left unchanged; an empty string
/// clears an optional text field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 30))]
    pub username: Option<String>,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    pub skill_level: Option<SkillLevel>,
}

/// Usernames are stored lowercased so uniqueness ignores case.
pub fn normalize_username(raw: &str) -> Result<String> {
    let username = raw.trim().to_lowercase();
    if username.len() < 3
        || !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::BadRequest(
            "Usernames are 3-30 letters, digits or underscores".to_string(),
        ));
    }
    Ok(username)
}

/// A blank profile for a player who has not saved one yet.
pub fn new_profile(id: ProfileId, now: DateTime<Utc>) -> Profile {
    Profile {
        id,
        username: None,
        full_name: None,
        avatar_url: None,
        bio: None,
        location: None,
        skill_level: None,
        created_at: now,
        updated_at: now,
    }
}

fn cleared(value: String) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

/// Apply an edit to `profile`. The username, if given, must already be
/// normalized and checked for uniqueness.
pub fn apply_profile_update(
    profile: &mut Profile,
    req: UpdateProfileRequest,
    now: DateTime<Utc>,
) -> Result<()> {
    req.validate()?;

    if let Some(username) = req.username {
        profile.username = Some(normalize_username(&username)?);
    }
    if let Some(full_name) = req.full_name {
        profile.full_name = cleared(full_name);
    }
    if let Some(avatar_url) = req.avatar_url {
        profile.avatar_url = cleared(avatar_url);
    }
    if let Some(bio) = req.bio {
        profile.bio = cleared(bio);
    }
    if let Some(location) = req.location {
        profile.location = cleared(location);
    }
    if let Some(skill_level) = req.skill_level {
        profile.skill_level = Some(skill_level);
    }
    profile.updated_at = now;
    Ok(())
}

/// Profile writes against Firestore.
pub struct AccountService<'a> {
    db: &'a FirestoreDb,
}

impl<'a> AccountService<'a> {
    pub fn new(db: &'a FirestoreDb) -> Self {
        Self { db }
    }

    /// Create or edit the caller's own profile.
    pub async fn save_profile(
        &self,
        owner: ProfileId,
        req: UpdateProfileRequest,
    ) -> Result<Profile> {
        req.validate()?;
        let username = req.username.as_deref().map(normalize_username).transpose()?;
        let now = Utc::now();

        let existing = self.db.get_profile(owner).await?;
        let created = existing.is_none();
        let mut profile = existing.unwrap_or_else(|| new_profile(owner, now));

        if let Some(username) = username {
            if let Some(holder) = self.db.find_profile_by_username(&username).await? {
                if holder.id != owner {
                    return Err(AppError::Conflict("Username is already taken".to_string()));
                }
            }
        }

        apply_profile_update(&mut profile, req, now)?;
        self.db.upsert_profile(&profile).await?;

        tracing::info!(profile_id = %owner, created, "Profile saved");
        Ok(profile)
    }
}
