// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Profiles
//! - Matches (sets embedded in the match document)
//! - Groups and group membership rows

use std::collections::HashMap;

use futures_util::{stream, StreamExt};

use crate::db::{collections, MatchSource};
use crate::error::AppError;
use crate::models::{
    Group, GroupId, GroupMember, LinkedMatch, LinkedPlayers, Match, MatchId, Profile, ProfileId,
    ProfileSummary,
};
use crate::stats::sort_most_recent_first;

const MAX_CONCURRENT_DB_OPS: usize = 50;
// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a profile by ID.
    pub async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(&id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a profile.
    pub async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PROFILES)
            .document_id(profile.id.to_string())
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Find the profile holding a (normalized) username.
    pub async fn find_profile_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Profile>, AppError> {
        let username = username.to_string();
        let profiles: Vec<Profile> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::PROFILES)
            .filter(move |q| q.for_all([q.field("username").eq(username.clone())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(profiles.into_iter().next())
    }

    /// Resolve several profiles at once. Missing profiles are left out.
    pub async fn get_profile_summaries(
        &self,
        ids: &[ProfileId],
    ) -> Result<HashMap<ProfileId, ProfileSummary>, AppError> {
        let profiles = stream::iter(ids.to_vec())
            .map(|id| async move { self.get_profile(id).await })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Option<Profile>, AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<Option<Profile>>, AppError>>()?;

        Ok(profiles
            .into_iter()
            .flatten()
            .map(|p| (p.id, p.summary()))
            .collect())
    }

    // ─── Match Operations ────────────────────────────────────────

    /// Get a match by ID.
    pub async fn get_match(&self, id: MatchId) -> Result<Option<Match>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::MATCHES)
            .obj()
            .one(&id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a match, replacing any existing document (and its sets).
    pub async fn set_match(&self, m: &Match) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::MATCHES)
            .document_id(m.id.to_string())
            .object(m)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a match document.
    pub async fn delete_match(&self, id: MatchId) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::MATCHES)
            .document_id(id.to_string())
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Raw match rows a profile appears in, in any slot.
    async fn query_matches_for_profile(
        &self,
        id: ProfileId,
        include_private: bool,
    ) -> Result<Vec<Match>, AppError> {
        let id = id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::MATCHES)
            .filter(move |q| {
                q.for_all([
                    q.field("participant_ids").array_contains(id.clone()),
                    if include_private {
                        None
                    } else {
                        q.field("is_public").eq(true)
                    },
                ])
            })
            .order_by([("played_at", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Group Operations ────────────────────────────────────────

    /// Get a group by ID.
    pub async fn get_group(&self, id: GroupId) -> Result<Option<Group>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::GROUPS)
            .obj()
            .one(&id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store group details.
    pub async fn set_group(&self, group: &Group) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::GROUPS)
            .document_id(group.id.to_string())
            .object(group)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Atomically create a group and its founding admin membership.
    pub async fn create_group_with_admin(
        &self,
        group: &Group,
        admin: &GroupMember,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::GROUPS)
            .document_id(group.id.to_string())
            .object(group)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add group to transaction: {}", e))
            })?;

        client
            .fluent()
            .update()
            .in_col(collections::GROUP_MEMBERS)
            .document_id(GroupMember::document_id(admin.group_id, admin.user_id))
            .object(admin)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add membership to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(group_id = %group.id, admin = %admin.user_id, "Group created");
        Ok(())
    }

    /// Get one membership row.
    pub async fn get_member(
        &self,
        group_id: GroupId,
        user_id: ProfileId,
    ) -> Result<Option<GroupMember>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::GROUP_MEMBERS)
            .obj()
            .one(&GroupMember::document_id(group_id, user_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a membership row (one document per group/user pair).
    pub async fn set_member(&self, member: &GroupMember) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::GROUP_MEMBERS)
            .document_id(GroupMember::document_id(member.group_id, member.user_id))
            .object(member)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Remove a membership row.
    pub async fn delete_member(&self, group_id: GroupId, user_id: ProfileId) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::GROUP_MEMBERS)
            .document_id(GroupMember::document_id(group_id, user_id))
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// All membership rows of a group.
    pub async fn list_members(&self, group_id: GroupId) -> Result<Vec<GroupMember>, AppError> {
        let group_id = group_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::GROUP_MEMBERS)
            .filter(move |q| q.field("group_id").eq(group_id.clone()))
            .order_by([("joined_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Public groups, alphabetically, for browsing.
    pub async fn list_public_groups(&self, limit: u32) -> Result<Vec<Group>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::GROUPS)
            .filter(|q| q.for_all([q.field("is_public").eq(true)]))
            .order_by([("name", firestore::FirestoreQueryDirection::Ascending)])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Every membership row of one user, oldest first.
    pub async fn list_memberships(&self, user_id: ProfileId) -> Result<Vec<GroupMember>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::GROUP_MEMBERS)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .order_by([("joined_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Look up several groups at once. Missing groups are left out.
    pub async fn get_groups(&self, ids: &[GroupId]) -> Result<HashMap<GroupId, Group>, AppError> {
        let groups = stream::iter(ids.to_vec())
            .map(|id| async move { self.get_group(id).await })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Option<Group>, AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<Option<Group>>, AppError>>()?;

        Ok(groups.into_iter().flatten().map(|g| (g.id, g)).collect())
    }

    /// Delete a group and every membership row that belongs to it.
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_group(&self, group_id: GroupId) -> Result<usize, AppError> {
        let members = self.list_members(group_id).await?;
        let count = members.len();

        self.batch_delete(&members, collections::GROUP_MEMBERS, |m: &GroupMember| {
            GroupMember::document_id(m.group_id, m.user_id)
        })
        .await?;
        tracing::debug!(%group_id, count, "Deleted group members");

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::GROUPS)
            .document_id(group_id.to_string())
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(%group_id, deleted = count + 1, "Group deleted");
        Ok(count + 1)
    }

    // ─── Helper Methods ────────────────────────────────────────────

    /// Helper to batch delete documents using transactions.
    async fn batch_delete<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), AppError>
    where
        F: Fn(&T) -> String,
    {
        let client = self.get_client()?;

        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }
}

/// Attach resolved profiles to each match's linked slots.
pub fn link_players(
    matches: Vec<Match>,
    profiles: &HashMap<ProfileId, ProfileSummary>,
) -> Vec<LinkedMatch> {
    let lookup = |id: Option<ProfileId>| id.and_then(|id| profiles.get(&id).cloned());

    matches
        .into_iter()
        .map(|record| LinkedMatch {
            players: LinkedPlayers {
                creator: lookup(Some(record.creator_id)),
                opponent: lookup(record.opponent_id),
                partner: lookup(record.partner_id),
                opponent_partner: lookup(record.opponent_partner_id),
            },
            record,
        })
        .collect()
}

impl MatchSource for FirestoreDb {
    async fn fetch_profile(&self, id: ProfileId) -> Result<Option<Profile>, AppError> {
        self.get_profile(id).await
    }

    async fn fetch_matches_for_profile(
        &self,
        id: ProfileId,
        include_private: bool,
    ) -> Result<Vec<LinkedMatch>, AppError> {
        let matches = self.query_matches_for_profile(id, include_private).await?;

        let mut ids: Vec<ProfileId> = matches.iter().flat_map(Match::linked_profile_ids).collect();
        ids.sort();
        ids.dedup();
        let profiles = self.get_profile_summaries(&ids).await?;

        tracing::debug!(
            profile_id = %id,
            matches = matches.len(),
            profiles = profiles.len(),
            "Fetched matches for profile"
        );

        let mut linked = link_players(matches, &profiles);
        sort_most_recent_first(&mut linked);
        Ok(linked)
    }
}
