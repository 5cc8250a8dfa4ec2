// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

use std::future::Future;

use crate::error::AppError;
use crate::models::{LinkedMatch, Profile, ProfileId};

/// Collection names as constants.
pub mod collections {
    pub const PROFILES: &str = "profiles";
    /// Match documents with their sets embedded
    pub const MATCHES: &str = "matches";
    pub const GROUPS: &str = "groups";
    /// Membership rows keyed by `{group_id}_{user_id}`
    pub const GROUP_MEMBERS: &str = "group_members";
}

/// Read interface the statistics pipeline needs from the store.
pub trait MatchSource: Send + Sync {
    /// Look up a single profile.
    fn fetch_profile(
        &self,
        id: ProfileId,
    ) -> impl Future<Output = Result<Option<Profile>, AppError>> + Send;

    /// Every match `id` appears in, with slot profiles resolved, most recent
    /// first. Private matches are left out unless `include_private` is set.
    fn fetch_matches_for_profile(
        &self,
        id: ProfileId,
        include_private: bool,
    ) -> impl Future<Output = Result<Vec<LinkedMatch>, AppError>> + Send;
}
