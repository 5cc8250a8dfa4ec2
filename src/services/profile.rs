// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile page pipeline.
//!
//! One fetch of the profile and its matches, then one pass through the
//! statistics engine. Nothing is cached between requests on the server.
//!
//! [`ProfileContext`] is for clients of this crate that keep a profile on
//! screen (an app shell or a CLI). The HTTP handlers are stateless and do
//! not use it.

use crate::db::MatchSource;
use crate::error::Result;
use crate::models::{HeadToHead, LinkedMatch, Profile, ProfileId};
use crate::stats::{self, PlayerReport};

/// A profile with its matches and everything computed from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSnapshot {
    pub profile: Profile,
    /// Most recent first
    pub matches: Vec<LinkedMatch>,
    pub report: PlayerReport,
}

/// Loads profile snapshots and head-to-head records from a [`MatchSource`].
pub struct ProfileService<'a, S> {
    source: &'a S,
}

impl<'a, S: MatchSource> ProfileService<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Load `profile_id` as seen by `requester`.
    ///
    /// Returns `Ok(None)` if the profile does not exist. Private matches are
    /// only included when the requester is looking at their own profile.
    pub async fn load_snapshot(
        &self,
        profile_id: ProfileId,
        requester: ProfileId,
    ) -> Result<Option<ProfileSnapshot>> {
        let Some(profile) = self.source.fetch_profile(profile_id).await? else {
            tracing::debug!(%profile_id, "Profile not found");
            return Ok(None);
        };

        let include_private = requester == profile_id;
        let mut matches = self
            .source
            .fetch_matches_for_profile(profile_id, include_private)
            .await?;
        stats::sort_most_recent_first(&mut matches);

        let report = stats::summarize(&matches, profile_id);

        tracing::debug!(
            %profile_id,
            matches = matches.len(),
            total = report.stats.total_matches,
            "Profile stats computed"
        );

        Ok(Some(ProfileSnapshot {
            profile,
            matches,
            report,
        }))
    }

    /// Record between `a` and `b` as seen by `requester`.
    ///
    /// Returns `Ok(None)` if either profile does not exist. When the
    /// requester is one of the two players, their private matches count.
    pub async fn head_to_head(
        &self,
        a: ProfileId,
        b: ProfileId,
        requester: ProfileId,
    ) -> Result<Option<HeadToHead>> {
        if self.source.fetch_profile(a).await?.is_none()
            || self.source.fetch_profile(b).await?.is_none()
        {
            return Ok(None);
        }

        let (anchor, include_private) = if requester == a || requester == b {
            (requester, true)
        } else {
            (a, false)
        };

        let matches = self
            .source
            .fetch_matches_for_profile(anchor, include_private)
            .await?;

        Ok(Some(stats::compute_head_to_head(&matches, a, b)))
    }
}

/// The profile currently on display and its loaded snapshot.
///
/// Loads can finish after the viewer has moved on to another profile. Such
/// late snapshots are rejected instead of overwriting the current view.
/// Callers invalidate it after they create, edit or delete a match.
#[derive(Debug, Default)]
pub struct ProfileContext {
    viewing: Option<ProfileId>,
    snapshot: Option<ProfileSnapshot>,
}

impl ProfileContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to viewing `profile_id`; any previous snapshot is dropped.
    pub fn begin(&mut self, profile_id: ProfileId) {
        self.viewing = Some(profile_id);
        self.snapshot = None;
    }

    /// Install a loaded snapshot if it belongs to the current view.
    ///
    /// Returns `false` (and changes nothing) for a stale snapshot.
    pub fn apply(&mut self, snapshot: ProfileSnapshot) -> bool {
        if self.viewing != Some(snapshot.profile.id) {
            tracing::debug!(
                profile_id = %snapshot.profile.id,
                viewing = ?self.viewing,
                "Discarding stale profile snapshot"
            );
            return false;
        }
        self.snapshot = Some(snapshot);
        true
    }

    /// Drop the snapshot after a match was added or removed.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    /// Forget the current view entirely.
    pub fn reset(&mut self) {
        self.viewing = None;
        self.snapshot = None;
    }

    pub fn viewing(&self) -> Option<ProfileId> {
        self.viewing
    }

    pub fn snapshot(&self) -> Option<&ProfileSnapshot> {
        self.snapshot.as_ref()
    }

    /// True when a snapshot needs to be (re)loaded for the current view.
    pub fn needs_load(&self) -> bool {
        self.viewing.is_some() && self.snapshot.is_none()
    }
}
