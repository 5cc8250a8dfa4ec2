// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Match records as stored in Firestore.
//!
//! A match has four fixed participant slots: the creator, the opponent and,
//! for doubles, the creator's partner and the opponent's partner. Every slot
//! other than the creator carries a free-text name and an optional link to a
//! registered profile. The stored `result` and set scores are always from the
//! creator's side of the net.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

use crate::models::{ProfileId, ProfileSummary};

pub type MatchId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MatchType {
    Singles,
    Doubles,
}

/// Outcome of a match for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

impl MatchResult {
    /// The same outcome seen from the other side of the net.
    pub fn flipped(self) -> Self {
        match self {
            MatchResult::Win => MatchResult::Loss,
            MatchResult::Loss => MatchResult::Win,
            MatchResult::Draw => MatchResult::Draw,
        }
    }
}

/// One set's score line, relative to the creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MatchSet {
    /// 1-based, contiguous within a match
    pub set_number: u32,
    pub player_score: u32,
    pub opponent_score: u32,
    #[serde(default)]
    pub player_tiebreak: Option<u32>,
    #[serde(default)]
    pub opponent_tiebreak: Option<u32>,
}

/// Stored match record.
///
/// Sets are embedded in the match document so they are always replaced
/// together with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Match ID (also used as document ID)
    pub id: MatchId,
    /// Profile that recorded the match
    pub creator_id: ProfileId,
    pub match_type: MatchType,
    pub opponent_name: String,
    #[serde(default)]
    pub opponent_id: Option<ProfileId>,
    #[serde(default)]
    pub partner_name: Option<String>,
    #[serde(default)]
    pub partner_id: Option<ProfileId>,
    #[serde(default)]
    pub opponent_partner_name: Option<String>,
    #[serde(default)]
    pub opponent_partner_id: Option<ProfileId>,
    #[serde(default)]
    pub location: Option<String>,
    pub played_at: NaiveDate,
    /// Outcome for the creator; `None` until sets are attached
    pub result: Option<MatchResult>,
    pub is_public: bool,
    #[serde(default)]
    pub sets: Vec<MatchSet>,
    /// Creator plus every linked profile id, for `array-contains` lookups
    #[serde(default)]
    pub participant_ids: Vec<ProfileId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Every profile id linked to this match, creator first.
    pub fn linked_profile_ids(&self) -> Vec<ProfileId> {
        let mut ids = vec![self.creator_id];
        for id in [
            self.opponent_id,
            self.partner_id,
            self.opponent_partner_id,
        ]
        .into_iter()
        .flatten()
        {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

/// Profiles resolved for a match's linked slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedPlayers {
    pub creator: Option<ProfileSummary>,
    pub opponent: Option<ProfileSummary>,
    pub partner: Option<ProfileSummary>,
    pub opponent_partner: Option<ProfileSummary>,
}

/// A match row together with its embedded profile references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedMatch {
    pub record: Match,
    pub players: LinkedPlayers,
}

impl LinkedMatch {
    /// A match whose slot profiles have not been resolved.
    pub fn unlinked(record: Match) -> Self {
        Self {
            record,
            players: LinkedPlayers::default(),
        }
    }
}
