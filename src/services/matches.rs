// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recording, editing and deleting matches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Match, MatchId, MatchSet, MatchType, ProfileId};
use crate::stats::{derive_result, renumber_sets};

fn default_public() -> bool {
    true
}

/// One set as entered on the record form, from the creator's side.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetScoreInput {
    #[validate(range(max = 7))]
    pub player_score: u32,
    #[validate(range(max = 7))]
    pub opponent_score: u32,
    pub player_tiebreak: Option<u32>,
    pub opponent_tiebreak: Option<u32>,
}

/// Body of `POST /api/matches` and `PUT /api/matches/{id}`.
///
/// An edit sends the full match again; its sets replace the stored ones.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMatchRequest {
    pub match_type: MatchType,
    #[validate(length(min = 1, max = 100))]
    pub opponent_name: String,
    pub opponent_id: Option<ProfileId>,
    #[validate(length(min = 1, max = 100))]
    pub partner_name: Option<String>,
    pub partner_id: Option<ProfileId>,
    #[validate(length(min = 1, max = 100))]
    pub opponent_partner_name: Option<String>,
    pub opponent_partner_id: Option<ProfileId>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub played_at: NaiveDate,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[validate(length(max = 5), nested)]
    #[serde(default)]
    pub sets: Vec<SetScoreInput>,
}

fn trimmed(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// Check slot rules and turn a request into a stored match.
///
/// The result is always derived from the sets so the two cannot disagree.
pub fn build_match(
    creator: ProfileId,
    req: CreateMatchRequest,
    now: DateTime<Utc>,
) -> Result<Match> {
    req.validate()?;

    let opponent_name = req.opponent_name.trim().to_string();
    if opponent_name.is_empty() {
        return Err(AppError::BadRequest("Opponent name is required".to_string()));
    }
    let partner_name = trimmed(req.partner_name);
    let opponent_partner_name = trimmed(req.opponent_partner_name);

    match req.match_type {
        MatchType::Singles => {
            if partner_name.is_some()
                || req.partner_id.is_some()
                || opponent_partner_name.is_some()
                || req.opponent_partner_id.is_some()
            {
                return Err(AppError::BadRequest(
                    "Singles matches cannot have partners".to_string(),
                ));
            }
        }
        MatchType::Doubles => {
            if partner_name.is_none() || opponent_partner_name.is_none() {
                return Err(AppError::BadRequest(
                    "Doubles matches need a partner and an opponent partner".to_string(),
                ));
            }
        }
    }

    let linked: Vec<ProfileId> = [req.opponent_id, req.partner_id, req.opponent_partner_id]
        .into_iter()
        .flatten()
        .collect();
    for (i, id) in linked.iter().enumerate() {
        if *id == creator || linked[..i].contains(id) {
            return Err(AppError::BadRequest(
                "A player can only fill one slot in a match".to_string(),
            ));
        }
    }

    let mut sets = req
        .sets
        .into_iter()
        .map(|s| match (s.player_tiebreak, s.opponent_tiebreak) {
            (Some(_), None) | (None, Some(_)) => Err(AppError::BadRequest(
                "Tiebreak scores need both sides".to_string(),
            )),
            _ => Ok(MatchSet {
                set_number: 0,
                player_score: s.player_score,
                opponent_score: s.opponent_score,
                player_tiebreak: s.player_tiebreak,
                opponent_tiebreak: s.opponent_tiebreak,
            }),
        })
        .collect::<Result<Vec<MatchSet>>>()?;
    renumber_sets(&mut sets);

    let mut record = Match {
        id: Uuid::new_v4(),
        creator_id: creator,
        match_type: req.match_type,
        opponent_name,
        opponent_id: req.opponent_id,
        partner_name,
        partner_id: req.partner_id,
        opponent_partner_name,
        opponent_partner_id: req.opponent_partner_id,
        location: trimmed(req.location),
        played_at: req.played_at,
        result: derive_result(&sets),
        is_public: req.is_public,
        sets,
        participant_ids: vec![],
        created_at: now,
        updated_at: now,
    };
    record.participant_ids = record.linked_profile_ids();

    Ok(record)
}

/// Replace a stored match with an edited version.
///
/// The id, creator and creation time carry over; everything else, sets
/// included, comes from the request and goes through the same checks as a
/// new match.
pub fn apply_edit(existing: &Match, req: CreateMatchRequest, now: DateTime<Utc>) -> Result<Match> {
    let mut record = build_match(existing.creator_id, req, now)?;
    record.id = existing.id;
    record.created_at = existing.created_at;
    Ok(record)
}

/// Only the player who recorded a match may change or delete it.
pub fn ensure_creator(record: &Match, requester: ProfileId) -> Result<()> {
    if record.creator_id != requester {
        return Err(AppError::Forbidden(
            "Only the player who recorded a match can change it".to_string(),
        ));
    }
    Ok(())
}

/// Match writes against Firestore.
pub struct MatchService<'a> {
    db: &'a FirestoreDb,
}

impl<'a> MatchService<'a> {
    pub fn new(db: &'a FirestoreDb) -> Self {
        Self { db }
    }

    /// Record a new match for `creator`.
    pub async fn create(&self, creator: ProfileId, req: CreateMatchRequest) -> Result<Match> {
        let record = build_match(creator, req, Utc::now())?;
        self.db.set_match(&record).await?;

        tracing::info!(
            match_id = %record.id,
            creator = %creator,
            match_type = ?record.match_type,
            result = ?record.result,
            "Match recorded"
        );
        Ok(record)
    }

    async fn load(&self, id: MatchId) -> Result<Match> {
        self.db
            .get_match(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", id)))
    }

    /// Edit a match, replacing its sets. Only its creator may do so.
    pub async fn update(
        &self,
        requester: ProfileId,
        id: MatchId,
        req: CreateMatchRequest,
    ) -> Result<Match> {
        req.validate()?;
        let existing = self.load(id).await?;
        ensure_creator(&existing, requester)?;

        let record = apply_edit(&existing, req, Utc::now())?;
        self.db.set_match(&record).await?;

        tracing::info!(
            match_id = %id,
            creator = %requester,
            sets = record.sets.len(),
            result = ?record.result,
            "Match updated"
        );
        Ok(record)
    }

    /// Delete a match. Only its creator may do so.
    pub async fn delete(&self, requester: ProfileId, id: MatchId) -> Result<()> {
        let record = self.load(id).await?;
        ensure_creator(&record, requester)?;

        self.db.delete_match(id).await?;
        tracing::info!(match_id = %id, creator = %requester, "Match deleted");
        Ok(())
    }
}
