// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use matchpost::config::Config;
use matchpost::db::firestore::link_players;
use matchpost::db::{FirestoreDb, MatchSource};
use matchpost::error::AppError;
use matchpost::middleware::auth::create_jwt;
use matchpost::models::{
    LinkedMatch, Match, MatchResult, MatchType, Profile, ProfileId, ProfileSummary,
};
use matchpost::routes::create_router;
use matchpost::AppState;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Check if emulator is available via environment variable.
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: test_db_offline(),
    });
    (create_router(state.clone()), state)
}

/// Create a test JWT token for `profile_id`.
pub fn create_test_jwt(profile_id: ProfileId, signing_key: &[u8]) -> String {
    create_jwt(profile_id, signing_key).expect("Failed to sign test token")
}

pub fn test_profile(username: &str) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        username: Some(username.to_string()),
        full_name: None,
        avatar_url: None,
        bio: None,
        location: None,
        skill_level: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A public singles match recorded by `creator`.
pub fn singles(
    creator: ProfileId,
    opponent: Option<ProfileId>,
    result: Option<MatchResult>,
    day: &str,
) -> Match {
    let mut m = Match {
        id: Uuid::new_v4(),
        creator_id: creator,
        match_type: MatchType::Singles,
        opponent_name: "Opponent".to_string(),
        opponent_id: opponent,
        partner_name: None,
        partner_id: None,
        opponent_partner_name: None,
        opponent_partner_id: None,
        location: None,
        played_at: day.parse::<NaiveDate>().expect("bad test date"),
        result,
        is_public: true,
        sets: vec![],
        participant_ids: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    m.participant_ids = m.linked_profile_ids();
    m
}

/// A public doubles match recorded by `creator`.
pub fn doubles(
    creator: ProfileId,
    partner: Option<ProfileId>,
    opponent: Option<ProfileId>,
    opponent_partner: Option<ProfileId>,
    result: Option<MatchResult>,
    day: &str,
) -> Match {
    let mut m = singles(creator, opponent, result, day);
    m.match_type = MatchType::Doubles;
    m.partner_name = Some("Partner".to_string());
    m.partner_id = partner;
    m.opponent_partner_name = Some("Opponent Partner".to_string());
    m.opponent_partner_id = opponent_partner;
    m.participant_ids = m.linked_profile_ids();
    m
}

/// In-memory store for exercising the profile pipeline without Firestore.
#[derive(Default)]
pub struct MemorySource {
    pub profiles: HashMap<ProfileId, Profile>,
    pub matches: Vec<Match>,
}

impl MemorySource {
    pub fn with_profile(mut self, profile: &Profile) -> Self {
        self.profiles.insert(profile.id, profile.clone());
        self
    }

    pub fn with_match(mut self, m: Match) -> Self {
        self.matches.push(m);
        self
    }
}

impl MatchSource for MemorySource {
    async fn fetch_profile(&self, id: ProfileId) -> Result<Option<Profile>, AppError> {
        Ok(self.profiles.get(&id).cloned())
    }

    async fn fetch_matches_for_profile(
        &self,
        id: ProfileId,
        include_private: bool,
    ) -> Result<Vec<LinkedMatch>, AppError> {
        let matches: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| m.participant_ids.contains(&id))
            .filter(|m| include_private || m.is_public)
            .cloned()
            .collect();
        let summaries: HashMap<ProfileId, ProfileSummary> = self
            .profiles
            .values()
            .map(|p| (p.id, p.summary()))
            .collect();
        Ok(link_players(matches, &summaries))
    }
}
