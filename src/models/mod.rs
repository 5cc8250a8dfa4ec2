// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod group;
pub mod matches;
pub mod profile;
pub mod stats;

pub use group::{Group, GroupId, GroupMember, GroupMembership, GroupRole};
pub use matches::{
    LinkedMatch, LinkedPlayers, Match, MatchId, MatchResult, MatchSet, MatchType,
};
pub use profile::{Profile, ProfileId, ProfileSummary, SkillLevel};
pub use stats::{DisciplineStats, FrequentPlayer, HeadToHead, Stats};
