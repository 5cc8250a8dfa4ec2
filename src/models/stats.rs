// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics value objects returned to the presentation layer.
//!
//! These are recomputed from the match list on every view and never stored.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::ProfileId;

/// Win/loss record within one discipline (singles or doubles).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DisciplineStats {
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
    /// Whole percent, 0..=100
    pub win_rate: u32,
}

/// Aggregate statistics for one viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Stats {
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Whole percent, 0..=100
    pub win_rate: u32,
    /// Consecutive wins counting back from the most recent match
    pub current_streak: u32,
    /// Longest run of consecutive wins in chronological order
    pub longest_streak: u32,
    pub singles: DisciplineStats,
    pub doubles: DisciplineStats,
}

/// Frequent opponent or partner leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FrequentPlayer {
    /// Linked profile, `None` for free-text players
    pub profile_id: Option<ProfileId>,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub count: u32,
    pub wins: u32,
    pub losses: u32,
}

/// Record between two specific players across matches where they were
/// on opposite sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HeadToHead {
    pub total_matches: u32,
    pub a_wins: u32,
    pub b_wins: u32,
    pub draws: u32,
}
