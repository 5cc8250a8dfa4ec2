// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Match perspective and statistics engine.
//!
//! Stored results are relative to whoever recorded the match. This module
//! works out where a given player stood in each match, reorients the result
//! for them and aggregates from there. All functions are pure; the same
//! match list always produces the same output.

pub mod aggregate;
pub mod head_to_head;
pub mod perspective;
pub mod relationships;
pub mod scoring;

pub use aggregate::{compute_stats, sort_most_recent_first, win_rate};
pub use head_to_head::compute_head_to_head;
pub use perspective::{
    annotate, participants, resolve_perspective, viewer_result, AnnotatedMatch, Participant,
    Perspective, Role, Side,
};
pub use relationships::{build_frequent, Relationship, FREQUENT_LIMIT};
pub use scoring::{derive_result, renumber_sets, score_line, viewer_sets};

use serde::Serialize;

use crate::models::{FrequentPlayer, LinkedMatch, ProfileId, Stats};

/// Everything shown on a player's profile, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerReport {
    pub stats: Stats,
    pub frequent_opponents: Vec<FrequentPlayer>,
    pub frequent_partners: Vec<FrequentPlayer>,
}

/// Build the report for `viewer` from matches ordered most recent first.
pub fn summarize(matches: &[LinkedMatch], viewer: ProfileId) -> PlayerReport {
    let annotated = annotate(matches, viewer);
    PlayerReport {
        stats: compute_stats(&annotated),
        frequent_opponents: build_frequent(&annotated, viewer, Relationship::Opponents),
        frequent_partners: build_frequent(&annotated, viewer, Relationship::Partners),
    }
}
