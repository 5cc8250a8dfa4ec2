// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Win/loss totals, win rate and streaks for one viewer.

use std::cmp::Ordering;

use crate::models::{DisciplineStats, LinkedMatch, MatchResult, MatchType, Stats};
use crate::stats::perspective::AnnotatedMatch;

/// Order matches most recent first.
///
/// Same-day matches fall back to recording time, newest first, and then to
/// match id so the order is fully deterministic.
pub fn sort_most_recent_first(matches: &mut [LinkedMatch]) {
    matches.sort_by(|a, b| compare_most_recent_first(&a.record, &b.record));
}

fn compare_most_recent_first(a: &crate::models::Match, b: &crate::models::Match) -> Ordering {
    b.played_at
        .cmp(&a.played_at)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Whole-percent win rate; 0 when nothing has been played.
pub fn win_rate(wins: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(wins) / f64::from(total) * 100.0).round() as u32
}

/// Compute stats over matches already annotated for the viewer and ordered
/// most recent first.
pub fn compute_stats(matches: &[AnnotatedMatch<'_>]) -> Stats {
    let results: Vec<Option<MatchResult>> = matches.iter().map(|m| m.result).collect();

    let total_matches = results.len() as u32;
    let wins = count(&results, MatchResult::Win);
    let losses = count(&results, MatchResult::Loss);
    let draws = count(&results, MatchResult::Draw);

    Stats {
        total_matches,
        wins,
        losses,
        draws,
        win_rate: win_rate(wins, total_matches),
        current_streak: current_streak(&results),
        longest_streak: longest_streak(&results),
        singles: discipline(matches, MatchType::Singles),
        doubles: discipline(matches, MatchType::Doubles),
    }
}

fn count(results: &[Option<MatchResult>], wanted: MatchResult) -> u32 {
    results.iter().filter(|r| **r == Some(wanted)).count() as u32
}

fn discipline(matches: &[AnnotatedMatch<'_>], match_type: MatchType) -> DisciplineStats {
    let results: Vec<Option<MatchResult>> = matches
        .iter()
        .filter(|m| m.record().match_type == match_type)
        .map(|m| m.result)
        .collect();

    let total_matches = results.len() as u32;
    let wins = count(&results, MatchResult::Win);
    DisciplineStats {
        total_matches,
        wins,
        losses: count(&results, MatchResult::Loss),
        win_rate: win_rate(wins, total_matches),
    }
}

/// Leading wins in most-recent-first order. Anything but a win ends it.
fn current_streak(results: &[Option<MatchResult>]) -> u32 {
    results
        .iter()
        .take_while(|r| **r == Some(MatchResult::Win))
        .count() as u32
}

/// Longest win run in chronological order. Draws reset the run like losses.
fn longest_streak(results: &[Option<MatchResult>]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    for result in results.iter().rev() {
        if *result == Some(MatchResult::Win) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}
