// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Set score interpretation.

use std::cmp::Ordering;

use crate::models::{MatchResult, MatchSet};
use crate::stats::perspective::Side;

/// Who took a set, from the creator's side.
fn set_outcome(set: &MatchSet) -> Ordering {
    match set.player_score.cmp(&set.opponent_score) {
        Ordering::Equal => match (set.player_tiebreak, set.opponent_tiebreak) {
            (Some(p), Some(o)) => p.cmp(&o),
            _ => Ordering::Equal,
        },
        decided => decided,
    }
}

/// Creator-relative match result implied by the set scores.
///
/// `None` when no sets have been entered.
pub fn derive_result(sets: &[MatchSet]) -> Option<MatchResult> {
    if sets.is_empty() {
        return None;
    }

    let (won, lost) = sets
        .iter()
        .fold((0u32, 0u32), |(won, lost), set| match set_outcome(set) {
            Ordering::Greater => (won + 1, lost),
            Ordering::Less => (won, lost + 1),
            Ordering::Equal => (won, lost),
        });

    Some(match won.cmp(&lost) {
        Ordering::Greater => MatchResult::Win,
        Ordering::Less => MatchResult::Loss,
        Ordering::Equal => MatchResult::Draw,
    })
}

/// Give sets contiguous numbers starting at 1, in their current order.
pub fn renumber_sets(sets: &mut [MatchSet]) {
    for (i, set) in sets.iter_mut().enumerate() {
        set.set_number = i as u32 + 1;
    }
}

/// Set scores as seen from `side`. Opponent side swaps the columns.
pub fn viewer_sets(sets: &[MatchSet], side: Side) -> Vec<MatchSet> {
    let mut sets = sets.to_vec();
    sets.sort_by_key(|s| s.set_number);

    if side == Side::OpponentSide {
        for set in &mut sets {
            std::mem::swap(&mut set.player_score, &mut set.opponent_score);
            std::mem::swap(&mut set.player_tiebreak, &mut set.opponent_tiebreak);
        }
    }
    sets
}

/// Compact score line such as `6-4 3-6 7-6(5)`.
///
/// The bracketed number is the tiebreak loser's points.
pub fn score_line(sets: &[MatchSet]) -> String {
    sets.iter()
        .map(|set| {
            let games = format!("{}-{}", set.player_score, set.opponent_score);
            match (set.player_tiebreak, set.opponent_tiebreak) {
                (Some(p), Some(o)) => format!("{}({})", games, p.min(o)),
                _ => games,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(n: u32, p: u32, o: u32) -> MatchSet {
        MatchSet {
            set_number: n,
            player_score: p,
            opponent_score: o,
            player_tiebreak: None,
            opponent_tiebreak: None,
        }
    }

    fn tiebreak(n: u32, p: u32, o: u32, ptb: u32, otb: u32) -> MatchSet {
        MatchSet {
            player_tiebreak: Some(ptb),
            opponent_tiebreak: Some(otb),
            ..set(n, p, o)
        }
    }

    #[test]
    fn test_derive_result() {
        assert_eq!(derive_result(&[]), None);
        assert_eq!(
            derive_result(&[set(1, 6, 4), set(2, 6, 3)]),
            Some(MatchResult::Win)
        );
        assert_eq!(
            derive_result(&[set(1, 6, 4), set(2, 3, 6), set(3, 4, 6)]),
            Some(MatchResult::Loss)
        );
        assert_eq!(
            derive_result(&[set(1, 6, 4), set(2, 3, 6)]),
            Some(MatchResult::Draw)
        );
    }

    #[test]
    fn test_level_set_decided_by_tiebreak() {
        assert_eq!(
            derive_result(&[tiebreak(1, 6, 6, 7, 5)]),
            Some(MatchResult::Win)
        );
        assert_eq!(derive_result(&[set(1, 6, 6)]), Some(MatchResult::Draw));
    }

    #[test]
    fn test_renumber_sets() {
        let mut sets = vec![set(3, 6, 4), set(7, 2, 6)];
        renumber_sets(&mut sets);
        assert_eq!(sets[0].set_number, 1);
        assert_eq!(sets[1].set_number, 2);
    }

    #[test]
    fn test_viewer_sets_swap_for_opponent_side() {
        let sets = [tiebreak(2, 7, 6, 7, 3), set(1, 4, 6)];

        let flipped = viewer_sets(&sets, Side::OpponentSide);
        assert_eq!(flipped[0], set(1, 6, 4));
        assert_eq!(flipped[1], tiebreak(2, 6, 7, 3, 7));

        assert_eq!(viewer_sets(&sets, Side::CreatorSide)[0], set(1, 4, 6));
    }

    #[test]
    fn test_score_line() {
        let sets = [set(1, 6, 4), set(2, 3, 6), tiebreak(3, 7, 6, 7, 5)];
        assert_eq!(score_line(&sets), "6-4 3-6 7-6(5)");
        assert_eq!(score_line(&[]), "");
    }
}
