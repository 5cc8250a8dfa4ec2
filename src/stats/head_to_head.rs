// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record between two players.

use crate::models::{HeadToHead, LinkedMatch, MatchResult, ProfileId};
use crate::stats::perspective::{resolve_perspective, Side};

/// Tally wins, losses and draws between `a` and `b`.
///
/// Only matches where both play, on opposite sides, count. A match without
/// a result is tallied as a draw, so the total agrees with each player's own
/// match count.
pub fn compute_head_to_head(matches: &[LinkedMatch], a: ProfileId, b: ProfileId) -> HeadToHead {
    let mut h2h = HeadToHead::default();

    for linked in matches {
        let m = &linked.record;
        let side_a = resolve_perspective(m, a).side;
        let side_b = resolve_perspective(m, b).side;

        if side_a == Side::None || side_b == Side::None || side_a == side_b {
            continue;
        }

        h2h.total_matches += 1;
        let a_is_creator_side = side_a == Side::CreatorSide;
        match (m.result, a_is_creator_side) {
            (Some(MatchResult::Win), true) | (Some(MatchResult::Loss), false) => h2h.a_wins += 1,
            (Some(MatchResult::Win), false) | (Some(MatchResult::Loss), true) => h2h.b_wins += 1,
            (Some(MatchResult::Draw) | None, _) => h2h.draws += 1,
        }
    }

    h2h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::testing::{doubles_match, singles_match};
    use uuid::Uuid;

    #[test]
    fn test_teammates_are_excluded() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let matches = vec![
            // Teammates
            doubles_match(a, Some(b), None, None, Some(MatchResult::Win)),
            // a beats b
            singles_match(a, Some(b), Some(MatchResult::Win)),
            // b records a win over a
            singles_match(b, Some(a), Some(MatchResult::Win)),
        ];

        let h2h = compute_head_to_head(&matches, a, b);
        assert_eq!(
            h2h,
            HeadToHead {
                total_matches: 2,
                a_wins: 1,
                b_wins: 1,
                draws: 0
            }
        );
    }

    #[test]
    fn test_partners_on_opposite_sides_of_doubles() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let creator = Uuid::new_v4();
        let matches = vec![
            // a partners the creator, b is the opponent's partner; creator side loses
            doubles_match(creator, Some(a), None, Some(b), Some(MatchResult::Loss)),
            doubles_match(creator, Some(a), None, Some(b), Some(MatchResult::Draw)),
        ];

        let h2h = compute_head_to_head(&matches, a, b);
        assert_eq!(h2h.total_matches, 2);
        assert_eq!(h2h.a_wins, 0);
        assert_eq!(h2h.b_wins, 1);
        assert_eq!(h2h.draws, 1);
    }

    #[test]
    fn test_unscored_match_counts_as_draw() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let matches = vec![
            singles_match(a, Some(b), None),
            singles_match(a, Some(b), Some(MatchResult::Win)),
        ];

        let h2h = compute_head_to_head(&matches, a, b);
        assert_eq!(
            h2h,
            HeadToHead {
                total_matches: 2,
                a_wins: 1,
                b_wins: 0,
                draws: 1
            }
        );
        assert_eq!(
            h2h.total_matches,
            crate::stats::summarize(&matches, a).stats.total_matches
        );
    }

    #[test]
    fn test_skips_unrelated_matches() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let matches = vec![
            singles_match(a, Some(Uuid::new_v4()), Some(MatchResult::Win)),
            singles_match(b, None, None),
        ];

        assert_eq!(compute_head_to_head(&matches, a, b), HeadToHead::default());
    }

    #[test]
    fn test_same_player_twice_is_empty() {
        let a = Uuid::new_v4();
        let matches = vec![singles_match(a, None, Some(MatchResult::Win))];
        assert_eq!(compute_head_to_head(&matches, a, a), HeadToHead::default());
    }
}
