// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end checks of the statistics engine through its public API.

use matchpost::models::{LinkedMatch, MatchResult, ProfileId};
use matchpost::stats::{
    compute_head_to_head, resolve_perspective, sort_most_recent_first, summarize, viewer_result,
    Side,
};
use uuid::Uuid;

mod common;
use common::{doubles, singles};

const RESULTS: [Option<MatchResult>; 4] = [
    Some(MatchResult::Win),
    Some(MatchResult::Loss),
    Some(MatchResult::Draw),
    None,
];

/// A mixed bag of singles and doubles matches around `viewer`, with the
/// viewer in every slot and a few matches they did not play.
fn mixed_history(viewer: ProfileId, rival: ProfileId, friend: ProfileId) -> Vec<LinkedMatch> {
    let mut matches = Vec::new();
    let mut seed: u32 = 7;
    for day in 1..=28 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let result = RESULTS[(seed >> 16) as usize % RESULTS.len()];
        let date = format!("2024-02-{:02}", day);
        let m = match (seed >> 8) % 6 {
            0 => singles(viewer, Some(rival), result, &date),
            1 => singles(rival, Some(viewer), result, &date),
            2 => doubles(viewer, Some(friend), Some(rival), None, result, &date),
            3 => doubles(rival, None, Some(viewer), Some(friend), result, &date),
            4 => doubles(friend, Some(viewer), None, Some(rival), result, &date),
            _ => singles(rival, Some(friend), result, &date),
        };
        matches.push(LinkedMatch::unlinked(m));
    }
    sort_most_recent_first(&mut matches);
    matches
}

#[test]
fn test_streaks_follow_match_order() {
    let viewer = Uuid::new_v4();
    let mut matches: Vec<LinkedMatch> = [
        (MatchResult::Win, "2024-05-04"),
        (MatchResult::Win, "2024-05-03"),
        (MatchResult::Loss, "2024-05-02"),
        (MatchResult::Win, "2024-05-01"),
    ]
    .into_iter()
    .map(|(r, day)| LinkedMatch::unlinked(singles(viewer, None, Some(r), day)))
    .collect();
    sort_most_recent_first(&mut matches);

    let stats = summarize(&matches, viewer).stats;

    assert_eq!(stats.total_matches, 4);
    assert_eq!(stats.wins, 3);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.win_rate, 75);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 2);
}

#[test]
fn test_empty_history() {
    let report = summarize(&[], Uuid::new_v4());

    assert_eq!(report.stats.total_matches, 0);
    assert_eq!(report.stats.wins, 0);
    assert_eq!(report.stats.losses, 0);
    assert_eq!(report.stats.win_rate, 0);
    assert_eq!(report.stats.current_streak, 0);
    assert_eq!(report.stats.longest_streak, 0);
    assert!(report.frequent_opponents.is_empty());
    assert!(report.frequent_partners.is_empty());
}

#[test]
fn test_opponent_partner_sees_flipped_result() {
    let creator = Uuid::new_v4();
    let viewer = Uuid::new_v4();
    let m = doubles(
        creator,
        None,
        None,
        Some(viewer),
        Some(MatchResult::Win),
        "2024-03-01",
    );

    let perspective = resolve_perspective(&m, viewer);
    assert_eq!(perspective.side, Side::OpponentSide);
    assert_eq!(
        viewer_result(m.result, perspective.side),
        Some(MatchResult::Loss)
    );

    let stats = summarize(&[LinkedMatch::unlinked(m)], viewer).stats;
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.doubles.losses, 1);
}

#[test]
fn test_head_to_head_skips_teammates() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let matches: Vec<LinkedMatch> = [
        doubles(a, Some(b), None, None, Some(MatchResult::Win), "2024-04-03"),
        singles(a, Some(b), Some(MatchResult::Win), "2024-04-02"),
        singles(a, Some(b), Some(MatchResult::Loss), "2024-04-01"),
    ]
    .into_iter()
    .map(LinkedMatch::unlinked)
    .collect();

    let h2h = compute_head_to_head(&matches, a, b);

    assert_eq!(h2h.total_matches, 2);
    assert_eq!(h2h.a_wins, 1);
    assert_eq!(h2h.b_wins, 1);
    assert_eq!(h2h.draws, 0);
}

#[test]
fn test_free_text_opponents_merge_on_exact_name() {
    let viewer = Uuid::new_v4();
    let matches: Vec<LinkedMatch> = ["2024-05-03", "2024-05-02", "2024-05-01"]
        .into_iter()
        .map(|day| {
            let mut m = singles(viewer, None, Some(MatchResult::Win), day);
            m.opponent_name = "Jordan".to_string();
            LinkedMatch::unlinked(m)
        })
        .collect();

    let opponents = summarize(&matches, viewer).frequent_opponents;

    assert_eq!(opponents.len(), 1);
    assert_eq!(opponents[0].display_name, "Jordan");
    assert_eq!(opponents[0].profile_id, None);
    assert_eq!(opponents[0].count, 3);
    assert_eq!(opponents[0].wins, 3);
}

#[test]
fn test_win_rate_and_streak_bounds() {
    for _ in 0..5 {
        let (viewer, rival, friend) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let matches = mixed_history(viewer, rival, friend);

        for who in [viewer, rival, friend, Uuid::new_v4()] {
            let stats = summarize(&matches, who).stats;

            assert!(stats.win_rate <= 100);
            if stats.total_matches == 0 {
                assert_eq!(stats.win_rate, 0);
            }
            assert!(stats.wins + stats.losses + stats.draws <= stats.total_matches);
            assert!(stats.current_streak <= stats.total_matches);
            if stats.current_streak > 0 {
                assert!(stats.longest_streak >= stats.current_streak);
            }
            assert_eq!(
                stats.total_matches,
                stats.singles.total_matches + stats.doubles.total_matches
            );
        }
    }
}

#[test]
fn test_result_orientation_matches_side() {
    let (viewer, rival, friend) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    for linked in mixed_history(viewer, rival, friend) {
        let m = &linked.record;
        for who in [viewer, rival, friend] {
            let side = resolve_perspective(m, who).side;
            let oriented = viewer_result(m.result, side);
            match side {
                Side::CreatorSide => assert_eq!(oriented, m.result),
                Side::OpponentSide => {
                    assert_eq!(oriented, m.result.map(MatchResult::flipped))
                }
                Side::None => assert_eq!(oriented, None),
            }
        }
    }
}

#[test]
fn test_head_to_head_between_teammates_is_empty() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let matches: Vec<LinkedMatch> = [
        doubles(a, Some(b), None, None, Some(MatchResult::Win), "2024-04-03"),
        doubles(Uuid::new_v4(), None, Some(a), Some(b), Some(MatchResult::Loss), "2024-04-02"),
    ]
    .into_iter()
    .map(LinkedMatch::unlinked)
    .collect();

    assert_eq!(compute_head_to_head(&matches, a, b).total_matches, 0);
    assert_eq!(compute_head_to_head(&matches, b, a).total_matches, 0);
}

#[test]
fn test_recompute_is_stable() {
    let (viewer, rival, friend) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let matches = mixed_history(viewer, rival, friend);
    let before = matches.clone();

    let first = summarize(&matches, viewer);
    let second = summarize(&matches, viewer);

    assert_eq!(first, second);
    assert_eq!(matches, before);
}

#[test]
fn test_head_to_head_total_agrees_with_profile_total() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let matches: Vec<LinkedMatch> = [
        singles(a, Some(b), Some(MatchResult::Win), "2024-04-02"),
        singles(b, Some(a), None, "2024-04-01"),
    ]
    .into_iter()
    .map(LinkedMatch::unlinked)
    .collect();

    let h2h = compute_head_to_head(&matches, a, b);

    assert_eq!(h2h.total_matches, summarize(&matches, a).stats.total_matches);
    assert_eq!(h2h.total_matches, summarize(&matches, b).stats.total_matches);
    assert_eq!((h2h.a_wins, h2h.b_wins, h2h.draws), (1, 0, 1));
}
