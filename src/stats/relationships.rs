// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Frequent opponent and partner leaderboards.

use std::collections::HashMap;

use crate::models::{FrequentPlayer, MatchResult, MatchType, ProfileId};
use crate::stats::perspective::{participants, AnnotatedMatch, Participant};

/// Leaderboard length.
pub const FREQUENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    Opponents,
    Partners,
}

/// Identity used to merge encounters with the same player.
///
/// Free-text players are only merged when the typed name matches exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PlayerKey {
    Profile(ProfileId),
    Name(String),
}

impl PlayerKey {
    fn of(participant: &Participant<'_>) -> Self {
        match participant.profile_id {
            Some(id) => PlayerKey::Profile(id),
            None => PlayerKey::Name(participant.display_name()),
        }
    }
}

/// Top players the viewer faced (or teamed with), most encounters first.
///
/// `matches` must already be annotated for `viewer`. Ties keep first-seen
/// order.
pub fn build_frequent(
    matches: &[AnnotatedMatch<'_>],
    viewer: ProfileId,
    kind: Relationship,
) -> Vec<FrequentPlayer> {
    let mut index: HashMap<PlayerKey, usize> = HashMap::new();
    let mut tally: Vec<FrequentPlayer> = Vec::new();

    for m in matches {
        let others: Vec<Participant<'_>> = match kind {
            Relationship::Opponents => participants(m.linked, m.perspective.side.opposite()),
            Relationship::Partners => {
                if m.record().match_type != MatchType::Doubles {
                    continue;
                }
                participants(m.linked, m.perspective.side)
                    .into_iter()
                    .filter(|p| p.profile_id != Some(viewer))
                    .collect()
            }
        };

        for other in others {
            let slot = *index.entry(PlayerKey::of(&other)).or_insert_with(|| {
                tally.push(FrequentPlayer {
                    profile_id: other.profile_id,
                    display_name: other.display_name(),
                    avatar_url: other.avatar_url().map(String::from),
                    count: 0,
                    wins: 0,
                    losses: 0,
                });
                tally.len() - 1
            });

            let entry = &mut tally[slot];
            entry.count += 1;
            match m.result {
                Some(MatchResult::Win) => entry.wins += 1,
                Some(MatchResult::Loss) => entry.losses += 1,
                _ => {}
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally.truncate(FREQUENT_LIMIT);
    tally
}
