// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Slot interpretation for the four-slot match schema.
//!
//! Nothing outside this module looks at the raw creator/opponent/partner
//! fields. Everything else asks where a viewer stands in a match and works
//! from that.

use crate::models::profile::UNKNOWN_PLAYER;
use crate::models::{LinkedMatch, Match, MatchResult, MatchType, ProfileId, ProfileSummary};

/// Which slot a viewer occupies in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Creator,
    Opponent,
    Partner,
    OpponentPartner,
    None,
}

impl Role {
    pub fn side(self) -> Side {
        match self {
            Role::Creator | Role::Partner => Side::CreatorSide,
            Role::Opponent | Role::OpponentPartner => Side::OpponentSide,
            Role::None => Side::None,
        }
    }
}

/// Which side of the net a viewer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    CreatorSide,
    OpponentSide,
    None,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::CreatorSide => Side::OpponentSide,
            Side::OpponentSide => Side::CreatorSide,
            Side::None => Side::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perspective {
    pub role: Role,
    pub side: Side,
}

impl Perspective {
    pub fn is_participant(&self) -> bool {
        self.side != Side::None
    }
}

/// Locate `viewer` among the slots of `m`.
///
/// Partner slots only count for doubles; a singles row with stray partner
/// ids is read as if those fields were empty. Slot ids are assumed unique
/// within a match, so the first hit wins.
pub fn resolve_perspective(m: &Match, viewer: ProfileId) -> Perspective {
    let doubles = m.match_type == MatchType::Doubles;

    let role = if m.creator_id == viewer {
        Role::Creator
    } else if m.opponent_id == Some(viewer) {
        Role::Opponent
    } else if doubles && m.partner_id == Some(viewer) {
        Role::Partner
    } else if doubles && m.opponent_partner_id == Some(viewer) {
        Role::OpponentPartner
    } else {
        Role::None
    };

    Perspective {
        role,
        side: role.side(),
    }
}

/// Reorient a creator-relative result for a viewer on `side`.
///
/// Non-participants get `None`; callers are expected to have filtered them.
pub fn viewer_result(stored: Option<MatchResult>, side: Side) -> Option<MatchResult> {
    match side {
        Side::CreatorSide => stored,
        Side::OpponentSide => stored.map(MatchResult::flipped),
        Side::None => None,
    }
}

/// One filled slot of a match.
#[derive(Debug, Clone, Copy)]
pub struct Participant<'a> {
    pub role: Role,
    pub profile_id: Option<ProfileId>,
    /// Free-text name typed by the creator
    pub name: Option<&'a str>,
    pub profile: Option<&'a ProfileSummary>,
}

impl Participant<'_> {
    /// Linked profile name first, then the typed name.
    pub fn display_name(&self) -> String {
        match (self.profile, self.name) {
            (Some(profile), _) => profile.display_name(),
            (None, Some(name)) => name.to_string(),
            (None, None) => UNKNOWN_PLAYER.to_string(),
        }
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.profile.and_then(|p| p.avatar_url.as_deref())
    }
}

fn non_empty(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}

fn slot<'a>(
    role: Role,
    profile_id: Option<ProfileId>,
    name: Option<&'a str>,
    profile: Option<&'a ProfileSummary>,
) -> Option<Participant<'a>> {
    let name = non_empty(name);
    if profile_id.is_none() && name.is_none() {
        return None;
    }
    Some(Participant {
        role,
        profile_id,
        name,
        profile: profile.filter(|p| Some(p.id) == profile_id),
    })
}

/// The filled slots on one side of a match.
///
/// Empty doubles slots are skipped rather than reported, so a doubles row
/// missing its partner simply has a one-player side.
pub fn participants(linked: &LinkedMatch, side: Side) -> Vec<Participant<'_>> {
    let m = &linked.record;
    let players = &linked.players;
    let doubles = m.match_type == MatchType::Doubles;

    let slots = match side {
        Side::CreatorSide => [
            Some(Participant {
                role: Role::Creator,
                profile_id: Some(m.creator_id),
                name: None,
                profile: players
                    .creator
                    .as_ref()
                    .filter(|p| p.id == m.creator_id),
            }),
            doubles
                .then(|| {
                    slot(
                        Role::Partner,
                        m.partner_id,
                        m.partner_name.as_deref(),
                        players.partner.as_ref(),
                    )
                })
                .flatten(),
        ],
        Side::OpponentSide => [
            slot(
                Role::Opponent,
                m.opponent_id,
                Some(m.opponent_name.as_str()),
                players.opponent.as_ref(),
            ),
            doubles
                .then(|| {
                    slot(
                        Role::OpponentPartner,
                        m.opponent_partner_id,
                        m.opponent_partner_name.as_deref(),
                        players.opponent_partner.as_ref(),
                    )
                })
                .flatten(),
        ],
        Side::None => [None, None],
    };

    slots.into_iter().flatten().collect()
}

/// A match seen from one viewer's position.
#[derive(Debug, Clone, Copy)]
pub struct AnnotatedMatch<'a> {
    pub linked: &'a LinkedMatch,
    pub perspective: Perspective,
    /// Outcome for the viewer
    pub result: Option<MatchResult>,
}

impl<'a> AnnotatedMatch<'a> {
    pub fn new(linked: &'a LinkedMatch, viewer: ProfileId) -> Self {
        let perspective = resolve_perspective(&linked.record, viewer);
        Self {
            linked,
            perspective,
            result: viewer_result(linked.record.result, perspective.side),
        }
    }

    pub fn record(&self) -> &'a Match {
        &self.linked.record
    }
}

/// Annotate `matches` for `viewer`, dropping matches the viewer is not in.
///
/// Input order is kept.
pub fn annotate(matches: &[LinkedMatch], viewer: ProfileId) -> Vec<AnnotatedMatch<'_>> {
    matches
        .iter()
        .map(|m| AnnotatedMatch::new(m, viewer))
        .filter(|a| a.perspective.is_participant())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::testing::{doubles_match, singles_match};
    use uuid::Uuid;

    #[test]
    fn test_resolve_each_slot() {
        let (creator, opp, partner, opp_partner) =
            (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let m = doubles_match(
            creator,
            Some(partner),
            Some(opp),
            Some(opp_partner),
            Some(MatchResult::Win),
        );

        let cases = [
            (creator, Role::Creator, Side::CreatorSide),
            (partner, Role::Partner, Side::CreatorSide),
            (opp, Role::Opponent, Side::OpponentSide),
            (opp_partner, Role::OpponentPartner, Side::OpponentSide),
            (Uuid::new_v4(), Role::None, Side::None),
        ];
        for (viewer, role, side) in cases {
            let p = resolve_perspective(&m.record, viewer);
            assert_eq!(p.role, role);
            assert_eq!(p.side, side);
        }
    }

    #[test]
    fn test_singles_ignores_stray_partner_ids() {
        let creator = Uuid::new_v4();
        let stray = Uuid::new_v4();
        let mut m = singles_match(creator, None, Some(MatchResult::Win));
        m.record.partner_id = Some(stray);

        let p = resolve_perspective(&m.record, stray);
        assert_eq!(p.role, Role::None);
        assert!(!p.is_participant());
    }

    #[test]
    fn test_viewer_result_reorients() {
        use MatchResult::*;
        for stored in [Some(Win), Some(Loss), Some(Draw), None] {
            assert_eq!(viewer_result(stored, Side::CreatorSide), stored);
            assert_eq!(viewer_result(stored, Side::None), None);
        }
        assert_eq!(viewer_result(Some(Win), Side::OpponentSide), Some(Loss));
        assert_eq!(viewer_result(Some(Loss), Side::OpponentSide), Some(Win));
        assert_eq!(viewer_result(Some(Draw), Side::OpponentSide), Some(Draw));
        assert_eq!(viewer_result(None, Side::OpponentSide), None);
    }

    #[test]
    fn test_opponent_partner_sees_loss_for_creator_win() {
        let opp_partner = Uuid::new_v4();
        let m = doubles_match(
            Uuid::new_v4(),
            None,
            None,
            Some(opp_partner),
            Some(MatchResult::Win),
        );

        let annotated = AnnotatedMatch::new(&m, opp_partner);
        assert_eq!(annotated.perspective.role, Role::OpponentPartner);
        assert_eq!(annotated.result, Some(MatchResult::Loss));
    }

    #[test]
    fn test_participants_skip_empty_doubles_slots() {
        let creator = Uuid::new_v4();
        let mut m = doubles_match(creator, None, None, None, Some(MatchResult::Win));
        m.record.partner_name = None;
        m.record.opponent_partner_name = Some("   ".to_string());

        let mine = participants(&m, Side::CreatorSide);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].profile_id, Some(creator));

        let theirs = participants(&m, Side::OpponentSide);
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].role, Role::Opponent);
        assert!(participants(&m, Side::None).is_empty());
    }

    #[test]
    fn test_annotate_drops_outsiders() {
        let viewer = Uuid::new_v4();
        let matches = vec![
            singles_match(viewer, None, Some(MatchResult::Win)),
            singles_match(Uuid::new_v4(), None, Some(MatchResult::Win)),
            singles_match(Uuid::new_v4(), Some(viewer), Some(MatchResult::Win)),
        ];

        let annotated = annotate(&matches, viewer);
        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].result, Some(MatchResult::Win));
        assert_eq!(annotated[1].result, Some(MatchResult::Loss));
    }
}
