//! Round: the matches scheduled together plus the player sitting out.

use crate::models::game::GameMatch;
use crate::models::player::PlayerId;

/// One round of the round-robin schedule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Round {
    /// 1-based sequence number.
    pub number: u32,
    /// Fixed at build time; results are edited in place.
    pub matches: Vec<GameMatch>,
    /// Player with no opponent this round (odd player counts only).
    pub bye: Option<PlayerId>,
}

impl Round {
    pub fn new(number: u32, matches: Vec<GameMatch>, bye: Option<PlayerId>) -> Self {
        Self {
            number,
            matches,
            bye,
        }
    }

    /// Match between `a` and `b` in this round, in either order.
    pub fn find_match(&self, a: PlayerId, b: PlayerId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.is_between(a, b))
    }

    pub fn find_match_mut(&mut self, a: PlayerId, b: PlayerId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.is_between(a, b))
    }

    /// True if the player has a match or the bye in this round.
    pub fn includes(&self, id: PlayerId) -> bool {
        self.bye == Some(id) || self.matches.iter().any(|m| m.involves(id))
    }
}
