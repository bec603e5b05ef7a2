//! Match (game), per-set scores, and the raw result report entered by a caller.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which side of a match (or set) won.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

/// Points scored by each player in one set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub player_1_points: u32,
    pub player_2_points: u32,
}

impl SetScore {
    pub fn new(player_1_points: u32, player_2_points: u32) -> Self {
        Self {
            player_1_points,
            player_2_points,
        }
    }

    /// Same set seen from the other player's side.
    pub fn swapped(self) -> Self {
        Self::new(self.player_2_points, self.player_1_points)
    }
}

/// Ordered set detail of a match: 0-based set index -> score.
pub type SetMap = BTreeMap<usize, SetScore>;

/// A scheduled pairing between two players and its current result.
///
/// `player_1_sets` / `player_2_sets` are set-win counts, not points. A match at
/// 0-0 is treated as not started.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameMatch {
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub player_1_sets: u32,
    pub player_2_sets: u32,
    /// Whether per-set scores are tracked (and must agree with the set counts).
    pub include_set_results: bool,
    pub sets: SetMap,
}

impl GameMatch {
    /// Unplayed match between two players.
    pub fn new(player_1: PlayerId, player_2: PlayerId, include_set_results: bool) -> Self {
        Self {
            player_1,
            player_2,
            player_1_sets: 0,
            player_2_sets: 0,
            include_set_results,
            sets: SetMap::new(),
        }
    }

    /// True if this match is between `a` and `b`, in either order.
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.player_1 == a && self.player_2 == b) || (self.player_1 == b && self.player_2 == a)
    }

    pub fn involves(&self, id: PlayerId) -> bool {
        self.player_1 == id || self.player_2 == id
    }

    /// Side ahead on sets, if any.
    pub fn leader(&self) -> Option<Side> {
        match self.player_1_sets.cmp(&self.player_2_sets) {
            std::cmp::Ordering::Greater => Some(Side::One),
            std::cmp::Ordering::Less => Some(Side::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Overwrite the result fields with those of `result` (players stay as scheduled).
    pub fn replace_result(&mut self, result: GameMatch) {
        self.player_1_sets = result.player_1_sets;
        self.player_2_sets = result.player_2_sets;
        self.include_set_results = result.include_set_results;
        self.sets = result.sets;
    }
}

/// Raw result input for one match, as entered by a caller.
///
/// Missing declared scores count as 0. Declared scores are ignored when the
/// tournament tracks per-set results.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    #[serde(default)]
    pub player_1_sets: Option<u32>,
    #[serde(default)]
    pub player_2_sets: Option<u32>,
    #[serde(default)]
    pub sets: SetMap,
}

impl MatchReport {
    /// Report with declared set counts only.
    pub fn declared(player_1_sets: u32, player_2_sets: u32) -> Self {
        Self {
            player_1_sets: Some(player_1_sets),
            player_2_sets: Some(player_2_sets),
            sets: SetMap::new(),
        }
    }

    /// Report with per-set points, indexed in order from 0.
    pub fn with_sets(scores: &[(u32, u32)]) -> Self {
        Self {
            player_1_sets: None,
            player_2_sets: None,
            sets: scores
                .iter()
                .enumerate()
                .map(|(i, &(p1, p2))| (i, SetScore::new(p1, p2)))
                .collect(),
        }
    }

    /// Same report with players 1 and 2 exchanged.
    pub fn swapped(self) -> Self {
        Self {
            player_1_sets: self.player_2_sets,
            player_2_sets: self.player_1_sets,
            sets: self
                .sets
                .into_iter()
                .map(|(i, set)| (i, set.swapped()))
                .collect(),
        }
    }
}
