//! Player and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches, byes and lookups).
pub type PlayerId = Uuid;

/// Aggregated standings statistics for a player.
///
/// Always rebuilt wholesale from match results by the standings calculation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Finished matches played.
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    /// Sets won, counting unfinished matches too.
    pub sets_for: u32,
    pub sets_against: u32,
    pub points: u32,
}

impl PlayerStats {
    /// Points awarded for a won match.
    pub const POINTS_PER_WIN: u32 = 2;

    /// Sets won minus sets lost.
    pub fn set_difference(&self) -> i64 {
        i64::from(self.sets_for) - i64::from(self.sets_against)
    }

    /// Add the set-win counts of one match (own sets first).
    pub fn add_sets(&mut self, own: u32, opponent: u32) {
        self.sets_for += own;
        self.sets_against += opponent;
    }

    /// Record a finished match won.
    pub fn add_win(&mut self) {
        self.played += 1;
        self.won += 1;
        self.points += Self::POINTS_PER_WIN;
    }

    /// Record a finished match lost.
    pub fn add_loss(&mut self) {
        self.played += 1;
        self.lost += 1;
    }
}

/// A player in the tournament.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub stats: PlayerStats,
}

impl Player {
    /// Create a new player with the given name and zeroed stats.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            stats: PlayerStats::default(),
        }
    }

    /// Case-insensitive name comparison (lookup semantics).
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}
