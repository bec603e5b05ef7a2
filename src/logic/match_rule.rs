//! Match rules for a best-of-N format.

use crate::logic::set_rule;
use crate::models::{GameMatch, PlayerId, SetMap, Side};

/// Whether a result should be shown at all.
///
/// A 0-0 match is indistinguishable from one never touched, so it is hidden.
pub fn should_display(game: &GameMatch) -> bool {
    game.player_1_sets != 0 || game.player_2_sets != 0
}

/// Sets won by each player according to the finished sets in `sets`.
pub fn count_set_wins(sets: &SetMap) -> (u32, u32) {
    sets.values()
        .fold((0, 0), |(p1, p2), set| match set_rule::winner(set) {
            Some(Side::One) => (p1 + 1, p2),
            Some(Side::Two) => (p1, p2 + 1),
            None => (p1, p2),
        })
}

/// Rules for matches decided by the first player to win `best_of / 2 + 1` sets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchRule {
    pub best_of: u32,
}

impl MatchRule {
    pub fn new(best_of: u32) -> Self {
        Self { best_of }
    }

    pub fn sets_to_win(&self) -> u32 {
        self.best_of / 2 + 1
    }

    /// A 0-0 match counts as not started, never as finished.
    pub fn is_finished(&self, game: &GameMatch) -> bool {
        if !should_display(game) {
            return false;
        }
        let needed = self.sets_to_win();
        game.player_1_sets >= needed || game.player_2_sets >= needed
    }

    /// Winner of a finished match.
    pub fn winner(&self, game: &GameMatch) -> Option<Side> {
        if self.is_finished(game) {
            game.leader()
        } else {
            None
        }
    }

    /// Check a (possibly unfinished) result against the set rules and the best-of limit.
    pub fn is_valid(&self, game: &GameMatch) -> bool {
        if !game.sets.values().all(set_rule::is_valid) {
            return false;
        }
        if game.include_set_results {
            let derived = count_set_wins(&game.sets);
            if derived != (game.player_1_sets, game.player_2_sets) {
                return false;
            }
        }

        let needed = self.sets_to_win();
        let (high, low) = (
            game.player_1_sets.max(game.player_2_sets),
            game.player_1_sets.min(game.player_2_sets),
        );
        if high > needed {
            return false;
        }
        // Once someone has clinched, the opponent cannot be level.
        high < needed || low < high
    }

    /// Build a match result for the two players from a caller's input.
    ///
    /// With per-set tracking the set counts come from `sets` alone and the
    /// declared counts are ignored; otherwise the declared counts are used,
    /// defaulting to 0.
    pub fn generate_result(
        &self,
        player_1: PlayerId,
        player_2: PlayerId,
        player_1_sets: Option<u32>,
        player_2_sets: Option<u32>,
        sets: SetMap,
        include_set_results: bool,
    ) -> GameMatch {
        let (player_1_sets, player_2_sets) = if include_set_results {
            count_set_wins(&sets)
        } else {
            (player_1_sets.unwrap_or(0), player_2_sets.unwrap_or(0))
        };
        GameMatch {
            player_1,
            player_2,
            player_1_sets,
            player_2_sets,
            include_set_results,
            sets,
        }
    }
}
