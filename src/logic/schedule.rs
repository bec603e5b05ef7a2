//! Build the list of rounds from the pairing table and the roster.

use crate::logic::pairing::PairingTable;
use crate::models::{GameMatch, Player, Round};

/// One round per table round, numbered from 1.
///
/// Each pair `(i, j)` meeting in a round becomes an unplayed match with
/// `players[i]` as player 1. The player index left uncovered is the round's bye.
pub fn build_rounds(players: &[Player], table: &PairingTable, include_set_results: bool) -> Vec<Round> {
    debug_assert_eq!(players.len(), table.player_count());
    (0..table.round_count())
        .map(|r| {
            let matches = table
                .pairs_in_round(r)
                .map(|(i, j)| GameMatch::new(players[i].id, players[j].id, include_set_results))
                .collect();
            let bye = table.bye_in_round(r).map(|i| players[i].id);
            Round::new(r as u32 + 1, matches, bye)
        })
        .collect()
}
