//! Round-robin pairing table (circle method).

use crate::models::TournamentError;

/// For every pair of player indices, the 0-based round in which they meet.
///
/// Only the upper triangle (`i < j`) is stored; lookups are symmetric.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PairingTable {
    players: usize,
    rounds: usize,
    /// Row-major `players x players`; `None` below the diagonal and on it.
    cells: Vec<Option<usize>>,
}

impl PairingTable {
    /// Number of real players (the virtual bye slot is never included).
    pub fn player_count(&self) -> usize {
        self.players
    }

    pub fn round_count(&self) -> usize {
        self.rounds
    }

    /// Round in which players `a` and `b` meet, in either order.
    pub fn round_of(&self, a: usize, b: usize) -> Option<usize> {
        if a == b || a >= self.players || b >= self.players {
            return None;
        }
        let (i, j) = (a.min(b), a.max(b));
        self.cells[i * self.players + j]
    }

    /// Index pairs `(i, j)` with `i < j` scheduled for `round`, by ascending `i` then `j`.
    pub fn pairs_in_round(&self, round: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.players;
        (0..n)
            .flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
            .filter(move |&(i, j)| self.cells[i * n + j] == Some(round))
    }

    /// Player index with no match in `round` (odd player counts only).
    pub fn bye_in_round(&self, round: usize) -> Option<usize> {
        let mut used = vec![false; self.players];
        for (i, j) in self.pairs_in_round(round) {
            used[i] = true;
            used[j] = true;
        }
        used.iter().position(|u| !u)
    }
}

/// Generate the pairing table for `n` players.
///
/// Odd counts are padded with a virtual bye player at index `n`; its pairings
/// are dropped, which leaves exactly one real player unmatched per round.
/// Slot 0 stays fixed while the other slots rotate right by one each round.
pub fn generate_pairing_table(n: usize) -> Result<PairingTable, TournamentError> {
    if n < 2 {
        return Err(TournamentError::InvalidConfiguration(format!(
            "need at least 2 players, got {}",
            n
        )));
    }

    let padded = if n % 2 == 1 { n + 1 } else { n };
    let rounds = padded - 1;
    let mut cells = vec![None; n * n];
    let mut slots: Vec<usize> = (0..padded).collect();

    for round in 0..rounds {
        for c in 0..padded / 2 {
            let a = slots[c];
            let b = slots[padded - 1 - c];
            let (i, j) = (a.min(b), a.max(b));
            // j == n is the virtual bye player.
            if j < n {
                cells[i * n + j] = Some(round);
            }
        }
        slots[1..].rotate_right(1);
    }

    Ok(PairingTable {
        players: n,
        rounds,
        cells,
    })
}
