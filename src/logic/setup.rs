//! Setup: validate the configuration and build the full schedule.

use crate::logic::pairing::generate_pairing_table;
use crate::logic::schedule::build_rounds;
use crate::models::{normalize_name, Player, Tournament, TournamentError};
use rand::seq::SliceRandom;

/// Create a tournament with its complete round-robin schedule.
///
/// Requires at least 2 players, an odd positive `best_of` and unique
/// (case-insensitive) non-empty names. Roster order is kept as given.
pub fn create_schedule<S: AsRef<str>>(
    name: &str,
    player_names: &[S],
    best_of: u32,
    include_set_results: bool,
) -> Result<Tournament, TournamentError> {
    let name = normalize_name(name)?;
    if player_names.len() < 2 {
        return Err(TournamentError::InvalidConfiguration(format!(
            "need at least 2 players, got {}",
            player_names.len()
        )));
    }
    if best_of == 0 || best_of % 2 == 0 {
        return Err(TournamentError::InvalidConfiguration(format!(
            "best_of must be odd and positive, got {}",
            best_of
        )));
    }

    let mut players: Vec<Player> = Vec::with_capacity(player_names.len());
    for raw in player_names {
        let player_name = normalize_name(raw.as_ref())?;
        if players.iter().any(|p| p.has_name(&player_name)) {
            return Err(TournamentError::DuplicateName(player_name));
        }
        players.push(Player::new(player_name));
    }

    let table = generate_pairing_table(players.len())?;
    let rounds = build_rounds(&players, &table, include_set_results);
    log::info!(
        "Created tournament '{}': {} players, {} rounds, best of {}",
        name,
        players.len(),
        rounds.len(),
        best_of
    );

    let mut tournament = Tournament::new(name, players, best_of, include_set_results);
    tournament.rounds = rounds;
    Ok(tournament)
}

/// Draw a random roster order before scheduling.
pub fn shuffle_roster<S>(names: &mut [S]) {
    names.shuffle(&mut rand::thread_rng());
}
