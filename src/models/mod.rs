//! Data structures for the round-robin tournament: players, matches, rounds, tournament.

mod document;
mod game;
mod player;
mod round;
mod tournament;

pub use document::{
    from_json, to_json, MatchDocument, PlayerDocument, RoundDocument, TournamentDocument,
};
pub use game::{GameMatch, MatchReport, SetMap, SetScore, Side};
pub use player::{Player, PlayerId, PlayerStats};
pub use round::Round;
pub use tournament::{normalize_name, Tournament, TournamentError, TournamentId};
