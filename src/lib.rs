//! Round-robin tournament manager: library with models, scheduling and standings logic.

pub mod library;
pub mod logic;
pub mod models;

pub use library::{TournamentLibrary, TournamentSummary};
pub use logic::{
    build_rounds, compute_standings, create_schedule, generate_pairing_table, read_roster_csv,
    record_result, refresh_player_stats, should_display, shuffle_roster, standings_to_csv,
    MatchRule, PairingTable, StandingsRow,
};
pub use models::{
    from_json, to_json, GameMatch, MatchReport, Player, PlayerId, PlayerStats, Round, SetMap,
    SetScore, Side, Tournament, TournamentDocument, TournamentError, TournamentId,
};
