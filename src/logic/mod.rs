//! Tournament business logic: pairing, scheduling, result rules, standings.

pub mod match_rule;
mod pairing;
mod results;
mod roster;
mod schedule;
pub mod set_rule;
mod setup;
mod standings;

pub use match_rule::{count_set_wins, should_display, MatchRule};
pub use pairing::{generate_pairing_table, PairingTable};
pub use results::record_result;
pub use roster::read_roster_csv;
pub use schedule::build_rounds;
pub use setup::{create_schedule, shuffle_roster};
pub use standings::{compute_standings, refresh_player_stats, standings_to_csv, StandingsRow};
