//! Standings: per-player statistics and the ranked table.

use crate::logic::match_rule::MatchRule;
use crate::models::{PlayerStats, Side, Tournament, TournamentError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One line of the standings table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    /// 1-based position.
    pub rank: usize,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub sets_for: u32,
    pub sets_against: u32,
    pub points: u32,
}

/// Recompute every player's stats from scratch out of the match results.
///
/// Set counts are added for every match, finished or not; played/won/lost and
/// points only for finished matches.
pub fn refresh_player_stats(tournament: &mut Tournament) {
    let rule = MatchRule::new(tournament.best_of);
    let mut stats: HashMap<_, PlayerStats> = tournament
        .players
        .iter()
        .map(|p| (p.id, PlayerStats::default()))
        .collect();

    for game in tournament.matches() {
        if let Some(s) = stats.get_mut(&game.player_1) {
            s.add_sets(game.player_1_sets, game.player_2_sets);
        }
        if let Some(s) = stats.get_mut(&game.player_2) {
            s.add_sets(game.player_2_sets, game.player_1_sets);
        }
        let (winner, loser) = match rule.winner(game) {
            Some(Side::One) => (game.player_1, game.player_2),
            Some(Side::Two) => (game.player_2, game.player_1),
            None => continue,
        };
        if let Some(s) = stats.get_mut(&winner) {
            s.add_win();
        }
        if let Some(s) = stats.get_mut(&loser) {
            s.add_loss();
        }
    }

    for p in &mut tournament.players {
        p.stats = stats.remove(&p.id).unwrap_or_default();
    }
}

/// Ranking order: points, wins and sets won descending, then losses ascending,
/// then set difference descending, then name ascending.
fn rank_order(a: (&str, &PlayerStats), b: (&str, &PlayerStats)) -> Ordering {
    let (name_a, a) = a;
    let (name_b, b) = b;
    b.points
        .cmp(&a.points)
        .then(b.won.cmp(&a.won))
        .then(b.sets_for.cmp(&a.sets_for))
        .then(a.lost.cmp(&b.lost))
        .then(b.set_difference().cmp(&a.set_difference()))
        .then_with(|| name_a.cmp(name_b))
}

/// Refresh player stats and return the ranked standings table.
///
/// Safe to call repeatedly; the result depends only on the current match results.
pub fn compute_standings(tournament: &mut Tournament) -> Vec<StandingsRow> {
    refresh_player_stats(tournament);

    let mut ranked: Vec<_> = tournament.players.iter().collect();
    ranked.sort_by(|a, b| rank_order((a.name.as_str(), &a.stats), (b.name.as_str(), &b.stats)));
    ranked
        .into_iter()
        .enumerate()
        .map(|(i, p)| StandingsRow {
            rank: i + 1,
            name: p.name.clone(),
            played: p.stats.played,
            won: p.stats.won,
            lost: p.stats.lost,
            sets_for: p.stats.sets_for,
            sets_against: p.stats.sets_against,
            points: p.stats.points,
        })
        .collect()
}

/// Standings as CSV with a header row.
pub fn standings_to_csv(rows: &[StandingsRow]) -> Result<String, TournamentError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TournamentError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TournamentError::Csv(e.to_string()))
}
