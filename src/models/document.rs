//! Plain structural form of a tournament for JSON export/import.
//!
//! Matches and byes name their players instead of carrying ids. Reading a
//! document back is two-pass: the players are materialized first, then every
//! match and bye is resolved by name into those players, so the rebuilt
//! schedule refers to the roster entries themselves and not to copies.
//! Names are matched ignoring ASCII case, the same rule the roster uses.

use crate::logic::MatchRule;
use crate::models::game::{GameMatch, SetMap};
use crate::models::player::{Player, PlayerId, PlayerStats};
use crate::models::round::Round;
use crate::models::tournament::{Tournament, TournamentError, TournamentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerDocument {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub stats: PlayerStats,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchDocument {
    pub player_1: String,
    pub player_2: String,
    pub player_1_sets: u32,
    pub player_2_sets: u32,
    pub include_set_results: bool,
    #[serde(default)]
    pub sets: SetMap,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundDocument {
    pub number: u32,
    pub bye: Option<String>,
    pub matches: Vec<MatchDocument>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentDocument {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub best_of: u32,
    pub include_set_results: bool,
    pub players: Vec<PlayerDocument>,
    pub rounds: Vec<RoundDocument>,
}

impl From<Tournament> for TournamentDocument {
    fn from(t: Tournament) -> Self {
        let rounds = t
            .rounds
            .iter()
            .map(|r| RoundDocument {
                number: r.number,
                bye: r.bye.map(|id| t.player_name(id).to_string()),
                matches: r
                    .matches
                    .iter()
                    .map(|m| MatchDocument {
                        player_1: t.player_name(m.player_1).to_string(),
                        player_2: t.player_name(m.player_2).to_string(),
                        player_1_sets: m.player_1_sets,
                        player_2_sets: m.player_2_sets,
                        include_set_results: m.include_set_results,
                        sets: m.sets.clone(),
                    })
                    .collect(),
            })
            .collect();
        let players = t
            .players
            .into_iter()
            .map(|p| PlayerDocument {
                id: p.id,
                name: p.name,
                stats: p.stats,
            })
            .collect();
        Self {
            id: t.id,
            name: t.name,
            created_at: t.created_at,
            modified_at: t.modified_at,
            best_of: t.best_of,
            include_set_results: t.include_set_results,
            players,
            rounds,
        }
    }
}

impl TryFrom<TournamentDocument> for Tournament {
    type Error = TournamentError;

    fn try_from(doc: TournamentDocument) -> Result<Self, Self::Error> {
        if doc.players.len() < 2 {
            return Err(TournamentError::InvalidDocument("need at least 2 players".into()));
        }
        if doc.best_of == 0 || doc.best_of % 2 == 0 {
            return Err(TournamentError::InvalidDocument(format!(
                "best_of must be odd and positive, got {}",
                doc.best_of
            )));
        }

        // Pass 1: the roster.
        let mut by_name: HashMap<String, PlayerId> = HashMap::with_capacity(doc.players.len());
        let mut ids = HashSet::with_capacity(doc.players.len());
        let mut players = Vec::with_capacity(doc.players.len());
        for p in doc.players {
            if !ids.insert(p.id) {
                return Err(TournamentError::InvalidDocument(format!(
                    "duplicate player id {}",
                    p.id
                )));
            }
            if by_name.insert(p.name.to_ascii_lowercase(), p.id).is_some() {
                return Err(TournamentError::InvalidDocument(format!(
                    "duplicate player '{}'",
                    p.name
                )));
            }
            players.push(Player {
                id: p.id,
                name: p.name,
                stats: p.stats,
            });
        }

        // Pass 2: rounds, resolving every player reference into the roster.
        let resolve = |name: &str| -> Result<PlayerId, TournamentError> {
            by_name
                .get(&name.to_ascii_lowercase())
                .copied()
                .ok_or_else(|| TournamentError::InvalidDocument(format!("unknown player '{}'", name)))
        };
        let rule = MatchRule::new(doc.best_of);
        let mut rounds = Vec::with_capacity(doc.rounds.len());
        for r in doc.rounds {
            let bye = r.bye.as_deref().map(&resolve).transpose()?;
            let mut matches = Vec::with_capacity(r.matches.len());
            for m in r.matches {
                let game = GameMatch {
                    player_1: resolve(&m.player_1)?,
                    player_2: resolve(&m.player_2)?,
                    player_1_sets: m.player_1_sets,
                    player_2_sets: m.player_2_sets,
                    include_set_results: m.include_set_results,
                    sets: m.sets,
                };
                if game.player_1 == game.player_2 {
                    return Err(TournamentError::InvalidDocument(format!(
                        "'{}' is scheduled against themselves in round {}",
                        m.player_1, r.number
                    )));
                }
                if !rule.is_valid(&game) {
                    return Err(TournamentError::InvalidDocument(format!(
                        "invalid result {}-{} for {} vs {} in round {}",
                        game.player_1_sets, game.player_2_sets, m.player_1, m.player_2, r.number
                    )));
                }
                matches.push(game);
            }
            rounds.push(Round::new(r.number, matches, bye));
        }

        Ok(Tournament {
            id: doc.id,
            name: doc.name,
            created_at: doc.created_at,
            modified_at: doc.modified_at,
            players,
            rounds,
            best_of: doc.best_of,
            include_set_results: doc.include_set_results,
        })
    }
}

/// Serialize a tournament to JSON.
pub fn to_json(tournament: &Tournament) -> Result<String, TournamentError> {
    serde_json::to_string_pretty(tournament).map_err(|e| TournamentError::InvalidDocument(e.to_string()))
}

/// Read a tournament back from JSON produced by [`to_json`].
pub fn from_json(json: &str) -> Result<Tournament, TournamentError> {
    serde_json::from_str(json).map_err(|e| TournamentError::InvalidDocument(e.to_string()))
}
