//! Tournament and TournamentError.

use crate::models::document::TournamentDocument;
use crate::models::game::GameMatch;
use crate::models::player::{Player, PlayerId};
use crate::models::round::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
///
/// All of them are recoverable: the operation that failed left the tournament unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Bad player count, best-of value or empty name at creation time.
    InvalidConfiguration(String),
    /// Two players share a name (names are unique, case-insensitive).
    DuplicateName(String),
    /// The requested pairing is not in the schedule.
    MatchNotFound { player_1: String, player_2: String },
    /// Entered scores or sets break the match rules; previous result kept.
    InvalidResult,
    /// Rename target already used by another player or tournament.
    NameConflict(String),
    PlayerNotFound(PlayerId),
    TournamentNotFound(TournamentId),
    /// Serialized tournament could not be read back.
    InvalidDocument(String),
    /// Roster import or standings export failed.
    Csv(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidConfiguration(reason) => {
                write!(f, "Invalid tournament configuration: {}", reason)
            }
            TournamentError::DuplicateName(name) => {
                write!(f, "A player named '{}' already exists", name)
            }
            TournamentError::MatchNotFound { player_1, player_2 } => {
                write!(f, "No match between '{}' and '{}' in the schedule", player_1, player_2)
            }
            TournamentError::InvalidResult => write!(f, "Result is not valid under the tournament rules"),
            TournamentError::NameConflict(name) => write!(f, "The name '{}' is already in use", name),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::TournamentNotFound(_) => write!(f, "No tournament"),
            TournamentError::InvalidDocument(reason) => write!(f, "Invalid tournament data: {}", reason),
            TournamentError::Csv(reason) => write!(f, "CSV error: {}", reason),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<csv::Error> for TournamentError {
    fn from(e: csv::Error) -> Self {
        TournamentError::Csv(e.to_string())
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Trim a player or tournament name; empty names are rejected.
pub fn normalize_name(name: &str) -> Result<String, TournamentError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::InvalidConfiguration("name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Full round-robin tournament: roster, schedule and configuration.
///
/// Matches and byes refer to players by id, so `players` is the single owner of
/// each player's name and stats. Serializes through [`TournamentDocument`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(into = "TournamentDocument", try_from = "TournamentDocument")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    /// Display/index order; fixed after creation.
    pub players: Vec<Player>,
    /// Built once at creation.
    pub rounds: Vec<Round>,
    /// Odd number of sets that decide a match.
    pub best_of: u32,
    pub include_set_results: bool,
}

impl Tournament {
    /// Tournament with the given roster and no rounds yet.
    pub fn new(
        name: impl Into<String>,
        players: Vec<Player>,
        best_of: u32,
        include_set_results: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now,
            modified_at: now,
            players,
            rounds: Vec::new(),
            best_of,
            include_set_results,
        }
    }

    /// Sets a player needs to win the match.
    pub fn sets_to_win(&self) -> u32 {
        self.best_of / 2 + 1
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Look up a player by name (case-insensitive).
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.has_name(name))
    }

    /// Name of a player id, or "" if it is not on the roster.
    pub fn player_name(&self, id: PlayerId) -> &str {
        self.player(id).map(|p| p.name.as_str()).unwrap_or_default()
    }

    /// Round by 1-based number.
    pub fn round(&self, number: u32) -> Option<&Round> {
        self.rounds.iter().find(|r| r.number == number)
    }

    pub fn round_mut(&mut self, number: u32) -> Option<&mut Round> {
        self.rounds.iter_mut().find(|r| r.number == number)
    }

    /// All matches across all rounds, in round order.
    pub fn matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }

    /// Record that the tournament changed now.
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Rename a player. Every round sees the new name since matches hold ids.
    pub fn rename_player(&mut self, player_id: PlayerId, new_name: &str) -> Result<(), TournamentError> {
        let new_name = normalize_name(new_name)?;
        if self.player(player_id).is_none() {
            return Err(TournamentError::PlayerNotFound(player_id));
        }
        let taken = self
            .players
            .iter()
            .any(|p| p.id != player_id && p.has_name(&new_name));
        if taken {
            return Err(TournamentError::NameConflict(new_name));
        }
        let p = self
            .player_mut(player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        log::info!("Renaming player '{}' to '{}'", p.name, new_name);
        p.name = new_name;
        self.touch();
        Ok(())
    }
}
