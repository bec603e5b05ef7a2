//! In-memory collection of saved tournaments, owned by the caller.
//!
//! Tournament names are unique within a library (case-insensitive).

use crate::models::{from_json, normalize_name, to_json, Tournament, TournamentError, TournamentId};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// List view of a saved tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub players: usize,
    pub rounds: usize,
    pub best_of: u32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl TournamentSummary {
    fn of(t: &Tournament) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            players: t.players.len(),
            rounds: t.rounds.len(),
            best_of: t.best_of,
            created_at: t.created_at,
            modified_at: t.modified_at,
        }
    }
}

struct LibraryEntry {
    tournament: Tournament,
    last_accessed: DateTime<Utc>,
}

#[derive(Default)]
pub struct TournamentLibrary {
    entries: HashMap<TournamentId, LibraryEntry>,
}

impl TournamentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn name_taken(&self, name: &str, except: Option<TournamentId>) -> bool {
        self.entries
            .values()
            .any(|e| Some(e.tournament.id) != except && e.tournament.name.eq_ignore_ascii_case(name))
    }

    /// Add a tournament; its name must not be used by another saved tournament.
    pub fn insert(&mut self, tournament: Tournament) -> Result<TournamentId, TournamentError> {
        if self.name_taken(&tournament.name, None) {
            return Err(TournamentError::NameConflict(tournament.name));
        }
        let id = tournament.id;
        log::info!("Saved tournament '{}' ({})", tournament.name, id);
        self.entries.insert(
            id,
            LibraryEntry {
                tournament,
                last_accessed: Utc::now(),
            },
        );
        Ok(id)
    }

    pub fn get(&self, id: TournamentId) -> Option<&Tournament> {
        self.entries.get(&id).map(|e| &e.tournament)
    }

    /// Mutable access; counts as activity for [`Self::evict_idle`].
    pub fn get_mut(&mut self, id: TournamentId) -> Option<&mut Tournament> {
        self.entries.get_mut(&id).map(|e| {
            e.last_accessed = Utc::now();
            &mut e.tournament
        })
    }

    /// Like [`Self::get_mut`] but unknown ids are an error.
    pub fn require_mut(&mut self, id: TournamentId) -> Result<&mut Tournament, TournamentError> {
        self.get_mut(id).ok_or(TournamentError::TournamentNotFound(id))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Tournament> {
        let name = name.trim();
        self.entries
            .values()
            .map(|e| &e.tournament)
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// All tournaments, sorted by name. Listing does not count as activity.
    pub fn list(&self) -> Vec<TournamentSummary> {
        self.search("")
    }

    /// Tournaments whose name contains `query` (case-insensitive), sorted by name.
    pub fn search(&self, query: &str) -> Vec<TournamentSummary> {
        let query = query.trim().to_lowercase();
        let mut found: Vec<_> = self
            .entries
            .values()
            .filter(|e| e.tournament.name.to_lowercase().contains(&query))
            .map(|e| TournamentSummary::of(&e.tournament))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    pub fn remove(&mut self, id: TournamentId) -> Result<Tournament, TournamentError> {
        let entry = self
            .entries
            .remove(&id)
            .ok_or(TournamentError::TournamentNotFound(id))?;
        log::info!("Deleted tournament '{}' ({})", entry.tournament.name, id);
        Ok(entry.tournament)
    }

    /// Rename a tournament. Renaming to its own name (any case) is allowed.
    pub fn rename(&mut self, id: TournamentId, new_name: &str) -> Result<(), TournamentError> {
        let new_name = normalize_name(new_name)?;
        if !self.entries.contains_key(&id) {
            return Err(TournamentError::TournamentNotFound(id));
        }
        if self.name_taken(&new_name, Some(id)) {
            return Err(TournamentError::NameConflict(new_name));
        }
        let t = self.require_mut(id)?;
        log::info!("Renaming tournament '{}' to '{}'", t.name, new_name);
        t.name = new_name;
        t.touch();
        Ok(())
    }

    /// When the tournament was last accessed through [`Self::get_mut`].
    pub fn last_accessed(&self, id: TournamentId) -> Option<DateTime<Utc>> {
        self.entries.get(&id).map(|e| e.last_accessed)
    }

    /// Export as JSON. Counts as activity, so backed-up tournaments are not evicted.
    pub fn export_json(&mut self, id: TournamentId) -> Result<String, TournamentError> {
        let t = self.require_mut(id)?;
        to_json(t)
    }

    /// Read a tournament from JSON and add it.
    ///
    /// A tournament already in the library under the same id is replaced, even
    /// if the imported copy was renamed. Clashing with the name of a different
    /// tournament is a `NameConflict`.
    pub fn import_json(&mut self, json: &str) -> Result<TournamentId, TournamentError> {
        let tournament = from_json(json)?;
        if self.name_taken(&tournament.name, Some(tournament.id)) {
            return Err(TournamentError::NameConflict(tournament.name));
        }
        self.entries.remove(&tournament.id);
        self.insert(tournament)
    }

    /// Drop tournaments not accessed within `max_idle`; returns how many were removed.
    pub fn evict_idle(&mut self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let before = self.entries.len();
        self.entries.retain(|_, e| e.last_accessed >= cutoff);
        let removed = before - self.entries.len();
        if removed > 0 {
            log::warn!("Evicted {} idle tournament(s)", removed);
        }
        removed
    }
}
