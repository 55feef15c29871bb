//! Tournament, TournamentStatus and the engine error type.

use crate::models::club::ClubId;
use crate::models::game::{Match, MatchId};
use crate::models::player::Player;
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Referenced match or tournament id is absent (stale client view).
    #[error("{what} not found")]
    NotFound { what: &'static str, id: Uuid },
    /// Tournament is not in a phase that allows this action.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    /// Rejected input: negative scores, bad team counts, empty names.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl TournamentError {
    pub fn tournament_not_found(id: TournamentId) -> Self {
        TournamentError::NotFound {
            what: "tournament",
            id,
        }
    }

    pub fn match_not_found(id: MatchId) -> Self {
        TournamentError::NotFound { what: "match", id }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Persisted lifecycle status.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Not reachable today: tournaments are created already in progress.
    #[default]
    Setup,
    InProgress,
    /// Final scored; the snapshot is read-only from here on.
    Completed,
}

/// Finer-grained phase, derived from data presence rather than stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    Setup,
    /// Round-robin matches are still being played (no final yet).
    RoundRobin,
    /// Final match exists and awaits its score.
    FinalPending,
    Completed,
}

/// Full tournament snapshot. Replaced wholesale on every mutation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub club_id: ClubId,
    /// Players selected at creation (value copies).
    pub players: Vec<Player>,
    /// Teams formed at creation (value copies).
    pub teams: Vec<Team>,
    /// Round-robin matches, in generation order.
    pub matches: Vec<Match>,
    /// Absent until every round-robin match is completed.
    pub final_match: Option<Match>,
    pub winner_id: Option<TeamId>,
    pub runner_up_id: Option<TeamId>,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a tournament in progress with the given rosters and round-robin matches.
    pub fn new(
        name: impl Into<String>,
        club_id: ClubId,
        players: Vec<Player>,
        teams: Vec<Team>,
        matches: Vec<Match>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            club_id,
            players,
            teams,
            matches,
            final_match: None,
            winner_id: None,
            runner_up_id: None,
            status: TournamentStatus::InProgress,
            created_at: Utc::now(),
        }
    }

    pub fn phase(&self) -> TournamentPhase {
        match (self.status, &self.final_match) {
            (TournamentStatus::Setup, _) => TournamentPhase::Setup,
            (TournamentStatus::Completed, _) => TournamentPhase::Completed,
            (TournamentStatus::InProgress, None) => TournamentPhase::RoundRobin,
            (TournamentStatus::InProgress, Some(_)) => TournamentPhase::FinalPending,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TournamentStatus::Completed
    }

    /// True when every round-robin match has a result.
    pub fn is_round_robin_complete(&self) -> bool {
        self.matches.iter().all(Match::is_completed)
    }

    /// Number of round-robin matches with a result.
    pub fn completed_match_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_completed()).count()
    }

    pub fn find_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Champion team, once the final is scored.
    pub fn winner(&self) -> Option<&Team> {
        self.winner_id.and_then(|id| self.team(id))
    }

    pub fn runner_up(&self) -> Option<&Team> {
        self.runner_up_id.and_then(|id| self.team(id))
    }
}
