//! Durable keyed storage for clubs, players and tournaments.
//!
//! The engine only needs whole-snapshot reads and writes of tournaments; callers
//! fetch, apply one transition, then replace. Concurrent writers are not
//! coordinated: the last `replace` wins.

mod memory;

pub use memory::MemoryStore;

use crate::models::{Club, ClubId, Player, Tournament, TournamentId};
use thiserror::Error;

/// Result alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access snapshot file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot (de)serialize snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Tournament snapshots keyed by id.
pub trait TournamentRepository: Send + Sync {
    /// Latest known snapshot, `None` if the id is unknown.
    fn fetch_current(&self, id: TournamentId) -> StoreResult<Option<Tournament>>;
    /// Unconditional whole-record overwrite.
    fn replace(&self, id: TournamentId, tournament: Tournament) -> StoreResult<()>;
    /// Store a freshly created tournament under `club_id` and return its id.
    fn create(&self, club_id: ClubId, tournament: Tournament) -> StoreResult<TournamentId>;
    /// Tournaments of one club (or all when `None`), newest first.
    fn list_tournaments(&self, club_id: Option<ClubId>) -> StoreResult<Vec<Tournament>>;
    /// Returns whether a record was removed.
    fn delete_tournament(&self, id: TournamentId) -> StoreResult<bool>;
}

/// Club accounts and their player rosters.
pub trait ClubDirectory: Send + Sync {
    fn list_clubs(&self) -> StoreResult<Vec<Club>>;
    fn find_club(&self, id: ClubId) -> StoreResult<Option<Club>>;
    /// Insert or overwrite by id.
    fn save_club(&self, club: Club) -> StoreResult<()>;
    /// Insert or overwrite by id unless another club already has the name
    /// (case-insensitive). Check and write are atomic. Returns whether it was saved.
    fn save_club_if_name_free(&self, club: Club) -> StoreResult<bool>;
    fn list_players(&self, club_id: ClubId) -> StoreResult<Vec<Player>>;
    fn save_players(&self, players: Vec<Player>) -> StoreResult<()>;
}
