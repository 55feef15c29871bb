//! Badminton club tournament manager: library with models, business logic and storage.

pub mod config;
pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use logic::{
    apply_event, compute_standings, create_tournament, form_teams, generate_matches,
    submit_final_result, submit_match_result, TeamFormation, TournamentEvent,
};
pub use models::{
    AuthScope, Club, ClubId, LeaderboardStat, Match, MatchId, MatchStatus, Player, PlayerId, Score,
    Team, TeamId, Tournament, TournamentError, TournamentId, TournamentPhase, TournamentStatus,
    POINTS_PER_WIN,
};
pub use service::{ServiceError, ServiceResult};
pub use store::{ClubDirectory, MemoryStore, StoreError, TournamentRepository};
