//! Data structures for club tournaments: clubs, players, teams, matches, tournament state.

mod club;
mod game;
mod leaderboard;
mod player;
mod team;
mod tournament;

pub use club::{AuthScope, Club, ClubId};
pub use game::{Match, MatchId, MatchStatus, Score};
pub use leaderboard::{LeaderboardStat, POINTS_PER_WIN};
pub use player::{Player, PlayerId};
pub use team::{Team, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentPhase, TournamentStatus};
