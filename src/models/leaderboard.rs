//! Derived per-team leaderboard row.

use crate::models::game::Score;
use crate::models::team::Team;
use serde::{Deserialize, Serialize};

/// Points awarded to the winner of a round-robin match.
pub const POINTS_PER_WIN: u32 = 2;

/// Aggregate round-robin results for one team. Never persisted; recomputed from
/// the tournament's teams and matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardStat {
    pub team: Team,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    /// Sum of scores; wide enough that any number of `Score`s cannot wrap.
    pub points_for: u64,
    pub points_against: u64,
    pub points_difference: i64,
}

impl LeaderboardStat {
    /// Empty row for a team that has not played yet.
    pub fn for_team(team: Team) -> Self {
        Self {
            team,
            played: 0,
            wins: 0,
            losses: 0,
            points: 0,
            points_for: 0,
            points_against: 0,
            points_difference: 0,
        }
    }

    pub fn add_win(&mut self) {
        self.wins = self.wins.saturating_add(1);
        self.points = self.points.saturating_add(POINTS_PER_WIN);
    }

    pub fn add_loss(&mut self) {
        self.losses = self.losses.saturating_add(1);
    }

    /// Count one completed match with the given points scored and conceded.
    pub fn add_played(&mut self, scored: Score, conceded: Score) {
        self.played = self.played.saturating_add(1);
        self.points_for = self.points_for.saturating_add(u64::from(scored));
        self.points_against = self.points_against.saturating_add(u64::from(conceded));
    }

    /// Recompute `points_difference` from the totals, clamped to the `i64` range.
    pub fn settle(&mut self) {
        let clamp = |v: u64| i64::try_from(v).unwrap_or(i64::MAX);
        self.points_difference = clamp(self.points_for).saturating_sub(clamp(self.points_against));
    }
}
