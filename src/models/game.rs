//! Match (game) between two doubles teams, and its status.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Points scored by one side in a match.
pub type Score = u32;

/// Whether a result has been submitted for the match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// A single match between team A and team B.
///
/// Teams are embedded by value so a finished tournament does not change when the
/// club roster is edited later. A/B assignment is positional and carries no
/// competitive meaning.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub team_a: Team,
    pub team_b: Team,
    pub score_a: Score,
    pub score_b: Score,
    pub status: MatchStatus,
    /// Set iff `status` is `Completed`; always `team_a.id` or `team_b.id`.
    pub winner_id: Option<TeamId>,
}

impl Match {
    /// New pending match with zero scores.
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_a,
            team_b,
            score_a: 0,
            score_b: 0,
            status: MatchStatus::Pending,
            winner_id: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Record a result. Team A wins only with a strictly higher score, so a tied
    /// score goes to team B.
    pub fn record(&mut self, score_a: Score, score_b: Score) {
        self.score_a = score_a;
        self.score_b = score_b;
        self.status = MatchStatus::Completed;
        self.winner_id = Some(if score_a > score_b {
            self.team_a.id
        } else {
            self.team_b.id
        });
    }

    /// The team that won, once completed.
    pub fn winner(&self) -> Option<&Team> {
        self.winner_id.map(|id| {
            if id == self.team_a.id {
                &self.team_a
            } else {
                &self.team_b
            }
        })
    }

    /// The team that lost, once completed.
    pub fn loser(&self) -> Option<&Team> {
        self.winner_id.map(|id| {
            if id == self.team_a.id {
                &self.team_b
            } else {
                &self.team_a
            }
        })
    }
}
