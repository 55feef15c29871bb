//! Standings calculation, shared by the live leaderboard and final-match selection.

use crate::models::{LeaderboardStat, Match, Team};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Compute the ranked leaderboard from the teams and the current match set.
///
/// Only completed matches count. Both sides get `played`, points for and against;
/// the side matching `winner_id` gets a win and two points, the other a loss.
/// A completed match that references a team not in `teams` is skipped.
///
/// Ranked by points, then points difference, both descending. The sort is stable,
/// so teams tied on both keep their order in `teams`.
pub fn compute_standings(teams: &[Team], matches: &[Match]) -> Vec<LeaderboardStat> {
    let mut stats: Vec<LeaderboardStat> = teams.iter().cloned().map(LeaderboardStat::for_team).collect();
    let index: HashMap<_, _> = teams.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

    for m in matches.iter().filter(|m| m.is_completed()) {
        let (Some(&a), Some(&b)) = (index.get(&m.team_a.id), index.get(&m.team_b.id)) else {
            continue;
        };
        stats[a].add_played(m.score_a, m.score_b);
        stats[b].add_played(m.score_b, m.score_a);
        if m.winner_id == Some(m.team_a.id) {
            stats[a].add_win();
            stats[b].add_loss();
        } else {
            stats[b].add_win();
            stats[a].add_loss();
        }
    }

    for s in &mut stats {
        s.settle();
    }
    stats.sort_by(rank_order);
    stats
}

/// Leaderboard ordering: points desc, then points difference desc.
pub fn rank_order(a: &LeaderboardStat, b: &LeaderboardStat) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.points_difference.cmp(&a.points_difference))
}
