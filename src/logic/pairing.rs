//! Round-robin match generation.

use crate::models::{Match, Team};

/// Generate the full single round-robin schedule: one pending match for every
/// unordered pair of teams, `teams[i]` as team A against `teams[j]` for `i < j`.
///
/// Output order is stable for a given input order (outer loop by `i`, inner by `j`),
/// so `n` teams yield exactly `n * (n - 1) / 2` matches with no byes.
pub fn generate_matches(teams: &[Team]) -> Vec<Match> {
    let mut matches = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
    for (i, team_a) in teams.iter().enumerate() {
        for team_b in &teams[i + 1..] {
            matches.push(Match::new(team_a.clone(), team_b.clone()));
        }
    }
    matches
}
