//! Tournament state machine: round-robin scoring, final-match synthesis, championship.
//!
//! Every transition is a pure function from the current snapshot to the next one.
//! The input is never modified, so a rejected transition leaves the caller's
//! snapshot untouched.

use crate::logic::standings::compute_standings;
use crate::models::{Match, MatchId, Score, Tournament, TournamentError, TournamentStatus};
use serde::{Deserialize, Serialize};

/// A single state-machine input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum TournamentEvent {
    /// Score for a round-robin match.
    MatchScored {
        match_id: MatchId,
        score_a: Score,
        score_b: Score,
    },
    /// Score for the final match.
    FinalScored { score_a: Score, score_b: Score },
}

/// Apply one event and return the resulting snapshot.
pub fn apply_event(tournament: &Tournament, event: TournamentEvent) -> Result<Tournament, TournamentError> {
    match event {
        TournamentEvent::MatchScored {
            match_id,
            score_a,
            score_b,
        } => submit_match_result(tournament, match_id, score_a, score_b),
        TournamentEvent::FinalScored { score_a, score_b } => {
            submit_final_result(tournament, score_a, score_b)
        }
    }
}

/// Record a round-robin result.
///
/// When this completes the last open match and no final exists yet, the final is
/// created between the top two teams of the standings. That happens at most once:
/// later re-scores see the final already present and leave it alone.
pub fn submit_match_result(
    tournament: &Tournament,
    match_id: MatchId,
    score_a: Score,
    score_b: Score,
) -> Result<Tournament, TournamentError> {
    if tournament.status == TournamentStatus::Completed {
        return Err(TournamentError::InvalidState("tournament is already completed"));
    }
    let idx = tournament
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(TournamentError::match_not_found(match_id))?;

    let mut next = tournament.clone();
    next.matches[idx].record(score_a, score_b);

    if next.final_match.is_none() && next.is_round_robin_complete() {
        next.final_match = derive_final_match(&next);
    }
    Ok(next)
}

/// Final between standings rank 1 (team A) and rank 2 (team B), if there are two teams.
fn derive_final_match(tournament: &Tournament) -> Option<Match> {
    let standings = compute_standings(&tournament.teams, &tournament.matches);
    match standings.as_slice() {
        [first, second, ..] => Some(Match::new(first.team.clone(), second.team.clone())),
        _ => None,
    }
}

/// Record the final result and complete the tournament. Terminal: a second call fails.
pub fn submit_final_result(
    tournament: &Tournament,
    score_a: Score,
    score_b: Score,
) -> Result<Tournament, TournamentError> {
    if tournament.status == TournamentStatus::Completed {
        return Err(TournamentError::InvalidState("tournament is already completed"));
    }
    let Some(final_match) = &tournament.final_match else {
        return Err(TournamentError::InvalidState("round-robin is not complete, no final match yet"));
    };

    let mut final_match = final_match.clone();
    final_match.record(score_a, score_b);
    let (winner_id, runner_up_id) = match (final_match.winner(), final_match.loser()) {
        (Some(w), Some(l)) => (w.id, l.id),
        _ => return Err(TournamentError::InvalidState("final match has no result")),
    };

    let mut next = tournament.clone();
    next.final_match = Some(final_match);
    next.winner_id = Some(winner_id);
    next.runner_up_id = Some(runner_up_id);
    next.status = TournamentStatus::Completed;
    Ok(next)
}

/// Convert a client-supplied score, rejecting negatives and values out of range.
pub fn parse_score(raw: i64) -> Result<Score, TournamentError> {
    if raw < 0 {
        return Err(TournamentError::InvalidInput(format!("score cannot be negative (got {raw})")));
    }
    Score::try_from(raw).map_err(|_| TournamentError::InvalidInput(format!("score {raw} is too large")))
}
