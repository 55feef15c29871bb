//! Setup phase: form doubles teams from the selected players and create the tournament.

use crate::logic::pairing::generate_matches;
use crate::models::{ClubId, Player, PlayerId, Team, Tournament, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How the selected players are paired into teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method", content = "pairs")]
pub enum TeamFormation {
    /// Shuffle the selected players and pair them in order.
    Random,
    /// Explicit pairs chosen by the organiser.
    Manual(Vec<(PlayerId, PlayerId)>),
}

/// Check the selection: at least 2 players, an even count, no duplicates, all from `club_id`.
pub fn validate_selection(players: &[Player], club_id: ClubId) -> Result<(), TournamentError> {
    if players.len() < 2 || players.len() % 2 != 0 {
        return Err(TournamentError::InvalidInput(format!(
            "select an even number of players, at least 2 (selected {})",
            players.len()
        )));
    }
    let mut seen = HashSet::new();
    for p in players {
        if !seen.insert(p.id) {
            return Err(TournamentError::InvalidInput(format!("{} was selected twice", p.name)));
        }
        if p.club_id != club_id {
            return Err(TournamentError::InvalidInput(format!(
                "{} does not belong to this club",
                p.name
            )));
        }
    }
    Ok(())
}

/// Pair the selected players into teams.
pub fn form_teams<R: Rng + ?Sized>(
    players: &[Player],
    formation: &TeamFormation,
    rng: &mut R,
) -> Result<Vec<Team>, TournamentError> {
    match formation {
        TeamFormation::Random => {
            let mut shuffled = players.to_vec();
            shuffled.shuffle(rng);
            shuffled
                .chunks_exact(2)
                .map(|pair| Team::new(pair[0].clone(), pair[1].clone()))
                .collect()
        }
        TeamFormation::Manual(pairs) => form_manual_teams(players, pairs),
    }
}

/// Every pair must hold two distinct selected players, pairs must be disjoint,
/// and together they must cover the whole selection.
fn form_manual_teams(
    players: &[Player],
    pairs: &[(PlayerId, PlayerId)],
) -> Result<Vec<Team>, TournamentError> {
    if pairs.len() * 2 != players.len() {
        return Err(TournamentError::InvalidInput(format!(
            "{} players need {} teams (got {})",
            players.len(),
            players.len() / 2,
            pairs.len()
        )));
    }
    let lookup = |id: PlayerId| {
        players
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| TournamentError::InvalidInput(format!("player {id} is not in the selection")))
    };
    let mut used = HashSet::new();
    let mut teams = Vec::with_capacity(pairs.len());
    for &(first, second) in pairs {
        let (a, b) = (lookup(first)?, lookup(second)?);
        if !used.insert(a.id) || !used.insert(b.id) {
            return Err(TournamentError::InvalidInput(
                "a player is assigned to more than one team".to_string(),
            ));
        }
        teams.push(Team::new(a, b)?);
    }
    Ok(teams)
}

/// Create a tournament: validate, form teams, and seed the round-robin schedule.
/// The result is already in progress.
pub fn create_tournament<R: Rng + ?Sized>(
    name: &str,
    club_id: ClubId,
    players: Vec<Player>,
    formation: &TeamFormation,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::InvalidInput("tournament name cannot be empty".to_string()));
    }
    validate_selection(&players, club_id)?;
    let teams = form_teams(&players, formation, rng)?;
    let matches = generate_matches(&teams);
    Ok(Tournament::new(name, club_id, players, teams, matches))
}
