//! Doubles team: two distinct players.

use crate::models::player::Player;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// A doubles pair. Built once at tournament setup and never mutated afterward.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Display name, "<first> / <second>".
    pub name: String,
    pub players: [Player; 2],
}

impl Team {
    /// Pair two players into a team. The players must be distinct.
    pub fn new(first: Player, second: Player) -> Result<Self, TournamentError> {
        if first.id == second.id {
            return Err(TournamentError::InvalidInput(format!(
                "{} cannot be paired with themselves",
                first.name
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: format!("{} / {}", first.name, second.name),
            players: [first, second],
        })
    }
}
