//! Player data structure.

use crate::models::club::ClubId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in teams and lookups).
pub type PlayerId = Uuid;

/// A club member who can be selected into a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub club_id: ClubId,
}

impl Player {
    /// Create a new player with the given name, owned by `club_id`.
    pub fn new(name: impl Into<String>, club_id: ClubId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            club_id,
        }
    }
}
