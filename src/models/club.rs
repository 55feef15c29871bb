//! Club accounts and the login scope handed out by a successful login.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a club.
pub type ClubId = Uuid;

/// A club account. Names are unique (case-insensitive); inactive clubs cannot log in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub password: String,
    pub active: bool,
}

impl Club {
    /// Create a new, active club.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            password: password.into(),
            active: true,
        }
    }

    /// Case-insensitive name comparison, ignoring surrounding whitespace.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

/// Who is acting: a logged-in club (sees only its own data) or the administrator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "club_id")]
pub enum AuthScope {
    Club(ClubId),
    Admin,
}

impl AuthScope {
    /// The club this scope is restricted to, if any.
    pub fn club_id(&self) -> Option<ClubId> {
        match self {
            AuthScope::Club(id) => Some(*id),
            AuthScope::Admin => None,
        }
    }
}
