//! In-memory store behind an `RwLock`, optionally mirrored to a JSON file.

use crate::models::{Club, ClubId, Player, Tournament, TournamentId};
use crate::store::{ClubDirectory, StoreError, StoreResult, TournamentRepository};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Everything the service keeps. Serialized as a whole to the snapshot file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct Database {
    clubs: Vec<Club>,
    players: Vec<Player>,
    tournaments: HashMap<TournamentId, Tournament>,
}

/// Store shared by all request handlers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    db: RwLock<Database>,
    /// When set, every write rewrites this file.
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// Empty store, memory only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store backed by a JSON snapshot file. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let db = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No snapshot at {}, starting empty", path.display());
                Database::default()
            }
            Err(err) => return Err(err.into()),
        };
        log::info!(
            "Loaded {} club(s), {} player(s), {} tournament(s) from {}",
            db.clubs.len(),
            db.players.len(),
            db.tournaments.len(),
            path.display()
        );
        Ok(Self {
            db: RwLock::new(db),
            snapshot_path: Some(path),
        })
    }

    fn read<T>(&self, f: impl FnOnce(&Database) -> T) -> StoreResult<T> {
        let g = self.db.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&*g))
    }

    /// Apply `f` under the write lock. With a snapshot file the change is made on a
    /// copy that replaces the live data only once the file is written, so a failed
    /// write leaves memory as it was.
    fn write<T>(&self, f: impl FnOnce(&mut Database) -> T) -> StoreResult<T> {
        let mut g = self.db.write().map_err(|_| StoreError::Poisoned)?;
        match &self.snapshot_path {
            Some(path) => {
                let mut next = g.clone();
                let out = f(&mut next);
                persist(path, &next)?;
                *g = next;
                Ok(out)
            }
            None => Ok(f(&mut *g)),
        }
    }
}

/// Write to a sibling temp file, then rename over the snapshot.
fn persist(path: &Path, db: &Database) -> StoreResult<()> {
    let json = serde_json::to_vec_pretty(db)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl TournamentRepository for MemoryStore {
    fn fetch_current(&self, id: TournamentId) -> StoreResult<Option<Tournament>> {
        self.read(|db| db.tournaments.get(&id).cloned())
    }

    fn replace(&self, id: TournamentId, tournament: Tournament) -> StoreResult<()> {
        self.write(|db| {
            db.tournaments.insert(id, tournament);
        })
    }

    fn create(&self, club_id: ClubId, mut tournament: Tournament) -> StoreResult<TournamentId> {
        tournament.club_id = club_id;
        let id = tournament.id;
        self.write(|db| {
            db.tournaments.insert(id, tournament);
        })?;
        Ok(id)
    }

    fn list_tournaments(&self, club_id: Option<ClubId>) -> StoreResult<Vec<Tournament>> {
        self.read(|db| {
            let mut list: Vec<_> = db
                .tournaments
                .values()
                .filter(|t| club_id.map_or(true, |c| t.club_id == c))
                .cloned()
                .collect();
            list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            list
        })
    }

    fn delete_tournament(&self, id: TournamentId) -> StoreResult<bool> {
        self.write(|db| db.tournaments.remove(&id).is_some())
    }
}

impl ClubDirectory for MemoryStore {
    fn list_clubs(&self) -> StoreResult<Vec<Club>> {
        self.read(|db| db.clubs.clone())
    }

    fn find_club(&self, id: ClubId) -> StoreResult<Option<Club>> {
        self.read(|db| db.clubs.iter().find(|c| c.id == id).cloned())
    }

    fn save_club_if_name_free(&self, club: Club) -> StoreResult<bool> {
        self.write(|db| {
            if db.clubs.iter().any(|c| c.id != club.id && c.has_name(&club.name)) {
                return false;
            }
            match db.clubs.iter().position(|c| c.id == club.id) {
                Some(i) => db.clubs[i] = club,
                None => db.clubs.push(club),
            }
            true
        })
    }

    fn save_club(&self, club: Club) -> StoreResult<()> {
        self.write(|db| match db.clubs.iter().position(|c| c.id == club.id) {
            Some(i) => db.clubs[i] = club,
            None => db.clubs.push(club),
        })
    }

    fn list_players(&self, club_id: ClubId) -> StoreResult<Vec<Player>> {
        self.read(|db| {
            db.players
                .iter()
                .filter(|p| p.club_id == club_id)
                .cloned()
                .collect()
        })
    }

    fn save_players(&self, players: Vec<Player>) -> StoreResult<()> {
        self.write(|db| db.players.extend(players))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{create_tournament, TeamFormation};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_tournament(club_id: ClubId) -> Tournament {
        let players: Vec<_> = (0..4).map(|i| Player::new(format!("P{i}"), club_id)).collect();
        let mut rng = StdRng::seed_from_u64(3);
        create_tournament("Open", club_id, players, &TeamFormation::Random, &mut rng).unwrap()
    }

    #[test]
    fn snapshot_file_survives_reopen() {
        let path = std::env::temp_dir().join(format!("store-{}.json", uuid::Uuid::new_v4()));
        let club = Club::new("Shuttlers", "pw");
        let tournament = sample_tournament(club.id);
        let tid = tournament.id;
        {
            let store = MemoryStore::open(&path).unwrap();
            store.save_club(club.clone()).unwrap();
            store.create(club.id, tournament.clone()).unwrap();
        }
        let reopened = MemoryStore::open(&path).unwrap();
        assert_eq!(reopened.list_clubs().unwrap(), vec![club]);
        assert_eq!(reopened.fetch_current(tid).unwrap(), Some(tournament));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn replace_is_last_writer_wins() {
        let store = MemoryStore::new();
        let club_id = uuid::Uuid::new_v4();
        let t = sample_tournament(club_id);
        let id = store.create(club_id, t.clone()).unwrap();

        let mut first = t.clone();
        first.name = "first".into();
        let mut second = t;
        second.name = "second".into();
        store.replace(id, first).unwrap();
        store.replace(id, second).unwrap();

        assert_eq!(store.fetch_current(id).unwrap().unwrap().name, "second");
    }

    #[test]
    fn save_club_overwrites_by_id() {
        let store = MemoryStore::new();
        let mut club = Club::new("A", "pw");
        store.save_club(club.clone()).unwrap();
        club.active = false;
        store.save_club(club.clone()).unwrap();
        assert_eq!(store.list_clubs().unwrap(), vec![club]);
    }

    #[test]
    fn failed_snapshot_write_leaves_memory_unchanged() {
        let path = std::env::temp_dir().join(format!("store-{}.json", uuid::Uuid::new_v4()));
        let store = MemoryStore::open(&path).unwrap();
        // A directory where the temp file should go makes the write fail.
        let blocker = path.with_extension("json.tmp");
        fs::create_dir(&blocker).unwrap();

        let club = Club::new("Shuttlers", "pw");
        assert!(matches!(store.save_club(club.clone()), Err(StoreError::Io(_))));
        assert!(store.list_clubs().unwrap().is_empty());

        fs::remove_dir(&blocker).unwrap();
        assert!(store.save_club_if_name_free(club.clone()).unwrap());
        assert_eq!(store.list_clubs().unwrap(), vec![club]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn name_check_ignores_case_and_the_club_itself() {
        let store = MemoryStore::new();
        let mut club = Club::new("Alpha", "pw");
        assert!(store.save_club_if_name_free(club.clone()).unwrap());
        assert!(!store.save_club_if_name_free(Club::new(" ALPHA", "pw")).unwrap());

        club.password = "new".into();
        assert!(store.save_club_if_name_free(club.clone()).unwrap());
        assert_eq!(store.list_clubs().unwrap(), vec![club]);
    }
}
