//! Store-backed operations: each one fetches, applies a single change, and writes
//! the result back. Every call runs under an [`AuthScope`]; clubs only see their own
//! players and tournaments.

use crate::config::ServerConfig;
use crate::logic::{
    apply_event, compute_standings, create_tournament, parse_player_names, TeamFormation,
    TournamentEvent,
};
use crate::models::{
    AuthScope, Club, ClubId, LeaderboardStat, Player, PlayerId, Tournament, TournamentError,
    TournamentId, TournamentPhase,
};
use crate::store::{ClubDirectory, StoreError, TournamentRepository};
use thiserror::Error;

/// Errors surfaced to API callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Tournament(#[from] TournamentError),
    #[error("storage unavailable: {0}")]
    Storage(#[from] StoreError),
    #[error("invalid club name or password")]
    InvalidCredentials,
    #[error("this club account is inactive, please contact the administrator")]
    ClubInactive,
    #[error("a club with this name already exists")]
    DuplicateClubName,
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

fn require_club(scope: AuthScope) -> ServiceResult<ClubId> {
    scope
        .club_id()
        .ok_or(ServiceError::Forbidden("administrator view is read-only"))
}

fn require_admin(scope: AuthScope) -> ServiceResult<()> {
    match scope {
        AuthScope::Admin => Ok(()),
        AuthScope::Club(_) => Err(ServiceError::Forbidden("administrator only")),
    }
}

fn non_empty<'a>(value: &'a str, what: &str) -> ServiceResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TournamentError::InvalidInput(format!("{what} cannot be empty")).into());
    }
    Ok(value)
}

fn club_not_found(id: ClubId) -> ServiceError {
    TournamentError::NotFound { what: "club", id }.into()
}

// --- Clubs and login ---

/// Register a new, active club (admin).
pub fn register_club(
    store: &impl ClubDirectory,
    scope: AuthScope,
    name: &str,
    password: &str,
) -> ServiceResult<Club> {
    require_admin(scope)?;
    let name = non_empty(name, "club name")?;
    let password = non_empty(password, "password")?;
    let club = Club::new(name, password);
    if !store.save_club_if_name_free(club.clone())? {
        return Err(ServiceError::DuplicateClubName);
    }
    log::info!("Registered club {:?} ({})", club.name, club.id);
    Ok(club)
}

/// Rename a club or change its password (admin). Names stay unique.
pub fn update_club(
    store: &impl ClubDirectory,
    scope: AuthScope,
    club_id: ClubId,
    name: &str,
    password: &str,
) -> ServiceResult<Club> {
    require_admin(scope)?;
    let name = non_empty(name, "club name")?;
    let password = non_empty(password, "password")?;
    let mut club = store.find_club(club_id)?.ok_or_else(|| club_not_found(club_id))?;
    club.name = name.to_string();
    club.password = password.to_string();
    if !store.save_club_if_name_free(club.clone())? {
        return Err(ServiceError::DuplicateClubName);
    }
    Ok(club)
}

/// Flip whether a club may log in (admin).
pub fn toggle_club_active(store: &impl ClubDirectory, scope: AuthScope, club_id: ClubId) -> ServiceResult<Club> {
    require_admin(scope)?;
    let mut club = store.find_club(club_id)?.ok_or_else(|| club_not_found(club_id))?;
    club.active = !club.active;
    store.save_club(club.clone())?;
    log::info!("Club {:?} is now {}", club.name, if club.active { "active" } else { "inactive" });
    Ok(club)
}

pub fn list_clubs(store: &impl ClubDirectory, scope: AuthScope) -> ServiceResult<Vec<Club>> {
    require_admin(scope)?;
    Ok(store.list_clubs()?)
}

/// Log in as a club: name is matched case-insensitively, password exactly.
pub fn login_club(store: &impl ClubDirectory, name: &str, password: &str) -> ServiceResult<AuthScope> {
    let club = store
        .list_clubs()?
        .into_iter()
        .find(|c| c.has_name(name) && c.password == password);
    match club {
        Some(c) if !c.active => {
            log::warn!("Login refused for inactive club {:?}", c.name);
            Err(ServiceError::ClubInactive)
        }
        Some(c) => Ok(AuthScope::Club(c.id)),
        None => {
            log::warn!("Failed club login for {:?}", name.trim());
            Err(ServiceError::InvalidCredentials)
        }
    }
}

/// Re-check a stored login scope: a club that was deactivated (or no longer
/// exists) loses access immediately instead of at its next login.
pub fn resolve_scope(store: &impl ClubDirectory, scope: AuthScope) -> ServiceResult<AuthScope> {
    let AuthScope::Club(club_id) = scope else {
        return Ok(scope);
    };
    match store.find_club(club_id)? {
        Some(club) if club.active => Ok(scope),
        Some(club) => {
            log::warn!("Rejecting session of inactive club {:?}", club.name);
            Err(ServiceError::ClubInactive)
        }
        None => Err(ServiceError::InvalidCredentials),
    }
}

pub fn login_admin(config: &ServerConfig, user: &str, password: &str) -> ServiceResult<AuthScope> {
    if config.is_admin(user, password) {
        Ok(AuthScope::Admin)
    } else {
        log::warn!("Failed admin login for {user:?}");
        Err(ServiceError::InvalidCredentials)
    }
}

// --- Players ---

pub fn add_player(store: &impl ClubDirectory, scope: AuthScope, name: &str) -> ServiceResult<Player> {
    let club_id = require_club(scope)?;
    let player = Player::new(non_empty(name, "player name")?, club_id);
    store.save_players(vec![player.clone()])?;
    Ok(player)
}

/// Add every name from a CSV roster (with a `name` header) to the club.
pub fn import_players(store: &impl ClubDirectory, scope: AuthScope, csv: &str) -> ServiceResult<Vec<Player>> {
    let club_id = require_club(scope)?;
    let players: Vec<_> = parse_player_names(csv)?
        .into_iter()
        .map(|name| Player::new(name, club_id))
        .collect();
    store.save_players(players.clone())?;
    log::info!("Imported {} player(s) into club {}", players.len(), club_id);
    Ok(players)
}

pub fn list_players(store: &impl ClubDirectory, scope: AuthScope) -> ServiceResult<Vec<Player>> {
    Ok(store.list_players(require_club(scope)?)?)
}

// --- Tournaments ---

/// Create a tournament from club players and persist it.
pub fn start_tournament<S>(
    store: &S,
    scope: AuthScope,
    name: &str,
    player_ids: &[PlayerId],
    formation: &TeamFormation,
) -> ServiceResult<Tournament>
where
    S: ClubDirectory + TournamentRepository,
{
    let club_id = require_club(scope)?;
    let roster = store.list_players(club_id)?;
    let players = player_ids
        .iter()
        .map(|id| {
            roster
                .iter()
                .find(|p| p.id == *id)
                .cloned()
                .ok_or_else(|| TournamentError::InvalidInput(format!("player {id} is not in this club")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let tournament = create_tournament(name, club_id, players, formation, &mut rand::thread_rng())?;
    store.create(club_id, tournament.clone())?;
    log::info!(
        "Created tournament {:?} ({}) with {} teams and {} matches",
        tournament.name,
        tournament.id,
        tournament.teams.len(),
        tournament.matches.len()
    );
    Ok(tournament)
}

/// Fetch a tournament visible to `scope`. Another club's tournament is reported as not found.
pub fn get_tournament(
    store: &impl TournamentRepository,
    scope: AuthScope,
    id: TournamentId,
) -> ServiceResult<Tournament> {
    store
        .fetch_current(id)?
        .filter(|t| scope.club_id().map_or(true, |c| t.club_id == c))
        .ok_or_else(|| TournamentError::tournament_not_found(id).into())
}

/// Tournaments visible to `scope`, newest first.
pub fn list_tournaments(store: &impl TournamentRepository, scope: AuthScope) -> ServiceResult<Vec<Tournament>> {
    Ok(store.list_tournaments(scope.club_id())?)
}

/// Completed tournaments only.
pub fn tournament_history(store: &impl TournamentRepository, scope: AuthScope) -> ServiceResult<Vec<Tournament>> {
    let mut list = list_tournaments(store, scope)?;
    list.retain(Tournament::is_completed);
    Ok(list)
}

pub fn standings(
    store: &impl TournamentRepository,
    scope: AuthScope,
    id: TournamentId,
) -> ServiceResult<Vec<LeaderboardStat>> {
    let t = get_tournament(store, scope, id)?;
    Ok(compute_standings(&t.teams, &t.matches))
}

/// Apply one state-machine event to the stored snapshot and write the result back.
pub fn record_event(
    store: &impl TournamentRepository,
    scope: AuthScope,
    id: TournamentId,
    event: TournamentEvent,
) -> ServiceResult<Tournament> {
    require_club(scope)?;
    let current = get_tournament(store, scope, id)?;
    let next = apply_event(&current, event)?;
    store.replace(id, next.clone())?;

    match (current.phase(), next.phase()) {
        (TournamentPhase::RoundRobin, TournamentPhase::FinalPending) => {
            if let Some(f) = &next.final_match {
                log::info!(
                    "Round-robin of {:?} complete, final: {} vs {}",
                    next.name,
                    f.team_a.name,
                    f.team_b.name
                );
            }
        }
        (_, TournamentPhase::Completed) => {
            let winner = next.winner().map(|t| t.name.as_str()).unwrap_or("?");
            log::info!("Tournament {:?} completed, winner: {}", next.name, winner);
        }
        _ => {}
    }
    Ok(next)
}

/// Remove a tournament permanently (admin).
pub fn delete_tournament(
    store: &impl TournamentRepository,
    scope: AuthScope,
    id: TournamentId,
) -> ServiceResult<()> {
    require_admin(scope)?;
    if !store.delete_tournament(id)? {
        return Err(TournamentError::tournament_not_found(id).into());
    }
    log::info!("Deleted tournament {}", id);
    Ok(())
}
