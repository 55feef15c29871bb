//! Single binary web server: REST JSON API for clubs, players and tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `ServerConfig::from_env` for the
//! environment variables (HOST, PORT, DATA_FILE, ADMIN_USER, ADMIN_PASSWORD, SESSION_KEY).

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use badminton_tournament_web::{
    config::ServerConfig,
    logic::{parse_score, standings_to_csv},
    service::{self, ServiceError, ServiceResult},
    AuthScope, ClubId, MatchId, MemoryStore, PlayerId, TeamFormation, TournamentError,
    TournamentEvent, TournamentId,
};
use serde::{Deserialize, Serialize};

/// Shared store: clubs, players and tournaments.
type AppState = Data<MemoryStore>;
type AppConfig = Data<ServerConfig>;

/// Session key holding the logged-in `AuthScope`.
const AUTH_KEY: &str = "auth";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct ClubLoginBody {
    name: String,
    password: String,
}

#[derive(Deserialize)]
struct AdminLoginBody {
    user: String,
    password: String,
}

#[derive(Deserialize)]
struct ClubBody {
    name: String,
    password: String,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    player_ids: Vec<PlayerId>,
    #[serde(default = "default_formation")]
    teams: TeamFormation,
}

fn default_formation() -> TeamFormation {
    TeamFormation::Random
}

/// Scores arrive signed so negatives can be rejected with a clear message.
#[derive(Deserialize)]
struct ScoreBody {
    score_a: i64,
    score_b: i64,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct ClubPath {
    id: ClubId,
}

/// Map a service error onto an HTTP status with `{"error": message}`.
fn error_response(e: ServiceError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match &e {
        ServiceError::Tournament(TournamentError::NotFound { .. }) => HttpResponse::NotFound().json(body),
        ServiceError::Tournament(TournamentError::InvalidState(_)) => HttpResponse::Conflict().json(body),
        ServiceError::Tournament(TournamentError::InvalidInput(_)) | ServiceError::DuplicateClubName => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::InvalidCredentials => HttpResponse::Unauthorized().json(body),
        ServiceError::ClubInactive | ServiceError::Forbidden(_) => HttpResponse::Forbidden().json(body),
        ServiceError::Storage(err) => {
            log::error!("Storage failure: {}", err);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn respond<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(e),
    }
}

/// Logged-in scope, or the response to send when there is none. Club scopes are
/// re-checked against the store so a deactivated club is logged out.
fn current_scope(state: &AppState, session: &Session) -> Result<AuthScope, HttpResponse> {
    match session.get::<AuthScope>(AUTH_KEY) {
        Ok(Some(scope)) => service::resolve_scope(state.get_ref(), scope).map_err(|e| {
            session.purge();
            error_response(e)
        }),
        Ok(None) => Err(HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Not logged in" }))),
        Err(e) => {
            log::warn!("Unreadable session: {}", e);
            session.purge();
            Err(HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Session expired" })))
        }
    }
}

fn start_session(session: &Session, result: ServiceResult<AuthScope>) -> HttpResponse {
    match result {
        Ok(scope) => {
            session.renew();
            match session.insert(AUTH_KEY, scope) {
                Ok(()) => HttpResponse::Ok().json(scope),
                Err(_) => HttpResponse::InternalServerError().body("session error"),
            }
        }
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-tournament-web",
    })
}

/// Log in as a club (case-insensitive name).
#[post("/api/login/club")]
async fn api_login_club(state: AppState, session: Session, body: Json<ClubLoginBody>) -> HttpResponse {
    start_session(&session, service::login_club(state.get_ref(), &body.name, &body.password))
}

/// Log in as the administrator (credentials from configuration).
#[post("/api/login/admin")]
async fn api_login_admin(config: AppConfig, session: Session, body: Json<AdminLoginBody>) -> HttpResponse {
    start_session(&session, service::login_admin(&config, &body.user, &body.password))
}

#[post("/api/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Current login scope (401 if not logged in).
#[get("/api/session")]
async fn api_session(state: AppState, session: Session) -> HttpResponse {
    match current_scope(&state, &session) {
        Ok(scope) => HttpResponse::Ok().json(scope),
        Err(resp) => resp,
    }
}

#[get("/api/admin/clubs")]
async fn api_list_clubs(state: AppState, session: Session) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::list_clubs(state.get_ref(), scope))
}

#[post("/api/admin/clubs")]
async fn api_register_club(state: AppState, session: Session, body: Json<ClubBody>) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::register_club(state.get_ref(), scope, &body.name, &body.password))
}

#[put("/api/admin/clubs/{id}")]
async fn api_update_club(
    state: AppState,
    session: Session,
    path: Path<ClubPath>,
    body: Json<ClubBody>,
) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::update_club(state.get_ref(), scope, path.id, &body.name, &body.password))
}

#[post("/api/admin/clubs/{id}/toggle-active")]
async fn api_toggle_club(state: AppState, session: Session, path: Path<ClubPath>) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::toggle_club_active(state.get_ref(), scope, path.id))
}

#[delete("/api/admin/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match service::delete_tournament(state.get_ref(), scope, path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[get("/api/players")]
async fn api_list_players(state: AppState, session: Session) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::list_players(state.get_ref(), scope))
}

#[post("/api/players")]
async fn api_add_player(state: AppState, session: Session, body: Json<AddPlayerBody>) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::add_player(state.get_ref(), scope, &body.name))
}

/// Bulk add players from a CSV body with a `name` header.
#[post("/api/players/import")]
async fn api_import_players(state: AppState, session: Session, body: String) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::import_players(state.get_ref(), scope, &body))
}

/// All tournaments visible to the caller, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState, session: Session) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::list_tournaments(state.get_ref(), scope))
}

/// Completed tournaments only.
#[get("/api/tournaments/history")]
async fn api_tournament_history(state: AppState, session: Session) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::tournament_history(state.get_ref(), scope))
}

/// Create a tournament: forms teams and generates the round-robin schedule.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    session: Session,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::start_tournament(
        state.get_ref(),
        scope,
        &body.name,
        &body.player_ids,
        &body.teams,
    ))
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::get_tournament(state.get_ref(), scope, path.id))
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    respond(service::standings(state.get_ref(), scope, path.id))
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let csv = service::standings(state.get_ref(), scope, path.id)
        .and_then(|rows| standings_to_csv(&rows).map_err(ServiceError::from));
    match csv {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => error_response(e),
    }
}

/// Submit the score of one round-robin match.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_score_match(
    state: AppState,
    session: Session,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let event = parse_score(body.score_a).and_then(|score_a| {
        Ok(TournamentEvent::MatchScored {
            match_id: path.match_id,
            score_a,
            score_b: parse_score(body.score_b)?,
        })
    });
    match event {
        Ok(event) => respond(service::record_event(state.get_ref(), scope, path.id, event)),
        Err(e) => error_response(e.into()),
    }
}

/// Submit the final score; completes the tournament.
#[put("/api/tournaments/{id}/final/score")]
async fn api_score_final(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let scope = match current_scope(&state, &session) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let event = parse_score(body.score_a).and_then(|score_a| {
        Ok(TournamentEvent::FinalScored {
            score_a,
            score_b: parse_score(body.score_b)?,
        })
    });
    match event {
        Ok(event) => respond(service::record_event(state.get_ref(), scope, path.id, event)),
        Err(e) => error_response(e.into()),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = match &config.data_file {
        Some(path) => MemoryStore::open(path).map_err(std::io::Error::other)?,
        None => {
            log::warn!("DATA_FILE not set, data is kept in memory only");
            MemoryStore::new()
        }
    };
    if config.admin_password.is_none() {
        log::warn!("ADMIN_PASSWORD not set, admin login is disabled");
    }
    let key = match &config.session_key {
        Some(bytes) => Key::from(bytes.as_slice()),
        None => {
            log::warn!("SESSION_KEY not set, sessions will not survive a restart");
            Key::generate()
        }
    };

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(store);
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_login_club)
            .service(api_login_admin)
            .service(api_logout)
            .service(api_session)
            .service(api_list_clubs)
            .service(api_register_club)
            .service(api_update_club)
            .service(api_toggle_club)
            .service(api_delete_tournament)
            .service(api_list_players)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_list_tournaments)
            .service(api_tournament_history)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_score_match)
            .service(api_score_final)
    })
    .bind(bind)?
    .run()
    .await
}
