//! Single binary web server: JSON REST API over the tournament store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, INACTIVITY_HOURS (tournaments idle this long are purged; default 12).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use racquet_tournament_web::{
    inactivity_window, tournament_standings, Action, FallbackPolicy, MatchId, PlayerId,
    TournamentConfig, TournamentError, TournamentId, TournamentStore, DEFAULT_INACTIVITY_HOURS,
};
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;

type AppState = Data<RwLock<TournamentStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    config: Option<TournamentConfig>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    id: PlayerId,
    name: String,
}

#[derive(Deserialize)]
struct CourtsBody {
    courts_per_round: u32,
}

#[derive(Deserialize)]
struct FallbackBody {
    fallback: FallbackPolicy,
}

#[derive(Deserialize)]
struct ScoreBody {
    score1: u32,
    score2: u32,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: String,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TournamentNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Dispatch `action` against tournament `id` and respond with the updated tournament.
fn apply(state: &AppState, id: TournamentId, action: Action) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.dispatch(action) {
        Ok(event) => {
            log::debug!("{:?}", event);
            match g.get(id) {
                Some(t) => HttpResponse::Ok().json(t),
                None => error_response(&TournamentError::TournamentNotFound(id)),
            }
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "racquet-tournament-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let action = Action::Create {
        name: body.name,
        config: body.config,
    };
    match g.dispatch(action) {
        Ok(racquet_tournament_web::Event::Created { id }) => match g.get(id) {
            Some(t) => HttpResponse::Ok().json(t),
            None => error_response(&TournamentError::TournamentNotFound(id)),
        },
        Ok(_) => HttpResponse::InternalServerError().body("unexpected event"),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.list()),
        Err(_) => lock_error(),
    }
}

/// Get a tournament by id (404 if not found). Touching it refreshes its activity time.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(e) = g.touch(path.id) {
        return error_response(&e);
    }
    match g.get(path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => error_response(&TournamentError::TournamentNotFound(path.id)),
    }
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.dispatch(Action::Delete { id: path.id }) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// Add a player (Setup only).
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let action = Action::AddPlayer {
        id: path.id,
        player_id: body.id,
        name: body.name,
    };
    apply(&state, path.id, action)
}

/// Add a bot placeholder (Setup only).
#[post("/api/tournaments/{id}/players/bot")]
async fn api_add_bot(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, Action::AddBot { id: path.id })
}

/// Import players from a CSV body with an `id,name[,bot]` header (Setup only).
#[post("/api/tournaments/{id}/players/import")]
async fn api_import_roster(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    apply(
        &state,
        path.id,
        Action::ImportRoster {
            id: path.id,
            csv: body,
        },
    )
}

/// Remove a player by id (Setup only).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let action = Action::RemovePlayer {
        id: path.id,
        player_id: PlayerId::new(path.player_id.clone()),
    };
    apply(&state, path.id, action)
}

#[put("/api/tournaments/{id}/courts")]
async fn api_set_courts(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<CourtsBody>,
) -> HttpResponse {
    let action = Action::SetCourts {
        id: path.id,
        courts_per_round: body.courts_per_round,
    };
    apply(&state, path.id, action)
}

#[put("/api/tournaments/{id}/fallback")]
async fn api_set_fallback(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<FallbackBody>,
) -> HttpResponse {
    let action = Action::SetFallback {
        id: path.id,
        fallback: body.fallback,
    };
    apply(&state, path.id, action)
}

#[post("/api/tournaments/{id}/shuffle")]
async fn api_shuffle(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, Action::Shuffle { id: path.id })
}

/// Start the tournament (Setup -> InProgress).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, Action::Start { id: path.id })
}

/// Restart tournament: back to Setup with the same roster.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, Action::Restart { id: path.id })
}

#[get("/api/tournaments/{id}/rounds")]
async fn api_get_rounds(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(path.id) {
        Some(t) => HttpResponse::Ok().json(&t.rounds),
        None => error_response(&TournamentError::TournamentNotFound(path.id)),
    }
}

/// Enter the running score of a match in the active round.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_update_score(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let action = Action::UpdateScore {
        id: path.id,
        match_id: path.match_id,
        score1: body.score1,
        score2: body.score2,
    };
    apply(&state, path.id, action)
}

/// Complete a match with its current score (advances the round when it was the last one open).
#[post("/api/tournaments/{id}/matches/{match_id}/complete")]
async fn api_complete_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    let action = Action::CompleteMatch {
        id: path.id,
        match_id: path.match_id,
    };
    apply(&state, path.id, action)
}

#[get("/api/tournaments/{id}/standings")]
async fn api_get_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(path.id) {
        Some(t) => HttpResponse::Ok().json(tournament_standings(t)),
        None => error_response(&TournamentError::TournamentNotFound(path.id)),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let max_idle = inactivity_window(
        std::env::var("INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(DEFAULT_INACTIVITY_HOURS),
    );
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(TournamentStore::new()));

    // Background task: every 30 minutes, remove tournaments idle for too long
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = g.purge_inactive(chrono::Utc::now(), max_idle);
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for {}h)",
                    removed,
                    max_idle.num_hours()
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_add_bot)
            .service(api_import_roster)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_set_courts)
            .service(api_set_fallback)
            .service(api_shuffle)
            .service(api_start_tournament)
            .service(api_restart_tournament)
            .service(api_get_rounds)
            .service(api_update_score)
            .service(api_complete_match)
            .service(api_get_standings)
    })
    .bind(bind)?
    .run()
    .await
}
