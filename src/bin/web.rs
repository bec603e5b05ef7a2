//! Single binary web server: REST API over an in-memory tournament library.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST, PORT, INACTIVITY_HOURS, CLEANUP_INTERVAL_MINUTES.

use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use round_robin_web::{
    compute_standings, create_schedule, read_roster_csv, record_result, shuffle_roster,
    standings_to_csv, MatchReport, PlayerId, SetScore, TournamentError, TournamentId,
    TournamentLibrary,
};
use serde::Deserialize;
use std::sync::{RwLock, RwLockWriteGuard};
use std::time::Duration;

/// In-memory state: all tournaments by id. Idle entries are evicted periodically.
type AppState = Data<RwLock<TournamentLibrary>>;

/// Server settings read from the environment.
#[derive(Clone, Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    /// Tournaments not accessed for this long are removed.
    inactivity_timeout: chrono::Duration,
    cleanup_interval: Duration,
}

/// Upper bound for `INACTIVITY_HOURS` (one year).
const MAX_INACTIVITY_HOURS: i64 = 24 * 365;
/// Upper bound for `CLEANUP_INTERVAL_MINUTES` (one day).
const MAX_CLEANUP_MINUTES: u64 = 24 * 60;

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup. Out-of-range durations fall back to the defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(default_host);
        let port = parse_number(lookup("PORT")).unwrap_or_else(default_port);
        let inactivity_hours = parse_number(lookup("INACTIVITY_HOURS"))
            .filter(|h| (1..=MAX_INACTIVITY_HOURS).contains(h))
            .unwrap_or(12);
        let cleanup_minutes = parse_number(lookup("CLEANUP_INTERVAL_MINUTES"))
            .filter(|m| (1..=MAX_CLEANUP_MINUTES).contains(m))
            .unwrap_or(30);
        Self {
            host,
            port,
            inactivity_timeout: chrono::Duration::hours(inactivity_hours),
            cleanup_interval: Duration::from_secs(cleanup_minutes * 60),
        }
    }
}

fn parse_number<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_best_of() -> u32 {
    3
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    players: Vec<String>,
    #[serde(default = "default_best_of")]
    best_of: u32,
    #[serde(default)]
    include_set_results: bool,
    /// Draw the roster order at random before scheduling.
    #[serde(default)]
    shuffle: bool,
}

#[derive(Deserialize)]
struct RenameBody {
    name: String,
}

#[derive(Deserialize)]
struct RecordResultBody {
    /// Round number; any round when omitted.
    #[serde(default)]
    round: Option<u32>,
    player_1: String,
    player_2: String,
    #[serde(default)]
    player_1_sets: Option<u32>,
    #[serde(default)]
    player_2_sets: Option<u32>,
    /// Per-set points in playing order.
    #[serde(default)]
    sets: Vec<SetScore>,
}

impl RecordResultBody {
    fn report(&self) -> MatchReport {
        MatchReport {
            player_1_sets: self.player_1_sets,
            player_2_sets: self.player_2_sets,
            sets: self.sets.iter().copied().enumerate().collect(),
        }
    }
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player id (e.g. /api/tournaments/{id}/players/{player_id})
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: PlayerId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TournamentNotFound(_)
        | TournamentError::PlayerNotFound(_)
        | TournamentError::MatchNotFound { .. } => HttpResponse::NotFound().json(body),
        TournamentError::NameConflict(_) => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn write_library(state: &AppState) -> Result<RwLockWriteGuard<'_, TournamentLibrary>, HttpResponse> {
    state
        .write()
        .map_err(|_| HttpResponse::InternalServerError().body("lock error"))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "round-robin-web",
    })
}

/// Create a tournament with its full schedule. The pairing table is built off the async workers.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let CreateTournamentBody {
        name,
        mut players,
        best_of,
        include_set_results,
        shuffle,
    } = body.into_inner();
    if shuffle {
        shuffle_roster(&mut players);
    }
    let built = web::block(move || create_schedule(&name, &players, best_of, include_set_results)).await;
    let tournament = match built {
        Ok(Ok(t)) => t,
        Ok(Err(e)) => return error_response(&e),
        Err(_) => return HttpResponse::InternalServerError().body("scheduler error"),
    };
    let mut g = match write_library(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match g.insert(tournament) {
        Ok(id) => HttpResponse::Ok().json(g.get(id)),
        Err(e) => error_response(&e),
    }
}

/// Parse a CSV roster (one name per line) into a name list for tournament creation.
#[post("/api/roster")]
async fn api_parse_roster(body: String) -> HttpResponse {
    match read_roster_csv(body.as_bytes()) {
        Ok(names) => HttpResponse::Ok().json(serde_json::json!({ "players": names })),
        Err(e) => error_response(&e),
    }
}

/// List saved tournaments sorted by name; `?q=` filters by name substring.
/// Listing does not refresh last access times.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState, query: Query<SearchQuery>) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.search(&query.q)),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Import a tournament exported by `/export`.
#[post("/api/tournaments/import")]
async fn api_import_tournament(state: AppState, body: String) -> HttpResponse {
    let mut g = match write_library(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match g.import_json(&body) {
        Ok(id) => HttpResponse::Ok().json(g.get(id)),
        Err(e) => error_response(&e),
    }
}

/// Get a tournament by id (404 if not found). Touching it refreshes its last access time.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match write_library(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match g.require_mut(path.id) {
        Ok(t) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match write_library(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match g.remove(path.id) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// Rename a tournament (409 if another tournament has that name).
#[put("/api/tournaments/{id}/name")]
async fn api_rename_tournament(state: AppState, path: Path<TournamentPath>, body: Json<RenameBody>) -> HttpResponse {
    let mut g = match write_library(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match g.rename(path.id, &body.name) {
        Ok(()) => HttpResponse::Ok().json(g.get(path.id)),
        Err(e) => error_response(&e),
    }
}

/// Rename a player (409 if another player in the tournament has that name).
#[put("/api/tournaments/{id}/players/{player_id}/name")]
async fn api_rename_player(
    state: AppState,
    path: Path<TournamentPlayerPath>,
    body: Json<RenameBody>,
) -> HttpResponse {
    let mut g = match write_library(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let t = match g.require_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    match t.rename_player(path.player_id, &body.name) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

/// Enter or edit one match result. Invalid results leave the stored result unchanged.
#[put("/api/tournaments/{id}/results")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    let mut g = match write_library(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let t = match g.require_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    match record_result(t, body.round, &body.player_1, &body.player_2, body.report()) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match write_library(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match g.require_mut(path.id) {
        Ok(t) => HttpResponse::Ok().json(compute_standings(t)),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match write_library(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let t = match g.require_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    match standings_to_csv(&compute_standings(t)) {
        Ok(csv) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(csv),
        Err(e) => error_response(&e),
    }
}

/// Export a tournament as JSON (same shape `/import` accepts). Refreshes its last access time.
#[get("/api/tournaments/{id}/export")]
async fn api_export_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match write_library(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match g.export_json(path.id) {
        Ok(json) => HttpResponse::Ok()
            .content_type("application/json")
            .insert_header(("Content-Disposition", "attachment; filename=\"tournament.json\""))
            .body(json),
        Err(e) => error_response(&e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(TournamentLibrary::new()));

    // Background task: periodically remove tournaments nobody has touched for a while
    let state_cleanup = state.clone();
    let cleanup = config.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(cleanup.cleanup_interval);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            g.evict_idle(cleanup.inactivity_timeout);
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_parse_roster)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_import_tournament)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_rename_tournament)
            .service(api_rename_player)
            .service(api_record_result)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_export_tournament)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
