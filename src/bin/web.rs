//! Single binary web server: JSON REST API over one in-memory Swiss tournament.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), TOTAL_ROUNDS (e.g. 3).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use swiss_tournament_web::{
    advance_round, record_result, start_tournament, write_standings_csv, ErrorKind, GameMatch,
    MatchId, MatchResult, PlayerId, Round, RoundAdvance, Tournament, TournamentConfig,
    TournamentError, DEFAULT_TOTAL_ROUNDS,
};

/// The one tournament this server runs. Every command takes the write lock, so commands are
/// applied one at a time.
type AppState = Data<RwLock<Tournament>>;

/// Settings read from the environment at startup.
struct ServerConfig {
    default_total_rounds: u32,
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    total_rounds: Option<u32>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Serialize)]
struct AddPlayerResponse<'a> {
    player_id: PlayerId,
    tournament: &'a Tournament,
}

#[derive(Deserialize)]
struct TotalRoundsBody {
    total_rounds: u32,
}

#[derive(Deserialize)]
struct RecordResultBody {
    result: MatchResult,
}

/// Path segments: round number and match id (e.g. /api/tournament/rounds/{round}/matches/{match_id})
#[derive(Deserialize)]
struct MatchPath {
    round: u32,
    match_id: MatchId,
}

/// A match with player names resolved for display.
#[derive(Serialize)]
struct MatchView<'a> {
    #[serde(flatten)]
    game: &'a GameMatch,
    player_1_name: &'a str,
    player_2_name: &'a str,
}

#[derive(Serialize)]
struct RoundView<'a> {
    number: u32,
    total_rounds: u32,
    matches: Vec<MatchView<'a>>,
}

fn round_view<'a>(t: &'a Tournament, round: &'a Round) -> RoundView<'a> {
    RoundView {
        number: round.number,
        total_rounds: t.config().total_rounds,
        matches: round
            .matches
            .iter()
            .map(|m| MatchView {
                game: m,
                player_1_name: t.player_name(Some(m.player_1)),
                player_2_name: t.player_name(m.player_2),
            })
            .collect(),
    }
}

/// Map an engine error to a JSON error response with a status matching its kind.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::InvalidInput => HttpResponse::BadRequest().json(body),
        ErrorKind::InvalidState => HttpResponse::Conflict().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::InvalidOperation => HttpResponse::UnprocessableEntity().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "swiss-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Replace the tournament with a fresh one in Setup.
#[post("/api/tournament")]
async fn api_create_tournament(
    state: AppState,
    config: Data<ServerConfig>,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    let total_rounds = body
        .as_ref()
        .and_then(|b| b.total_rounds)
        .unwrap_or(config.default_total_rounds);
    let tournament = match Tournament::new(TournamentConfig {
        total_rounds,
        ..TournamentConfig::default()
    }) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("New tournament {} ({} rounds)", tournament.id(), total_rounds);
    *g = tournament;
    HttpResponse::Ok().json(&*g)
}

#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(&*g),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Register a player (tournament must be in Setup).
#[post("/api/tournament/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = &mut *g;
    match t.add_player(body.name.as_str()) {
        Ok(player_id) => HttpResponse::Ok().json(AddPlayerResponse {
            player_id,
            tournament: t,
        }),
        Err(e) => error_response(&e),
    }
}

/// Remove a player by id (tournament must be in Setup).
#[delete("/api/tournament/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<PlayerId>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = &mut *g;
    match t.remove_player(path.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

/// Update the number of rounds (tournament must be in Setup).
#[put("/api/tournament/total-rounds")]
async fn api_set_total_rounds(state: AppState, body: Json<TotalRoundsBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = &mut *g;
    match t.set_total_rounds(body.total_rounds) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

/// Start the tournament (Setup -> round 1). Returns round 1.
#[post("/api/tournament/start")]
async fn api_start_tournament(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = &mut *g;
    if let Err(e) = start_tournament(t, &mut rand::thread_rng()) {
        return error_response(&e);
    }
    match t.round(1) {
        Ok(round) => HttpResponse::Ok().json(round_view(t, round)),
        Err(e) => error_response(&e),
    }
}

/// One round's matches with their current results.
#[get("/api/tournament/rounds/{round}")]
async fn api_get_round(state: AppState, path: Path<u32>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.round(path.into_inner()) {
        Ok(round) => HttpResponse::Ok().json(round_view(&g, round)),
        Err(e) => error_response(&e),
    }
}

/// Set or correct one match result. Returns the updated standings.
#[put("/api/tournament/rounds/{round}/matches/{match_id}")]
async fn api_record_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match record_result(&mut g, path.round, &path.match_id, body.result) {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => error_response(&e),
    }
}

/// Close the current round: pair the next one or finish the tournament.
#[post("/api/tournament/advance")]
async fn api_advance_round(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = &mut *g;
    match advance_round(t, &mut rand::thread_rng()) {
        Ok(RoundAdvance::NextRound(round)) => HttpResponse::Ok().json(serde_json::json!({
            "finished": false,
            "round": round_view(t, &round),
        })),
        Ok(RoundAdvance::Finished) => HttpResponse::Ok().json(serde_json::json!({
            "finished": true,
            "winner": t.winner().map(|p| p.name.as_str()),
            "standings": t.standings(),
        })),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournament/standings")]
async fn api_get_standings(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.standings()),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Standings as a CSV download.
#[get("/api/tournament/standings.csv")]
async fn api_get_standings_csv(state: AppState) -> HttpResponse {
    let standings = match state.read() {
        Ok(g) => g.standings(),
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut buf = Vec::new();
    if let Err(e) = write_standings_csv(&standings, &mut buf) {
        log::error!("CSV export failed: {}", e);
        return HttpResponse::InternalServerError().body("csv error");
    }
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", "attachment; filename=\"standings.csv\""))
        .body(buf)
}

/// Restart tournament: back to Setup with the same players.
#[post("/api/tournament/restart")]
async fn api_restart_tournament(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let t = &mut *g;
    match t.restart_tournament() {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
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
    let default_total_rounds: u32 = std::env::var("TOTAL_ROUNDS")
        .ok()
        .and_then(|r| r.parse().ok())
        .filter(|&r| r > 0)
        .unwrap_or(DEFAULT_TOTAL_ROUNDS);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("New tournaments default to {} rounds", default_total_rounds);

    let config = TournamentConfig {
        total_rounds: default_total_rounds,
        ..TournamentConfig::default()
    };
    let tournament = Tournament::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let state = Data::new(RwLock::new(tournament));
    let server_config = Data::new(ServerConfig {
        default_total_rounds,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(server_config.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_set_total_rounds)
            .service(api_start_tournament)
            .service(api_get_round)
            .service(api_record_result)
            .service(api_advance_round)
            .service(api_get_standings_csv)
            .service(api_get_standings)
            .service(api_restart_tournament)
    })
    .bind(bind)?
    .run()
    .await
}
