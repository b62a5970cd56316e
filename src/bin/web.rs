//! Single binary web server: league management REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use league_manager_web::{
    generate_league_schedule, team_goals_report, CoachId, Country, CountryId, FixtureUpdate,
    FixtureView, League, LeagueDb, LeagueError, LeagueId, Season, SeasonId, Stadium, StadiumUpdate,
    Team, TeamId, UserId,
};
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;
use uuid::Uuid;

/// In-memory state: the whole league store behind one lock.
type AppState = Data<RwLock<LeagueDb>>;

/// How often the completion sweep runs. Fixtures whose end time has passed
/// are marked completed once a day.
const SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSeasonBody {
    name: String,
}

#[derive(Deserialize)]
struct CreateLeagueBody {
    name: String,
    season_id: SeasonId,
}

#[derive(Deserialize)]
struct CreateTeamBody {
    name: String,
    league_id: LeagueId,
}

#[derive(Deserialize)]
struct CreateCountryBody {
    name: String,
}

#[derive(Deserialize)]
struct GenerateScheduleBody {
    season_id: SeasonId,
    /// Season start; fixtures land on the weekends from this date on.
    start_date: String,
}

#[derive(Deserialize)]
struct CreateStadiumBody {
    name: String,
    city: Option<String>,
    capacity: Option<u32>,
}

#[derive(Deserialize)]
struct CheckStadiumNameBody {
    name: String,
    /// Set when validating a rename form; the current name is then allowed.
    #[serde(default)]
    is_edit: bool,
}

#[derive(Deserialize)]
struct UpsertCoachBody {
    user: UserId,
    name: String,
    nationality: CountryId,
    team: Option<TeamId>,
}

#[derive(Deserialize)]
struct AssignCoachBody {
    coach_id: CoachId,
}

#[derive(Deserialize)]
struct RecordResultBody {
    home_goals: u32,
    away_goals: u32,
}

/// Path segment: document id (e.g. /api/leagues/{id})
#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

/// Map a domain error onto its status code, with the message as a json body.
fn error_response(e: &LeagueError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        LeagueError::LeagueNotFound
        | LeagueError::SeasonNotFound
        | LeagueError::TeamNotFound
        | LeagueError::FixtureNotFound
        | LeagueError::RoundNotFound
        | LeagueError::StadiumNotFound
        | LeagueError::CoachNotFound
        | LeagueError::CountryNotFound => HttpResponse::NotFound().json(body),
        LeagueError::NotEnoughTeams { .. }
        | LeagueError::WrongTeamCount { .. }
        | LeagueError::InvalidStartDate(_) => HttpResponse::BadRequest().json(body),
        LeagueError::DuplicateStadiumName(_) => HttpResponse::Conflict().json(body),
        LeagueError::Storage(_) => HttpResponse::InternalServerError().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-manager-web",
    })
}

/// Create a season (returns it with id; leagues reference it afterwards).
#[post("/api/seasons")]
async fn api_create_season(state: AppState, body: Json<CreateSeasonBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let season = g.insert_season(Season::new(body.name.trim()));
    HttpResponse::Created().json(season)
}

/// Create a league within an existing season.
#[post("/api/leagues")]
async fn api_create_league(state: AppState, body: Json<CreateLeagueBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.season(body.season_id).is_none() {
        return error_response(&LeagueError::SeasonNotFound);
    }
    let league = g.insert_league(League::new(body.name.trim(), body.season_id));
    HttpResponse::Created().json(league)
}

/// Register a team in an existing league.
#[post("/api/teams")]
async fn api_create_team(state: AppState, body: Json<CreateTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.league(body.league_id).is_none() {
        return error_response(&LeagueError::LeagueNotFound);
    }
    let team = g.insert_team(Team::new(body.name.trim(), body.league_id));
    HttpResponse::Created().json(team)
}

/// Create a country (referenced by coach nationalities).
#[post("/api/countries")]
async fn api_create_country(state: AppState, body: Json<CreateCountryBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let country = g.insert_country(Country::new(body.name.trim()));
    HttpResponse::Created().json(country)
}

/// All teams registered in a league.
#[get("/api/leagues/{id}/teams")]
async fn api_league_teams(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.league(path.id).is_none() {
        return error_response(&LeagueError::LeagueNotFound);
    }
    HttpResponse::Ok().json(g.teams_by_league(path.id))
}

/// Generate the league's round-robin schedule for a season.
#[post("/api/leagues/{id}/schedule")]
async fn api_generate_schedule(
    state: AppState,
    path: Path<IdPath>,
    body: Json<GenerateScheduleBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match generate_league_schedule(&mut g, path.id, body.season_id, &body.start_date, Utc::now()) {
        Ok(fixtures) => HttpResponse::Created().json(fixtures),
        Err(e) => error_response(&e),
    }
}

/// The league's schedule: all fixtures, populated, in kickoff order.
#[get("/api/leagues/{id}/schedule")]
async fn api_get_schedule(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.league(path.id).is_none() {
        return error_response(&LeagueError::LeagueNotFound);
    }
    let fixtures: Vec<FixtureView> = g
        .fixtures_by_league(path.id)
        .into_iter()
        .map(|f| g.populate_fixture(f))
        .collect();
    HttpResponse::Ok().json(fixtures)
}

/// The league's rounds in calendar order.
#[get("/api/leagues/{id}/rounds")]
async fn api_get_rounds(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.league(path.id).is_none() {
        return error_response(&LeagueError::LeagueNotFound);
    }
    HttpResponse::Ok().json(g.rounds_by_league(path.id))
}

/// Delete the league's schedule (fixtures and rounds) so it can be regenerated.
#[delete("/api/leagues/{id}/fixtures")]
async fn api_delete_fixtures(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let deleted = g.remove_schedule(path.id);
    HttpResponse::Ok().json(serde_json::json!({ "deleted": deleted }))
}

/// Completed fixtures still waiting for a result.
#[get("/api/leagues/{id}/fixtures/completed")]
async fn api_completed_fixtures(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.league(path.id).is_none() {
        return error_response(&LeagueError::LeagueNotFound);
    }
    let fixtures: Vec<FixtureView> = g
        .completed_fixtures_by_league(path.id)
        .into_iter()
        .map(|f| g.populate_fixture(f))
        .collect();
    HttpResponse::Ok().json(fixtures)
}

/// Fixtures whose result has been recorded and approved.
#[get("/api/leagues/{id}/fixtures/filled")]
async fn api_filled_fixtures(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.league(path.id).is_none() {
        return error_response(&LeagueError::LeagueNotFound);
    }
    let fixtures: Vec<FixtureView> = g
        .filled_fixtures_by_league(path.id)
        .into_iter()
        .map(|f| g.populate_fixture(f))
        .collect();
    HttpResponse::Ok().json(fixtures)
}

/// Get one round by id.
#[get("/api/rounds/{id}")]
async fn api_get_round(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.round(path.id) {
        Some(round) => HttpResponse::Ok().json(round),
        None => error_response(&LeagueError::RoundNotFound),
    }
}

/// Get one fixture by id, populated.
#[get("/api/fixtures/{id}")]
async fn api_get_fixture(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.fixture(path.id) {
        Some(fixture) => HttpResponse::Ok().json(g.populate_fixture(fixture)),
        None => error_response(&LeagueError::FixtureNotFound),
    }
}

/// Edit a fixture: move it, or swap the teams playing.
#[put("/api/fixtures/{id}")]
async fn api_edit_fixture(
    state: AppState,
    path: Path<IdPath>,
    body: Json<FixtureUpdate>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.update_fixture(path.id, &body) {
        Ok(fixture) => {
            let view = g.populate_fixture(&fixture);
            HttpResponse::Ok().json(view)
        }
        Err(e) => error_response(&e),
    }
}

/// The season a fixture belongs to.
#[get("/api/fixtures/{id}/season")]
async fn api_fixture_season(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let fixture = match g.fixture(path.id) {
        Some(f) => f,
        None => return error_response(&LeagueError::FixtureNotFound),
    };
    match g.season(fixture.season) {
        Some(season) => HttpResponse::Ok().json(season),
        None => error_response(&LeagueError::SeasonNotFound),
    }
}

/// Record the final score of a fixture.
#[post("/api/fixtures/{id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<IdPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.record_result(path.id, body.home_goals, body.away_goals) {
        Ok(fixture) => {
            let view = g.populate_fixture(&fixture);
            HttpResponse::Ok().json(view)
        }
        Err(e) => error_response(&e),
    }
}

/// All fixtures a team plays in, home or away.
#[get("/api/teams/{id}/fixtures")]
async fn api_team_fixtures(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.team(path.id).is_none() {
        return error_response(&LeagueError::TeamNotFound);
    }
    let fixtures: Vec<FixtureView> = g
        .fixtures_by_team(path.id)
        .into_iter()
        .map(|f| g.populate_fixture(f))
        .collect();
    HttpResponse::Ok().json(fixtures)
}

/// A team's goals scored and conceded over the current season.
#[get("/api/teams/{id}/goals")]
async fn api_team_goals(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match team_goals_report(&mut g, path.id) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(&e),
    }
}

/// Put a coach in charge of a team.
#[put("/api/teams/{id}/coach")]
async fn api_assign_coach(
    state: AppState,
    path: Path<IdPath>,
    body: Json<AssignCoachBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.assign_coach(path.id, body.coach_id) {
        Ok(()) => match g.team(path.id) {
            Some(team) => HttpResponse::Ok().json(team),
            None => error_response(&LeagueError::TeamNotFound),
        },
        Err(e) => error_response(&e),
    }
}

/// Check whether a stadium name is still free (used by client-side forms).
#[post("/api/stadiums/check-name")]
async fn api_check_stadium_name(state: AppState, body: Json<CheckStadiumNameBody>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let available = body.is_edit || !g.stadium_name_taken(body.name.trim());
    HttpResponse::Ok().json(serde_json::json!({ "available": available }))
}

/// Create a stadium; names are unique.
#[post("/api/stadiums")]
async fn api_create_stadium(state: AppState, body: Json<CreateStadiumBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let stadium = Stadium::new(body.name.trim(), body.city.clone(), body.capacity);
    match g.insert_stadium(stadium) {
        Ok(stadium) => HttpResponse::Created().json(stadium),
        Err(e) => error_response(&e),
    }
}

/// All stadiums, sorted by name.
#[get("/api/stadiums")]
async fn api_list_stadiums(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.stadiums())
}

/// Get one stadium by id.
#[get("/api/stadiums/{id}")]
async fn api_get_stadium(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.stadium(path.id) {
        Some(stadium) => HttpResponse::Ok().json(stadium),
        None => error_response(&LeagueError::StadiumNotFound),
    }
}

/// Edit a stadium; renaming onto a taken name is rejected.
#[put("/api/stadiums/{id}")]
async fn api_edit_stadium(
    state: AppState,
    path: Path<IdPath>,
    body: Json<StadiumUpdate>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.update_stadium(path.id, &body) {
        Ok(stadium) => HttpResponse::Ok().json(stadium),
        Err(e) => error_response(&e),
    }
}

/// Delete a stadium.
#[delete("/api/stadiums/{id}")]
async fn api_delete_stadium(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove_stadium(path.id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "Stadium deleted" })),
        Err(e) => error_response(&e),
    }
}

/// Create a coach profile, or update the profile already registered for the
/// same user account.
#[post("/api/coaches")]
async fn api_upsert_coach(state: AppState, body: Json<UpsertCoachBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let (coach, created) = g.upsert_coach(
        body.user,
        body.name.trim().to_string(),
        body.nationality,
        body.team,
    );
    if created {
        HttpResponse::Created().json(coach)
    } else {
        HttpResponse::Ok().json(coach)
    }
}

/// All coaches with nationality and teams resolved.
#[get("/api/coaches")]
async fn api_list_coaches(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let coaches: Vec<_> = g
        .coaches()
        .into_iter()
        .map(|c| g.populate_coach(c))
        .collect();
    HttpResponse::Ok().json(coaches)
}

/// The coach profile belonging to a user account.
#[get("/api/coaches/by-user/{id}")]
async fn api_coach_by_user(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.coach_by_user(path.id) {
        Some(coach) => HttpResponse::Ok().json(coach),
        None => error_response(&LeagueError::CoachNotFound),
    }
}

/// Get one coach by id with nationality and teams resolved.
#[get("/api/coaches/{id}")]
async fn api_get_coach(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.coach(path.id) {
        Some(coach) => HttpResponse::Ok().json(g.populate_coach(coach)),
        None => error_response(&LeagueError::CoachNotFound),
    }
}

/// Delete a coach; their team keeps playing, uncoached.
#[delete("/api/coaches/{id}")]
async fn api_delete_coach(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove_coach(path.id) {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "message": "Coach deleted" })),
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
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(LeagueDb::new()));

    // Background task: once a day, mark fixtures whose end time has passed
    let state_sweep = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let mut g = match state_sweep.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let updated = g.sweep_completed(Utc::now());
            if updated > 0 {
                log::info!("Marked {} fixture(s) completed", updated);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_season)
            .service(api_create_league)
            .service(api_create_team)
            .service(api_create_country)
            .service(api_league_teams)
            .service(api_generate_schedule)
            .service(api_get_schedule)
            .service(api_get_rounds)
            .service(api_get_round)
            .service(api_delete_fixtures)
            .service(api_completed_fixtures)
            .service(api_filled_fixtures)
            .service(api_get_fixture)
            .service(api_edit_fixture)
            .service(api_fixture_season)
            .service(api_record_result)
            .service(api_team_fixtures)
            .service(api_team_goals)
            .service(api_assign_coach)
            .service(api_check_stadium_name)
            .service(api_create_stadium)
            .service(api_list_stadiums)
            .service(api_get_stadium)
            .service(api_edit_stadium)
            .service(api_delete_stadium)
            .service(api_upsert_coach)
            .service(api_list_coaches)
            .service(api_coach_by_user)
            .service(api_get_coach)
            .service(api_delete_coach)
    })
    .bind(bind)?
    .run()
    .await
}
