//! Sports league web app: library with models, storage and business logic.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    build_schedule, generate_league_schedule, parse_start_date, shuffled, team_goals_report,
    week_anchor, GeneratedSchedule, LEAGUE_SIZE,
};
pub use models::{
    Coach, CoachId, CoachView, Country, CountryId, Fixture, FixtureId, FixtureUpdate, FixtureView,
    GoalsLine, GoalsReport, League, LeagueError, LeagueId, NamedRef, Round, RoundId, Season,
    SeasonId, Stadium, StadiumId, StadiumUpdate, Team, TeamId, TeamStat, TeamStatId, UserId,
    FIXTURE_DURATION_HOURS,
};
pub use store::LeagueDb;
