//! Data structures for the league backend: fixtures, rounds, teams, coaches, stadiums.

mod fixture;
mod league;
mod stadium;
mod stats;
mod team;

pub use fixture::{
    Fixture, FixtureId, FixtureUpdate, FixtureView, NamedRef, Round, RoundId,
    FIXTURE_DURATION_HOURS,
};
pub use league::{League, LeagueError, LeagueId, Season, SeasonId};
pub use stadium::{Stadium, StadiumId, StadiumUpdate};
pub use stats::{GoalsLine, GoalsReport, TeamStat, TeamStatId};
pub use team::{Coach, CoachId, CoachView, Country, CountryId, Team, TeamId, UserId};
