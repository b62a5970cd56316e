//! Fixture (a scheduled match) and Round documents, plus populated API views.

use crate::models::league::{LeagueId, SeasonId};
use crate::models::team::TeamId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type FixtureId = Uuid;

/// Unique identifier for a round.
pub type RoundId = Uuid;

/// Every fixture lasts this long; the end time always tracks start + duration.
pub const FIXTURE_DURATION_HOURS: i64 = 2;

/// A single scheduled match between two teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub league: LeagueId,
    pub season: SeasonId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// None until rounds are built, then set exactly once.
    pub round: Option<RoundId>,
    /// Flipped by the daily sweep once the end time has passed.
    pub is_completed: bool,
    /// Set once a final score has been recorded.
    pub is_result_approved: bool,
}

impl Fixture {
    pub fn new(
        home_team: TeamId,
        away_team: TeamId,
        league: LeagueId,
        season: SeasonId,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            home_team,
            away_team,
            league,
            season,
            start_date,
            end_date: start_date + Duration::hours(FIXTURE_DURATION_HOURS),
            round: None,
            is_completed: false,
            is_result_approved: false,
        }
    }
}

/// A named, dated group of fixtures played in the same week.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub season: SeasonId,
    pub league: LeagueId,
    /// Fixture ids in generation order.
    pub fixtures: Vec<FixtureId>,
}

impl Round {
    pub fn new(
        name: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        season: SeasonId,
        league: LeagueId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            end_date,
            season,
            league,
            fixtures: Vec::new(),
        }
    }
}

/// Reference to a named document in populated views.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: Uuid,
    pub name: String,
}

/// Fixture with team, league and round references resolved to names (API responses).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixtureView {
    pub id: FixtureId,
    pub home_team: NamedRef,
    pub away_team: NamedRef,
    pub league: NamedRef,
    pub season: SeasonId,
    pub round: Option<NamedRef>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_completed: bool,
    pub is_result_approved: bool,
}

/// Field-level fixture update; only the listed fields can change.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FixtureUpdate {
    pub home_team: Option<TeamId>,
    pub away_team: Option<TeamId>,
    pub start_date: Option<DateTime<Utc>>,
}
