//! League and Season documents, plus the backend-wide error type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a league.
pub type LeagueId = Uuid;

/// Unique identifier for a season.
pub type SeasonId = Uuid;

/// Errors that can occur during store and scheduling operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// League does not exist.
    LeagueNotFound,
    /// Season does not exist.
    SeasonNotFound,
    /// Team does not exist.
    TeamNotFound,
    /// Fixture does not exist.
    FixtureNotFound,
    /// Round does not exist.
    RoundNotFound,
    /// Stadium does not exist.
    StadiumNotFound,
    /// Coach does not exist.
    CoachNotFound,
    /// Country does not exist.
    CountryNotFound,
    /// Fewer than two teams in the league; no schedule can be built.
    NotEnoughTeams { found: usize },
    /// League size does not match the required team count.
    WrongTeamCount { expected: usize, found: usize },
    /// Start date could not be parsed as a calendar date.
    InvalidStartDate(String),
    /// A stadium with this name already exists (names are unique).
    DuplicateStadiumName(String),
    /// Underlying storage failed.
    Storage(String),
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::LeagueNotFound => write!(f, "League not found"),
            LeagueError::SeasonNotFound => write!(f, "Season not found"),
            LeagueError::TeamNotFound => write!(f, "Team not found"),
            LeagueError::FixtureNotFound => write!(f, "Fixture not found"),
            LeagueError::RoundNotFound => write!(f, "Round not found"),
            LeagueError::StadiumNotFound => write!(f, "Stadium not found"),
            LeagueError::CoachNotFound => write!(f, "Coach not found"),
            LeagueError::CountryNotFound => write!(f, "Country not found"),
            LeagueError::NotEnoughTeams { found } => {
                write!(f, "Not enough teams found to generate schedule (found {found})")
            }
            LeagueError::WrongTeamCount { expected, found } => {
                write!(f, "Number of teams must be {expected} for this schedule (found {found})")
            }
            LeagueError::InvalidStartDate(raw) => write!(f, "Invalid start date: {raw}"),
            LeagueError::DuplicateStadiumName(name) => {
                write!(f, "Stadium '{name}' already exists")
            }
            LeagueError::Storage(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

/// A season leagues are played within.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub name: String,
}

impl Season {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A league: a group of teams playing a round-robin within one season.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub season: SeasonId,
}

impl League {
    pub fn new(name: impl Into<String>, season: SeasonId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            season,
        }
    }
}
