//! Per-fixture team statistics and the aggregated goals report.

use crate::models::league::SeasonId;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team stat record.
pub type TeamStatId = Uuid;

/// One team's goal tally for a single played fixture.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStat {
    pub id: TeamStatId,
    pub team: TeamId,
    pub season: SeasonId,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl TeamStat {
    pub fn new(team: TeamId, season: SeasonId, goals_for: u32, goals_against: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            team,
            season,
            goals_for,
            goals_against,
        }
    }
}

/// One line of a goals report: a total within a league season.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GoalsLine {
    pub league: String,
    pub season: String,
    pub count: u32,
}

/// Aggregated goals scored and conceded for one team (API response).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GoalsReport {
    pub goals_scored: Vec<GoalsLine>,
    pub goals_lost: Vec<GoalsLine>,
}
