//! Team, Coach and Country documents.

use crate::models::league::LeagueId;
use crate::models::stadium::StadiumId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Unique identifier for a coach.
pub type CoachId = Uuid;

/// Unique identifier for a country.
pub type CountryId = Uuid;

/// External account id a coach profile is keyed by.
pub type UserId = Uuid;

/// A team competing in a league.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub league: LeagueId,
    /// None until a coach is assigned; cleared again when the coach is deleted.
    pub coach: Option<CoachId>,
    pub stadium: Option<StadiumId>,
}

impl Team {
    pub fn new(name: impl Into<String>, league: LeagueId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            league,
            coach: None,
            stadium: None,
        }
    }
}

/// A coach profile, keyed by the external user account that owns it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Coach {
    pub id: CoachId,
    pub user: UserId,
    pub name: String,
    pub nationality: CountryId,
    pub team: Option<TeamId>,
}

impl Coach {
    pub fn new(user: UserId, name: impl Into<String>, nationality: CountryId) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            name: name.into(),
            nationality,
            team: None,
        }
    }
}

/// Coach with nationality and team references resolved (API responses).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CoachView {
    pub id: CoachId,
    pub user: UserId,
    pub name: String,
    pub nationality: String,
    /// The coach's teams as "Name:id" strings.
    pub teams: Vec<String>,
}

/// A country, referenced by coach nationalities.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
