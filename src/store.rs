//! In-memory document store: one collection per model, keyed by id.
//!
//! The whole store sits behind a single `RwLock` in the web layer. Every
//! mutating operation runs inside one write-lock scope, so multi-step writes
//! (schedule fixtures plus their rounds) are atomic with respect to other
//! requests and the completion sweep.

use crate::models::{
    Coach, CoachId, CoachView, Country, CountryId, Fixture, FixtureId, FixtureUpdate, FixtureView,
    League, LeagueError, LeagueId, NamedRef, Round, RoundId, Season, SeasonId, Stadium, StadiumId,
    StadiumUpdate, Team, TeamId, TeamStat, TeamStatId, UserId, FIXTURE_DURATION_HOURS,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// All collections of the league backend.
#[derive(Debug, Default)]
pub struct LeagueDb {
    seasons: HashMap<SeasonId, Season>,
    leagues: HashMap<LeagueId, League>,
    teams: HashMap<TeamId, Team>,
    coaches: HashMap<CoachId, Coach>,
    countries: HashMap<CountryId, Country>,
    stadiums: HashMap<StadiumId, Stadium>,
    fixtures: HashMap<FixtureId, Fixture>,
    rounds: HashMap<RoundId, Round>,
    team_stats: HashMap<TeamStatId, TeamStat>,
    /// Cached goals-scored totals per (team, season), refreshed by the goals report.
    goals_scored_totals: HashMap<(TeamId, SeasonId), u32>,
    goals_conceded_totals: HashMap<(TeamId, SeasonId), u32>,
}

impl LeagueDb {
    pub fn new() -> Self {
        Self::default()
    }

    // --- seasons, leagues, teams ---

    pub fn insert_season(&mut self, season: Season) -> Season {
        self.seasons.insert(season.id, season.clone());
        season
    }

    pub fn season(&self, id: SeasonId) -> Option<&Season> {
        self.seasons.get(&id)
    }

    pub fn insert_league(&mut self, league: League) -> League {
        self.leagues.insert(league.id, league.clone());
        league
    }

    pub fn league(&self, id: LeagueId) -> Option<&League> {
        self.leagues.get(&id)
    }

    pub fn insert_team(&mut self, team: Team) -> Team {
        self.teams.insert(team.id, team.clone());
        team
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    /// All teams registered in a league, sorted by name.
    pub fn teams_by_league(&self, league: LeagueId) -> Vec<&Team> {
        let mut teams: Vec<&Team> = self.teams.values().filter(|t| t.league == league).collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        teams
    }

    /// Link a coach to a team, keeping both sides of the reference in sync.
    /// A coach leads one team at a time and a team has one coach, so the
    /// coach's previous team and the team's previous coach are both unlinked.
    pub fn assign_coach(&mut self, team_id: TeamId, coach_id: CoachId) -> Result<(), LeagueError> {
        if !self.teams.contains_key(&team_id) {
            return Err(LeagueError::TeamNotFound);
        }
        let previous = match self.coaches.get_mut(&coach_id) {
            Some(coach) => coach.team.replace(team_id),
            None => return Err(LeagueError::CoachNotFound),
        };
        if let Some(previous_team) = previous.filter(|p| *p != team_id) {
            if let Some(team) = self.teams.get_mut(&previous_team) {
                team.coach = None;
            }
        }
        let displaced = self
            .teams
            .get_mut(&team_id)
            .and_then(|team| team.coach.replace(coach_id));
        if let Some(former) = displaced.filter(|f| *f != coach_id) {
            if let Some(coach) = self.coaches.get_mut(&former) {
                coach.team = None;
            }
        }
        Ok(())
    }

    // --- coaches and countries ---

    pub fn insert_country(&mut self, country: Country) -> Country {
        self.countries.insert(country.id, country.clone());
        country
    }

    pub fn country(&self, id: CountryId) -> Option<&Country> {
        self.countries.get(&id)
    }

    /// Create a coach profile, or update the existing profile for the same user.
    /// Returns the coach and whether it was newly created.
    pub fn upsert_coach(
        &mut self,
        user: UserId,
        name: String,
        nationality: CountryId,
        team: Option<TeamId>,
    ) -> (Coach, bool) {
        if let Some(coach) = self.coaches.values_mut().find(|c| c.user == user) {
            coach.name = name;
            coach.nationality = nationality;
            if team.is_some() {
                coach.team = team;
            }
            return (coach.clone(), false);
        }
        let mut coach = Coach::new(user, name, nationality);
        coach.team = team;
        self.coaches.insert(coach.id, coach.clone());
        (coach, true)
    }

    pub fn coach(&self, id: CoachId) -> Option<&Coach> {
        self.coaches.get(&id)
    }

    pub fn coach_by_user(&self, user: UserId) -> Option<&Coach> {
        self.coaches.values().find(|c| c.user == user)
    }

    /// All coaches, sorted by name.
    pub fn coaches(&self) -> Vec<&Coach> {
        let mut coaches: Vec<&Coach> = self.coaches.values().collect();
        coaches.sort_by(|a, b| a.name.cmp(&b.name));
        coaches
    }

    /// Delete a coach, first clearing the back-reference on their team.
    pub fn remove_coach(&mut self, id: CoachId) -> Result<Coach, LeagueError> {
        let coach = self.coaches.remove(&id).ok_or(LeagueError::CoachNotFound)?;
        if let Some(team_id) = coach.team {
            if let Some(team) = self.teams.get_mut(&team_id) {
                team.coach = None;
            }
        }
        Ok(coach)
    }

    /// Coach with nationality resolved and their teams as "Name:id" strings.
    pub fn populate_coach(&self, coach: &Coach) -> CoachView {
        let mut teams: Vec<String> = self
            .teams
            .values()
            .filter(|t| t.coach == Some(coach.id))
            .map(|t| format!("{}:{}", t.name, t.id))
            .collect();
        teams.sort();
        CoachView {
            id: coach.id,
            user: coach.user,
            name: coach.name.clone(),
            nationality: self
                .countries
                .get(&coach.nationality)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            teams,
        }
    }

    // --- stadiums ---

    /// Insert a stadium; names are unique, duplicates are a conflict.
    pub fn insert_stadium(&mut self, stadium: Stadium) -> Result<Stadium, LeagueError> {
        if self.stadium_name_taken(&stadium.name) {
            return Err(LeagueError::DuplicateStadiumName(stadium.name));
        }
        self.stadiums.insert(stadium.id, stadium.clone());
        Ok(stadium)
    }

    pub fn stadium(&self, id: StadiumId) -> Option<&Stadium> {
        self.stadiums.get(&id)
    }

    /// All stadiums, sorted by name.
    pub fn stadiums(&self) -> Vec<&Stadium> {
        let mut stadiums: Vec<&Stadium> = self.stadiums.values().collect();
        stadiums.sort_by(|a, b| a.name.cmp(&b.name));
        stadiums
    }

    pub fn stadium_name_taken(&self, name: &str) -> bool {
        self.stadiums.values().any(|s| s.name == name)
    }

    /// Apply a field-level stadium update; renaming onto an existing name is a conflict.
    pub fn update_stadium(
        &mut self,
        id: StadiumId,
        update: &StadiumUpdate,
    ) -> Result<Stadium, LeagueError> {
        if let Some(name) = &update.name {
            if self.stadiums.values().any(|s| s.id != id && s.name == *name) {
                return Err(LeagueError::DuplicateStadiumName(name.clone()));
            }
        }
        let stadium = self
            .stadiums
            .get_mut(&id)
            .ok_or(LeagueError::StadiumNotFound)?;
        if let Some(name) = &update.name {
            stadium.name = name.clone();
        }
        if let Some(city) = &update.city {
            stadium.city = Some(city.clone());
        }
        if let Some(capacity) = update.capacity {
            stadium.capacity = Some(capacity);
        }
        Ok(stadium.clone())
    }

    pub fn remove_stadium(&mut self, id: StadiumId) -> Result<(), LeagueError> {
        self.stadiums
            .remove(&id)
            .map(|_| ())
            .ok_or(LeagueError::StadiumNotFound)
    }

    // --- fixtures and rounds ---

    pub fn insert_fixtures(&mut self, fixtures: Vec<Fixture>) {
        for fixture in fixtures {
            self.fixtures.insert(fixture.id, fixture);
        }
    }

    pub fn insert_rounds(&mut self, rounds: Vec<Round>) {
        for round in rounds {
            self.rounds.insert(round.id, round);
        }
    }

    /// Persist a generated schedule. The caller holds the store's write lock,
    /// which is what makes the fixture + round insertion all-or-nothing.
    pub fn insert_schedule(&mut self, fixtures: Vec<Fixture>, rounds: Vec<Round>) {
        self.insert_fixtures(fixtures);
        self.insert_rounds(rounds);
    }

    pub fn fixture(&self, id: FixtureId) -> Option<&Fixture> {
        self.fixtures.get(&id)
    }

    /// A league's fixtures, sorted by kickoff time.
    pub fn fixtures_by_league(&self, league: LeagueId) -> Vec<&Fixture> {
        let mut fixtures: Vec<&Fixture> = self
            .fixtures
            .values()
            .filter(|f| f.league == league)
            .collect();
        fixtures.sort_by_key(|f| f.start_date);
        fixtures
    }

    /// Fixtures where the team plays on either side, sorted by kickoff time.
    pub fn fixtures_by_team(&self, team: TeamId) -> Vec<&Fixture> {
        let mut fixtures: Vec<&Fixture> = self
            .fixtures
            .values()
            .filter(|f| f.home_team == team || f.away_team == team)
            .collect();
        fixtures.sort_by_key(|f| f.start_date);
        fixtures
    }

    /// Completed fixtures whose results still await approval.
    pub fn completed_fixtures_by_league(&self, league: LeagueId) -> Vec<&Fixture> {
        let mut fixtures: Vec<&Fixture> = self
            .fixtures
            .values()
            .filter(|f| f.league == league && f.is_completed && !f.is_result_approved)
            .collect();
        fixtures.sort_by_key(|f| f.start_date);
        fixtures
    }

    /// Fixtures with an approved result.
    pub fn filled_fixtures_by_league(&self, league: LeagueId) -> Vec<&Fixture> {
        let mut fixtures: Vec<&Fixture> = self
            .fixtures
            .values()
            .filter(|f| f.league == league && f.is_result_approved)
            .collect();
        fixtures.sort_by_key(|f| f.start_date);
        fixtures
    }

    /// Remove a league's schedule (fixtures and rounds). Returns how many
    /// fixtures were deleted.
    pub fn remove_schedule(&mut self, league: LeagueId) -> usize {
        let before = self.fixtures.len();
        self.fixtures.retain(|_, f| f.league != league);
        self.rounds.retain(|_, r| r.league != league);
        before - self.fixtures.len()
    }

    /// Apply a field-level fixture update; the end time keeps tracking
    /// start + 2h when the start moves.
    pub fn update_fixture(
        &mut self,
        id: FixtureId,
        update: &FixtureUpdate,
    ) -> Result<Fixture, LeagueError> {
        let fixture = self
            .fixtures
            .get_mut(&id)
            .ok_or(LeagueError::FixtureNotFound)?;
        if let Some(home) = update.home_team {
            fixture.home_team = home;
        }
        if let Some(away) = update.away_team {
            fixture.away_team = away;
        }
        if let Some(start) = update.start_date {
            fixture.start_date = start;
            fixture.end_date = start + Duration::hours(FIXTURE_DURATION_HOURS);
        }
        Ok(fixture.clone())
    }

    /// Record a final score: approve the result and append one stat record
    /// per team. Completion stays with the sweep.
    pub fn record_result(
        &mut self,
        id: FixtureId,
        home_goals: u32,
        away_goals: u32,
    ) -> Result<Fixture, LeagueError> {
        let fixture = self
            .fixtures
            .get_mut(&id)
            .ok_or(LeagueError::FixtureNotFound)?;
        fixture.is_result_approved = true;
        let fixture = fixture.clone();
        self.insert_team_stat(TeamStat::new(
            fixture.home_team,
            fixture.season,
            home_goals,
            away_goals,
        ));
        self.insert_team_stat(TeamStat::new(
            fixture.away_team,
            fixture.season,
            away_goals,
            home_goals,
        ));
        Ok(fixture)
    }

    pub fn round(&self, id: RoundId) -> Option<&Round> {
        self.rounds.get(&id)
    }

    /// A league's rounds, sorted by start time.
    pub fn rounds_by_league(&self, league: LeagueId) -> Vec<&Round> {
        let mut rounds: Vec<&Round> = self
            .rounds
            .values()
            .filter(|r| r.league == league)
            .collect();
        rounds.sort_by_key(|r| r.start_date);
        rounds
    }

    /// Mark every unfinished fixture whose end time has passed as completed.
    /// Returns how many fixtures changed. The sweep owns `is_completed`;
    /// nothing else writes that flag.
    pub fn sweep_completed(&mut self, now: DateTime<Utc>) -> usize {
        let mut updated = 0;
        for fixture in self.fixtures.values_mut() {
            if !fixture.is_completed && fixture.end_date < now {
                fixture.is_completed = true;
                updated += 1;
            }
        }
        updated
    }

    // --- team statistics ---

    pub fn insert_team_stat(&mut self, stat: TeamStat) -> TeamStat {
        self.team_stats.insert(stat.id, stat.clone());
        stat
    }

    pub fn team_stats_for(&self, team: TeamId, season: SeasonId) -> Vec<&TeamStat> {
        self.team_stats
            .values()
            .filter(|s| s.team == team && s.season == season)
            .collect()
    }

    /// Upsert the cached goals totals for a (team, season) pair.
    pub fn upsert_goals_totals(
        &mut self,
        team: TeamId,
        season: SeasonId,
        scored: u32,
        conceded: u32,
    ) {
        self.goals_scored_totals.insert((team, season), scored);
        self.goals_conceded_totals.insert((team, season), conceded);
    }

    pub fn goals_totals(&self, team: TeamId, season: SeasonId) -> Option<(u32, u32)> {
        let scored = self.goals_scored_totals.get(&(team, season)).copied();
        let conceded = self.goals_conceded_totals.get(&(team, season)).copied();
        match (scored, conceded) {
            (None, None) => None,
            (s, c) => Some((s.unwrap_or(0), c.unwrap_or(0))),
        }
    }

    // --- populated views ---

    /// Fixture with team, league and round references resolved to names.
    pub fn populate_fixture(&self, fixture: &Fixture) -> FixtureView {
        FixtureView {
            id: fixture.id,
            home_team: self.team_ref(fixture.home_team),
            away_team: self.team_ref(fixture.away_team),
            league: self.league_ref(fixture.league),
            season: fixture.season,
            round: fixture.round.map(|id| self.round_ref(id)),
            start_date: fixture.start_date,
            end_date: fixture.end_date,
            is_completed: fixture.is_completed,
            is_result_approved: fixture.is_result_approved,
        }
    }

    fn team_ref(&self, id: TeamId) -> NamedRef {
        NamedRef {
            id,
            name: self
                .teams
                .get(&id)
                .map(|t| t.name.clone())
                .unwrap_or_default(),
        }
    }

    fn league_ref(&self, id: LeagueId) -> NamedRef {
        NamedRef {
            id,
            name: self
                .leagues
                .get(&id)
                .map(|l| l.name.clone())
                .unwrap_or_default(),
        }
    }

    fn round_ref(&self, id: RoundId) -> NamedRef {
        NamedRef {
            id,
            name: self
                .rounds
                .get(&id)
                .map(|r| r.name.clone())
                .unwrap_or_default(),
        }
    }
}
