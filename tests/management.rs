//! Integration tests for store management: stadiums, coaches, results, feeds.

use chrono::{DateTime, TimeZone, Utc};
use league_manager_web::{
    team_goals_report, Country, Fixture, FixtureUpdate, GoalsLine, League, LeagueDb, LeagueError,
    Round, Season, Stadium, StadiumUpdate, Team, TeamStat,
};
use uuid::Uuid;

fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// A store holding one season and one league, nothing else.
fn seeded() -> (LeagueDb, Uuid, Uuid) {
    let mut db = LeagueDb::new();
    let season = db.insert_season(Season::new("2024/25"));
    let league = db.insert_league(League::new("Premier", season.id));
    (db, league.id, season.id)
}

#[test]
fn stadium_names_are_unique() {
    let mut db = LeagueDb::new();
    db.insert_stadium(Stadium::new("Camp Nou", Some("Barcelona".into()), Some(99_000)))
        .unwrap();
    let err = db
        .insert_stadium(Stadium::new("Camp Nou", None, None))
        .unwrap_err();
    assert_eq!(err, LeagueError::DuplicateStadiumName("Camp Nou".into()));
    assert!(db.stadium_name_taken("Camp Nou"));
    assert!(!db.stadium_name_taken("Anfield"));
    assert_eq!(db.stadiums().len(), 1);
}

#[test]
fn stadium_rename_conflicts_with_other_stadiums_only() {
    let mut db = LeagueDb::new();
    let alpha = db.insert_stadium(Stadium::new("Alpha Arena", None, None)).unwrap();
    let beta = db.insert_stadium(Stadium::new("Beta Park", None, None)).unwrap();

    // renaming onto another stadium's name is a conflict
    let update = StadiumUpdate {
        name: Some("Alpha Arena".into()),
        ..Default::default()
    };
    let err = db.update_stadium(beta.id, &update).unwrap_err();
    assert_eq!(err, LeagueError::DuplicateStadiumName("Alpha Arena".into()));

    // re-submitting a stadium's own name is not
    let kept = db.update_stadium(alpha.id, &update).unwrap();
    assert_eq!(kept.name, "Alpha Arena");

    // partial updates leave the other fields alone
    let update = StadiumUpdate {
        city: Some("Athens".into()),
        capacity: Some(30_000),
        ..Default::default()
    };
    let updated = db.update_stadium(alpha.id, &update).unwrap();
    assert_eq!(updated.name, "Alpha Arena");
    assert_eq!(updated.city.as_deref(), Some("Athens"));
    assert_eq!(updated.capacity, Some(30_000));

    let err = db
        .update_stadium(Uuid::new_v4(), &StadiumUpdate::default())
        .unwrap_err();
    assert_eq!(err, LeagueError::StadiumNotFound);
}

#[test]
fn deleting_a_stadium_frees_its_name() {
    let mut db = LeagueDb::new();
    let arena = db.insert_stadium(Stadium::new("Alpha Arena", None, None)).unwrap();
    db.remove_stadium(arena.id).unwrap();
    assert!(db.stadium(arena.id).is_none());
    assert!(!db.stadium_name_taken("Alpha Arena"));
    assert_eq!(
        db.remove_stadium(arena.id).unwrap_err(),
        LeagueError::StadiumNotFound
    );
}

#[test]
fn coach_upsert_is_keyed_by_user() {
    let (mut db, league, _) = seeded();
    let spain = db.insert_country(Country::new("Spain"));
    let team = db.insert_team(Team::new("Alpha", league));
    let user = Uuid::new_v4();

    let (coach, created) = db.upsert_coach(user, "Pep".into(), spain.id, None);
    assert!(created);
    assert_eq!(coach.team, None);

    // same user again: the profile is updated, not duplicated
    let (updated, created) = db.upsert_coach(user, "Pep Guardiola".into(), spain.id, Some(team.id));
    assert!(!created);
    assert_eq!(updated.id, coach.id);
    assert_eq!(updated.name, "Pep Guardiola");
    assert_eq!(updated.team, Some(team.id));
    assert_eq!(db.coaches().len(), 1);

    // omitting the team keeps the existing link
    let (kept, _) = db.upsert_coach(user, "Pep Guardiola".into(), spain.id, None);
    assert_eq!(kept.team, Some(team.id));

    assert_eq!(db.coach_by_user(user).unwrap().id, coach.id);
    assert!(db.coach_by_user(Uuid::new_v4()).is_none());
}

#[test]
fn coach_views_resolve_country_and_teams() {
    let (mut db, league, _) = seeded();
    let spain = db.insert_country(Country::new("Spain"));
    let team = db.insert_team(Team::new("Alpha", league));
    let (coach, _) = db.upsert_coach(Uuid::new_v4(), "Pep".into(), spain.id, None);
    db.assign_coach(team.id, coach.id).unwrap();

    let view = db.populate_coach(db.coach(coach.id).unwrap());
    assert_eq!(view.nationality, "Spain");
    assert_eq!(view.teams, vec![format!("Alpha:{}", team.id)]);

    // a dangling country renders as an empty string, not an error
    let (stray, _) = db.upsert_coach(Uuid::new_v4(), "Jose".into(), Uuid::new_v4(), None);
    let view = db.populate_coach(db.coach(stray.id).unwrap());
    assert_eq!(view.nationality, "");
    assert!(view.teams.is_empty());
}

#[test]
fn reassigning_a_coach_moves_the_link() {
    let (mut db, league, _) = seeded();
    let spain = db.insert_country(Country::new("Spain"));
    let alpha = db.insert_team(Team::new("Alpha", league));
    let beta = db.insert_team(Team::new("Beta", league));
    let (coach, _) = db.upsert_coach(Uuid::new_v4(), "Pep".into(), spain.id, None);

    db.assign_coach(alpha.id, coach.id).unwrap();
    db.assign_coach(beta.id, coach.id).unwrap();

    // the coach leads one team at a time
    assert_eq!(db.team(alpha.id).unwrap().coach, None);
    assert_eq!(db.team(beta.id).unwrap().coach, Some(coach.id));
    assert_eq!(db.coach(coach.id).unwrap().team, Some(beta.id));
    let view = db.populate_coach(db.coach(coach.id).unwrap());
    assert_eq!(view.teams, vec![format!("Beta:{}", beta.id)]);
}

#[test]
fn giving_a_team_a_new_coach_unlinks_the_old_one() {
    let (mut db, league, _) = seeded();
    let spain = db.insert_country(Country::new("Spain"));
    let team = db.insert_team(Team::new("Alpha", league));
    let (first, _) = db.upsert_coach(Uuid::new_v4(), "Pep".into(), spain.id, None);
    let (second, _) = db.upsert_coach(Uuid::new_v4(), "Xavi".into(), spain.id, None);

    db.assign_coach(team.id, first.id).unwrap();
    db.assign_coach(team.id, second.id).unwrap();

    // the displaced coach drops their side of the link too
    assert_eq!(db.coach(first.id).unwrap().team, None);
    assert_eq!(db.coach(second.id).unwrap().team, Some(team.id));
    assert_eq!(db.team(team.id).unwrap().coach, Some(second.id));

    // re-assigning the sitting coach changes nothing
    db.assign_coach(team.id, second.id).unwrap();
    assert_eq!(db.coach(second.id).unwrap().team, Some(team.id));
    assert_eq!(db.team(team.id).unwrap().coach, Some(second.id));

    // deleting the displaced coach leaves the current link alone
    db.remove_coach(first.id).unwrap();
    assert_eq!(db.team(team.id).unwrap().coach, Some(second.id));
}

#[test]
fn deleting_a_coach_unlinks_their_team() {
    let (mut db, league, _) = seeded();
    let spain = db.insert_country(Country::new("Spain"));
    let team = db.insert_team(Team::new("Alpha", league));
    let (coach, _) = db.upsert_coach(Uuid::new_v4(), "Pep".into(), spain.id, None);

    assert_eq!(
        db.assign_coach(team.id, Uuid::new_v4()).unwrap_err(),
        LeagueError::CoachNotFound
    );
    assert_eq!(
        db.assign_coach(Uuid::new_v4(), coach.id).unwrap_err(),
        LeagueError::TeamNotFound
    );

    db.assign_coach(team.id, coach.id).unwrap();
    assert_eq!(db.team(team.id).unwrap().coach, Some(coach.id));
    assert_eq!(db.coach(coach.id).unwrap().team, Some(team.id));

    db.remove_coach(coach.id).unwrap();
    assert!(db.coach(coach.id).is_none());
    assert_eq!(db.team(team.id).unwrap().coach, None);
    assert_eq!(
        db.remove_coach(coach.id).unwrap_err(),
        LeagueError::CoachNotFound
    );
}

#[test]
fn goals_report_sums_stats_and_caches_totals() {
    let (mut db, league, season) = seeded();
    let team = db.insert_team(Team::new("Alpha", league));
    db.insert_team_stat(TeamStat::new(team.id, season, 3, 1));
    db.insert_team_stat(TeamStat::new(team.id, season, 2, 2));
    // another season's record stays out of the totals
    db.insert_team_stat(TeamStat::new(team.id, Uuid::new_v4(), 9, 9));

    let report = team_goals_report(&mut db, team.id).unwrap();
    assert_eq!(
        report.goals_scored,
        vec![GoalsLine {
            league: "Premier".into(),
            season: "2024/25".into(),
            count: 5,
        }]
    );
    assert_eq!(
        report.goals_lost,
        vec![GoalsLine {
            league: "Premier".into(),
            season: "2024/25".into(),
            count: 3,
        }]
    );
    assert_eq!(db.goals_totals(team.id, season), Some((5, 3)));

    // a team with no recorded stats reports zeroes
    let idle = db.insert_team(Team::new("Idle", league));
    let report = team_goals_report(&mut db, idle.id).unwrap();
    assert_eq!(report.goals_scored[0].count, 0);
    assert_eq!(report.goals_lost[0].count, 0);
    assert_eq!(db.goals_totals(idle.id, season), Some((0, 0)));

    assert_eq!(
        team_goals_report(&mut db, Uuid::new_v4()).unwrap_err(),
        LeagueError::TeamNotFound
    );
}

#[test]
fn editing_a_fixture_moves_its_end_time() {
    let (mut db, league, season) = seeded();
    let home = db.insert_team(Team::new("Alpha", league));
    let away = db.insert_team(Team::new("Beta", league));
    let fixture = Fixture::new(home.id, away.id, league, season, utc(2024, 1, 6, 12));
    db.insert_fixtures(vec![fixture.clone()]);

    let update = FixtureUpdate {
        start_date: Some(utc(2024, 1, 13, 15)),
        ..Default::default()
    };
    let moved = db.update_fixture(fixture.id, &update).unwrap();
    assert_eq!(moved.start_date, utc(2024, 1, 13, 15));
    assert_eq!(moved.end_date, utc(2024, 1, 13, 17)); // start + 2h

    // swapping one side leaves the rest untouched
    let gamma = db.insert_team(Team::new("Gamma", league));
    let update = FixtureUpdate {
        away_team: Some(gamma.id),
        ..Default::default()
    };
    let swapped = db.update_fixture(fixture.id, &update).unwrap();
    assert_eq!(swapped.away_team, gamma.id);
    assert_eq!(swapped.home_team, home.id);
    assert_eq!(swapped.start_date, utc(2024, 1, 13, 15));

    assert_eq!(
        db.update_fixture(Uuid::new_v4(), &FixtureUpdate::default())
            .unwrap_err(),
        LeagueError::FixtureNotFound
    );
}

#[test]
fn recording_a_result_approves_and_writes_stats() {
    let (mut db, league, season) = seeded();
    let home = db.insert_team(Team::new("Alpha", league));
    let away = db.insert_team(Team::new("Beta", league));
    let fixture = Fixture::new(home.id, away.id, league, season, utc(2024, 1, 6, 12));
    db.insert_fixtures(vec![fixture.clone()]);

    let updated = db.record_result(fixture.id, 2, 1).unwrap();
    assert!(updated.is_result_approved);
    assert!(!updated.is_completed); // completion belongs to the sweep

    let home_stats = db.team_stats_for(home.id, season);
    assert_eq!(home_stats.len(), 1);
    assert_eq!(home_stats[0].goals_for, 2);
    assert_eq!(home_stats[0].goals_against, 1);
    let away_stats = db.team_stats_for(away.id, season);
    assert_eq!(away_stats[0].goals_for, 1);
    assert_eq!(away_stats[0].goals_against, 2);

    assert_eq!(
        db.record_result(Uuid::new_v4(), 0, 0).unwrap_err(),
        LeagueError::FixtureNotFound
    );
}

#[test]
fn completed_and_filled_feeds_filter_fixtures() {
    let (mut db, league, season) = seeded();
    let home = db.insert_team(Team::new("Alpha", league));
    let away = db.insert_team(Team::new("Beta", league));

    let mut played = Fixture::new(home.id, away.id, league, season, utc(2024, 1, 6, 12));
    played.is_completed = true;
    let mut settled = Fixture::new(away.id, home.id, league, season, utc(2024, 1, 13, 12));
    settled.is_completed = true;
    settled.is_result_approved = true;
    let upcoming = Fixture::new(home.id, away.id, league, season, utc(2024, 1, 20, 12));
    db.insert_fixtures(vec![played.clone(), settled.clone(), upcoming.clone()]);

    let completed = db.completed_fixtures_by_league(league);
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, played.id);

    let filled = db.filled_fixtures_by_league(league);
    assert_eq!(filled.len(), 1);
    assert_eq!(filled[0].id, settled.id);
}

#[test]
fn removing_a_schedule_clears_fixtures_and_rounds() {
    let (mut db, league, season) = seeded();
    let home = db.insert_team(Team::new("Alpha", league));
    let away = db.insert_team(Team::new("Beta", league));
    let mut fixture = Fixture::new(home.id, away.id, league, season, utc(2024, 1, 6, 12));
    let mut round = Round::new(
        "Round 1 - Jan 06, 2024",
        fixture.start_date,
        fixture.end_date,
        season,
        league,
    );
    fixture.round = Some(round.id);
    round.fixtures.push(fixture.id);
    db.insert_schedule(vec![fixture], vec![round]);

    // a second league keeps its own schedule
    let other = db.insert_league(League::new("Second", season));
    let c = db.insert_team(Team::new("Gamma", other.id));
    let d = db.insert_team(Team::new("Delta", other.id));
    let kept = Fixture::new(c.id, d.id, other.id, season, utc(2024, 1, 6, 12));
    db.insert_fixtures(vec![kept.clone()]);

    assert_eq!(db.remove_schedule(league), 1);
    assert!(db.fixtures_by_league(league).is_empty());
    assert!(db.rounds_by_league(league).is_empty());
    assert_eq!(db.fixtures_by_league(other.id).len(), 1);
    // deleting again is a no-op
    assert_eq!(db.remove_schedule(league), 0);
}

#[test]
fn fixtures_by_team_cover_home_and_away_in_kickoff_order() {
    let (mut db, league, season) = seeded();
    let a = db.insert_team(Team::new("Alpha", league));
    let b = db.insert_team(Team::new("Beta", league));
    let c = db.insert_team(Team::new("Gamma", league));

    let later = Fixture::new(a.id, b.id, league, season, utc(2024, 1, 13, 12));
    let earlier = Fixture::new(c.id, a.id, league, season, utc(2024, 1, 6, 12));
    let unrelated = Fixture::new(b.id, c.id, league, season, utc(2024, 1, 7, 12));
    db.insert_fixtures(vec![later.clone(), earlier.clone(), unrelated.clone()]);

    let of_a: Vec<_> = db.fixtures_by_team(a.id).iter().map(|f| f.id).collect();
    assert_eq!(of_a, vec![earlier.id, later.id]);
}

#[test]
fn populated_fixtures_resolve_names() {
    let (mut db, league, season) = seeded();
    let home = db.insert_team(Team::new("Alpha", league));
    let away = db.insert_team(Team::new("Beta", league));
    let mut fixture = Fixture::new(home.id, away.id, league, season, utc(2024, 1, 6, 12));
    let mut round = Round::new(
        "Round 1 - Jan 06, 2024",
        fixture.start_date,
        fixture.end_date,
        season,
        league,
    );
    fixture.round = Some(round.id);
    round.fixtures.push(fixture.id);
    db.insert_schedule(vec![fixture.clone()], vec![round]);

    let view = db.populate_fixture(db.fixture(fixture.id).unwrap());
    assert_eq!(view.home_team.name, "Alpha");
    assert_eq!(view.away_team.name, "Beta");
    assert_eq!(view.league.name, "Premier");
    assert_eq!(view.round.as_ref().unwrap().name, "Round 1 - Jan 06, 2024");

    // dangling references render as empty names, not errors
    let stray = Fixture::new(Uuid::new_v4(), Uuid::new_v4(), league, season, utc(2024, 1, 6, 12));
    db.insert_fixtures(vec![stray.clone()]);
    let view = db.populate_fixture(db.fixture(stray.id).unwrap());
    assert_eq!(view.home_team.name, "");
    assert!(view.round.is_none());
}

#[test]
fn teams_by_league_sort_by_name() {
    let (mut db, league, season) = seeded();
    db.insert_team(Team::new("Zeta", league));
    db.insert_team(Team::new("Alpha", league));
    db.insert_team(Team::new("Midway", league));
    // a team in another league stays out of the listing
    let other = db.insert_league(League::new("Second", season));
    db.insert_team(Team::new("Elsewhere", other.id));

    let names: Vec<_> = db
        .teams_by_league(league)
        .iter()
        .map(|t| t.name.clone())
        .collect();
    assert_eq!(names, vec!["Alpha", "Midway", "Zeta"]);
}
