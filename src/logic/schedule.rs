//! Round-robin schedule generation.
//!
//! The generator uses the classic rotation scheme: teams are dealt into a
//! ring of slots, the first slot stays fixed and every other slot rotates one
//! step between rounds. Pairing slot `i` against slot `n - 1 - i` in each
//! round makes every team meet every other team exactly once over `n - 1`
//! rounds. With an odd number of teams a phantom slot is added and whoever
//! draws it sits the round out.
//!
//! Rounds are played on weekends, one round per week starting from the
//! Saturday of the week the season begins. Within a round, pairings
//! alternate between Saturday and Sunday and each fixture gets a random
//! afternoon kickoff.

use crate::logic::dates::{parse_start_date, week_anchor};
use crate::models::{
    Fixture, FixtureId, FixtureView, LeagueError, LeagueId, Round, SeasonId, TeamId,
};
use crate::store::LeagueDb;
use chrono::{DateTime, Duration, Utc, Weekday};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of teams a league must have before a season schedule is generated.
pub const LEAGUE_SIZE: usize = 16;

/// Earliest kickoff hour (UTC).
const KICKOFF_EARLIEST_HOUR: i64 = 11;
/// Kickoffs are drawn on the hour from an afternoon window this many hours wide.
const KICKOFF_WINDOW_HOURS: i64 = 7;

/// A freshly generated season schedule, not yet persisted.
#[derive(Clone, Debug)]
pub struct GeneratedSchedule {
    pub fixtures: Vec<Fixture>,
    pub rounds: Vec<Round>,
}

/// Fisher-Yates shuffle of an owned list, returning it.
pub fn shuffled<T>(mut items: Vec<T>) -> Vec<T> {
    items.shuffle(&mut rand::thread_rng());
    items
}

/// Build a full round-robin schedule for the given teams.
///
/// Every pair of teams meets exactly once. Fixtures land on the weekends
/// following `start_date`, one round per week; any slot that would fall
/// before `now` is moved forward in whole weeks so the weekday sticks.
/// Home advantage alternates with the round's parity.
///
/// The returned rounds carry their fixtures' ids and every fixture points
/// back at its round. Nothing is written to the store here.
pub fn build_schedule(
    team_ids: &[TeamId],
    start_date: DateTime<Utc>,
    now: DateTime<Utc>,
    season: SeasonId,
    league: LeagueId,
) -> Result<GeneratedSchedule, LeagueError> {
    if team_ids.len() < 2 {
        return Err(LeagueError::NotEnoughTeams {
            found: team_ids.len(),
        });
    }

    let mut rng = rand::thread_rng();

    // Deal the teams into slots in random order; an odd league gets a
    // phantom slot so the pairing below always has two ends.
    let mut slots: Vec<Option<TeamId>> = shuffled(team_ids.to_vec())
        .into_iter()
        .map(Some)
        .collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let slot_count = slots.len();
    let round_count = slot_count - 1;
    let pairings_per_round = slot_count / 2;
    let first_saturday = week_anchor(start_date, Weekday::Sat);

    let mut fixtures: Vec<Fixture> = Vec::with_capacity(round_count * pairings_per_round);
    let mut fixtures_per_round: Vec<Vec<usize>> = Vec::with_capacity(round_count);

    for round in 0..round_count {
        let mut this_round: Vec<usize> = Vec::with_capacity(pairings_per_round);
        for pairing in 0..pairings_per_round {
            let (Some(first), Some(second)) = (slots[pairing], slots[slot_count - 1 - pairing])
            else {
                // One end is the phantom slot: that team rests this round.
                continue;
            };
            let (home, away) = if round % 2 == 0 {
                (first, second)
            } else {
                (second, first)
            };
            let weekday = if pairing % 2 == 0 {
                Weekday::Sat
            } else {
                Weekday::Sun
            };
            let start = kickoff(first_saturday, round, weekday, now, &mut rng);
            this_round.push(fixtures.len());
            fixtures.push(Fixture::new(home, away, league, season, start));
        }
        fixtures_per_round.push(this_round);

        // Rotate every slot except the fixed first one.
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    // Wrap each week's fixtures in a round spanning from the earliest
    // kickoff to the latest final whistle.
    let mut rounds: Vec<Round> = Vec::with_capacity(round_count);
    for (index, fixture_indices) in fixtures_per_round.iter().enumerate() {
        let (Some(round_start), Some(round_end)) = (
            fixture_indices
                .iter()
                .map(|&f| fixtures[f].start_date)
                .min(),
            fixture_indices.iter().map(|&f| fixtures[f].end_date).max(),
        ) else {
            continue;
        };
        let name = format!("Round {} - {}", index + 1, round_start.format("%b %d, %Y"));
        let mut round = Round::new(name, round_start, round_end, season, league);
        for &f in fixture_indices {
            fixtures[f].round = Some(round.id);
            round.fixtures.push(fixtures[f].id);
        }
        rounds.push(round);
    }

    Ok(GeneratedSchedule { fixtures, rounds })
}

/// Kickoff time for one pairing: the round's Saturday or Sunday at a random
/// afternoon hour, pushed forward week by week until it is not in the past.
fn kickoff(
    first_saturday: DateTime<Utc>,
    round: usize,
    weekday: Weekday,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> DateTime<Utc> {
    let mut day = first_saturday + Duration::weeks(round as i64);
    if weekday == Weekday::Sun {
        day += Duration::days(1);
    }
    let hour = KICKOFF_EARLIEST_HOUR + rng.gen_range(0..KICKOFF_WINDOW_HOURS);
    let mut start = day + Duration::hours(hour);
    while start < now {
        start += Duration::weeks(1);
    }
    start
}

/// Generate and persist the season schedule for a league.
///
/// The league must exist, have at least two registered teams and be at full
/// strength before anything is generated. On success the fixtures and their
/// rounds are stored in one step and the new fixtures are returned populated,
/// in generation order.
pub fn generate_league_schedule(
    db: &mut LeagueDb,
    league_id: LeagueId,
    season_id: SeasonId,
    start_date: &str,
    now: DateTime<Utc>,
) -> Result<Vec<FixtureView>, LeagueError> {
    if db.league(league_id).is_none() {
        return Err(LeagueError::LeagueNotFound);
    }
    let team_ids: Vec<TeamId> = db
        .teams_by_league(league_id)
        .iter()
        .map(|t| t.id)
        .collect();
    if team_ids.len() < 2 {
        return Err(LeagueError::NotEnoughTeams {
            found: team_ids.len(),
        });
    }
    let start = parse_start_date(start_date)?;
    if team_ids.len() != LEAGUE_SIZE {
        return Err(LeagueError::WrongTeamCount {
            expected: LEAGUE_SIZE,
            found: team_ids.len(),
        });
    }

    let schedule = build_schedule(&team_ids, start, now, season_id, league_id)?;
    let fixture_ids: Vec<FixtureId> = schedule.fixtures.iter().map(|f| f.id).collect();
    db.insert_schedule(schedule.fixtures, schedule.rounds);

    Ok(fixture_ids
        .iter()
        .filter_map(|&id| db.fixture(id).map(|f| db.populate_fixture(f)))
        .collect())
}
