//! Aggregated goal statistics per team.

use crate::models::{GoalsLine, GoalsReport, LeagueError, TeamId};
use crate::store::LeagueDb;

/// Sum a team's goals scored and conceded over its league's current season.
///
/// The totals are folded from the per-fixture stat records, written back to
/// the store's totals cache and returned as one report line per direction.
pub fn team_goals_report(db: &mut LeagueDb, team_id: TeamId) -> Result<GoalsReport, LeagueError> {
    let team = db.team(team_id).ok_or(LeagueError::TeamNotFound)?;
    let league_id = team.league;
    let league = db.league(league_id).ok_or(LeagueError::LeagueNotFound)?;
    let season_id = league.season;
    let league_name = league.name.clone();
    let season_name = db
        .season(season_id)
        .map(|s| s.name.clone())
        .unwrap_or_default();

    let (scored, conceded) = db
        .team_stats_for(team_id, season_id)
        .into_iter()
        .fold((0u32, 0u32), |(gf, ga), stat| {
            (gf + stat.goals_for, ga + stat.goals_against)
        });

    db.upsert_goals_totals(team_id, season_id, scored, conceded);

    Ok(GoalsReport {
        goals_scored: vec![GoalsLine {
            league: league_name.clone(),
            season: season_name.clone(),
            count: scored,
        }],
        goals_lost: vec![GoalsLine {
            league: league_name,
            season: season_name,
            count: conceded,
        }],
    })
}
