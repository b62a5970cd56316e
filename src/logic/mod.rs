//! League business logic: schedule generation, calendar helpers, statistics.

mod dates;
mod schedule;
mod stats;

pub use dates::{parse_start_date, week_anchor};
pub use schedule::{
    build_schedule, generate_league_schedule, shuffled, GeneratedSchedule, LEAGUE_SIZE,
};
pub use stats::team_goals_report;
