//! Calendar helpers for schedule generation.

use crate::models::LeagueError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};

/// The given weekday within the ISO week containing `date`, at midnight UTC.
///
/// Weeks run Monday through Sunday, so the anchor can land before or after
/// `date` itself: the Saturday of a week containing a Sunday is the day
/// before that Sunday.
pub fn week_anchor(date: DateTime<Utc>, weekday: Weekday) -> DateTime<Utc> {
    let monday =
        date.date_naive() - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    let day = monday + Duration::days(i64::from(weekday.num_days_from_monday()));
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Parse a season start date from a request.
///
/// Accepts RFC 3339 timestamps, bare `YYYY-MM-DDTHH:MM:SS` datetimes and
/// plain `YYYY-MM-DD` dates; everything is interpreted as UTC. Only years
/// 1 through 9999 are accepted, so signed extended years like `+262142-10-01`
/// come back as [`LeagueError::InvalidStartDate`].
pub fn parse_start_date(raw: &str) -> Result<DateTime<Utc>, LeagueError> {
    let date = if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        date.with_timezone(&Utc)
    } else if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        date.and_utc()
    } else if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        date.and_time(NaiveTime::MIN).and_utc()
    } else {
        return Err(LeagueError::InvalidStartDate(raw.to_string()));
    };
    if !(1..=9999).contains(&date.year()) {
        return Err(LeagueError::InvalidStartDate(raw.to_string()));
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn week_anchor_finds_saturday_from_midweek() {
        // Wednesday 2024-01-03 sits in the week of Saturday 2024-01-06.
        let wednesday = Utc.with_ymd_and_hms(2024, 1, 3, 15, 30, 0).unwrap();
        let saturday = week_anchor(wednesday, Weekday::Sat);
        assert_eq!(saturday.weekday(), Weekday::Sat);
        assert_eq!((saturday.year(), saturday.month(), saturday.day()), (2024, 1, 6));
        assert_eq!(saturday.hour(), 0);
    }

    #[test]
    fn week_anchor_steps_back_from_sunday() {
        // Sunday is the last day of the ISO week, so its Saturday is the day before.
        let sunday = Utc.with_ymd_and_hms(2024, 1, 7, 9, 0, 0).unwrap();
        let saturday = week_anchor(sunday, Weekday::Sat);
        assert_eq!((saturday.year(), saturday.month(), saturday.day()), (2024, 1, 6));
    }

    #[test]
    fn week_anchor_keeps_matching_day() {
        let monday = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(week_anchor(monday, Weekday::Mon), monday);
    }

    #[test]
    fn parses_rfc3339_and_plain_dates() {
        let full = parse_start_date("2024-01-06T12:00:00Z").unwrap();
        assert_eq!(full, Utc.with_ymd_and_hms(2024, 1, 6, 12, 0, 0).unwrap());

        let naive = parse_start_date("2024-01-06T12:00:00").unwrap();
        assert_eq!(naive, full);

        let bare = parse_start_date("2024-01-06").unwrap();
        assert_eq!(bare, Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(matches!(
            parse_start_date("next saturday"),
            Err(LeagueError::InvalidStartDate(_))
        ));
        assert!(matches!(
            parse_start_date("06/01/2024"),
            Err(LeagueError::InvalidStartDate(_))
        ));
    }

    #[test]
    fn rejects_years_outside_four_digits() {
        // chrono parses signed extended years, the schedule calendar does not
        assert!(matches!(
            parse_start_date("+262142-10-01"),
            Err(LeagueError::InvalidStartDate(_))
        ));
        assert!(matches!(
            parse_start_date("+10000-01-01"),
            Err(LeagueError::InvalidStartDate(_))
        ));
        assert!(matches!(
            parse_start_date("-0001-06-15"),
            Err(LeagueError::InvalidStartDate(_))
        ));
        assert!(parse_start_date("9999-12-31").is_ok());
    }
}
