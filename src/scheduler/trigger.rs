use std::fmt;

use chrono::{DateTime, Days, NaiveTime, TimeDelta, TimeZone};

use crate::error::AppError;

/// When a registered task becomes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Fixed interval measured from the end of the previous run.
    Every(TimeDelta),
    /// Once a day at a wall-clock time.
    DailyAt(NaiveTime),
}

impl Trigger {
    pub fn every_hours(hours: u32) -> Result<Self, AppError> {
        if hours == 0 {
            return Err(AppError::Config("interval must be at least one hour".to_string()));
        }
        TimeDelta::try_hours(i64::from(hours))
            .map(Trigger::Every)
            .ok_or_else(|| AppError::Config(format!("interval of {hours}h is out of range")))
    }

    /// Parse an `HH:MM` time of day.
    pub fn daily_at(time: &str) -> Result<Self, AppError> {
        NaiveTime::parse_from_str(time, "%H:%M")
            .map(Trigger::DailyAt)
            .map_err(|e| AppError::Config(format!("invalid time of day '{time}': {e}")))
    }

    /// First due instant strictly after `after`.
    pub fn next_after<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> DateTime<Tz> {
        match self {
            Trigger::Every(interval) => after.clone() + *interval,
            Trigger::DailyAt(time) => {
                let tz = after.timezone();
                let today = after.date_naive();
                // A time skipped by a DST jump has no local instant that day;
                // move on to the next day that has one.
                (0..=2)
                    .filter_map(|offset| today.checked_add_days(Days::new(offset)))
                    .filter_map(|date| tz.from_local_datetime(&date.and_time(*time)).earliest())
                    .find(|candidate| candidate > after)
                    .unwrap_or_else(|| after.clone() + TimeDelta::days(1))
            }
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Every(interval) if interval.num_seconds() % 3600 == 0 => {
                write!(f, "every {}h", interval.num_hours())
            }
            Trigger::Every(interval) => write!(f, "every {}s", interval.num_seconds()),
            Trigger::DailyAt(time) => write!(f, "daily at {}", time.format("%H:%M")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn interval_adds_to_reference() {
        let trigger = Trigger::every_hours(6).unwrap();
        assert_eq!(
            trigger.next_after(&at("2024-05-01T10:15:00Z")),
            at("2024-05-01T16:15:00Z")
        );
    }

    #[test]
    fn daily_later_today() {
        let trigger = Trigger::daily_at("18:00").unwrap();
        assert_eq!(
            trigger.next_after(&at("2024-05-01T09:30:00Z")),
            at("2024-05-01T18:00:00Z")
        );
    }

    #[test]
    fn daily_already_passed_rolls_to_tomorrow() {
        let trigger = Trigger::daily_at("09:00").unwrap();
        assert_eq!(
            trigger.next_after(&at("2024-05-01T09:00:00Z")),
            at("2024-05-02T09:00:00Z")
        );
        assert_eq!(
            trigger.next_after(&at("2024-12-31T23:59:00Z")),
            at("2025-01-01T09:00:00Z")
        );
    }

    #[test]
    fn daily_uses_reference_timezone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let reference = tz.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let next = Trigger::daily_at("09:00").unwrap().next_after(&reference);
        assert_eq!(next, tz.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        assert_eq!(next.with_timezone(&Utc), at("2024-05-01T07:00:00Z"));
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(Trigger::every_hours(0), Err(AppError::Config(_))));
        assert!(matches!(Trigger::daily_at("25:00"), Err(AppError::Config(_))));
        assert!(matches!(Trigger::daily_at("nine"), Err(AppError::Config(_))));
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(Trigger::every_hours(1).unwrap().to_string(), "every 1h");
        assert_eq!(Trigger::Every(TimeDelta::seconds(90)).to_string(), "every 90s");
        assert_eq!(Trigger::daily_at("09:00").unwrap().to_string(), "daily at 09:00");
    }
}
