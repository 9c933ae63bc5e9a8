use chrono::{prelude::*, Duration};
use chrono_tz::{Tz, UTC};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// How many days ahead `next_after` is willing to look before concluding
/// that a rule will never fire. Covers a leap cycle so rules pinned to
/// Feb 29 still resolve.
const SCAN_HORIZON_DAYS: i64 = 365 * 4 + 1;

/// A cron-like recurrence descriptor. Every field is a single value or a
/// wildcard when absent. An absent `second` means `0`, so an otherwise
/// empty rule fires every minute on the minute rather than every second.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub second: Option<u32>,
    pub minute: Option<u32>,
    pub hour: Option<u32>,
    pub day_of_month: Option<u32>,
    pub month: Option<u32>,
    pub day_of_week: Option<u32>,
    pub year: Option<i32>,
    /// Timezone the rule is evaluated in, UTC when absent
    pub tz: Option<Tz>,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidRecurrenceError {
    #[error("Recurrence field `{field}` has an out of range value: {value}")]
    OutOfRange { field: &'static str, value: i64 },
    #[error("Recurrence expression is malformed: `{0}`")]
    Malformed(String),
}

impl RecurrenceRule {
    /// A rule that fires exactly once: every date field of `instant` is
    /// pinned, only day of week is left wildcard. Once the pinned year has
    /// passed the rule can never match again.
    pub fn pinned_at(instant: &DateTime<Utc>) -> Self {
        Self {
            second: Some(instant.second()),
            minute: Some(instant.minute()),
            hour: Some(instant.hour()),
            day_of_month: Some(instant.day()),
            month: Some(instant.month()),
            day_of_week: None,
            year: Some(instant.year()),
            tz: None,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidRecurrenceError> {
        let checks: [(&'static str, Option<i64>, i64, i64); 6] = [
            ("second", self.second.map(i64::from), 0, 59),
            ("minute", self.minute.map(i64::from), 0, 59),
            ("hour", self.hour.map(i64::from), 0, 23),
            ("dayOfMonth", self.day_of_month.map(i64::from), 1, 31),
            ("month", self.month.map(i64::from), 1, 12),
            ("dayOfWeek", self.day_of_week.map(i64::from), 0, 6),
        ];
        for (field, value, min, max) in checks {
            if let Some(value) = value {
                if value < min || value > max {
                    return Err(InvalidRecurrenceError::OutOfRange { field, value });
                }
            }
        }
        if let Some(year) = self.year {
            if !(1970..=9999).contains(&year) {
                return Err(InvalidRecurrenceError::OutOfRange {
                    field: "year",
                    value: year as i64,
                });
            }
        }
        Ok(())
    }

    /// The next instant strictly after `after` at which this rule matches,
    /// or `None` if no match exists within the scan horizon.
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let tz = self.tz.unwrap_or(UTC);
        let start = (after + Duration::seconds(1)).with_timezone(&tz);
        let second = self.second.unwrap_or(0);
        let hours: Vec<u32> = match self.hour {
            Some(h) => vec![h],
            None => (0..24).collect(),
        };
        let minutes: Vec<u32> = match self.minute {
            Some(m) => vec![m],
            None => (0..60).collect(),
        };

        let mut day = start.date();
        let last_day = day + Duration::days(SCAN_HORIZON_DAYS);
        while day <= last_day {
            if self.matches_day(&day) {
                for hour in &hours {
                    for minute in &minutes {
                        // Skipped for local times that do not exist (DST gaps)
                        let candidate = match day.and_hms_opt(*hour, *minute, second) {
                            Some(candidate) => candidate,
                            None => continue,
                        };
                        let candidate = candidate.with_timezone(&Utc);
                        if candidate > after {
                            return Some(candidate);
                        }
                    }
                }
            }
            day = day + Duration::days(1);
        }
        None
    }

    fn matches_day(&self, day: &Date<Tz>) -> bool {
        if let Some(year) = self.year {
            if day.year() != year {
                return false;
            }
        }
        if let Some(month) = self.month {
            if day.month() != month {
                return false;
            }
        }
        let dom = self.day_of_month.map(|d| day.day() == d);
        let dow = self
            .day_of_week
            .map(|d| day.weekday().num_days_from_sunday() == d);
        // When both day fields are restricted the day matches if either
        // one does (vixie cron behavior)
        match (dom, dow) {
            (None, None) => true,
            (Some(dom), None) => dom,
            (None, Some(dow)) => dow,
            (Some(dom), Some(dow)) => dom || dow,
        }
    }

    pub fn to_cron_expression(&self) -> String {
        self.to_string()
    }
}

fn fmt_field<T: Display>(field: &Option<T>) -> String {
    match field {
        Some(value) => value.to_string(),
        None => "*".into(),
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.second.unwrap_or(0),
            fmt_field(&self.minute),
            fmt_field(&self.hour),
            fmt_field(&self.day_of_month),
            fmt_field(&self.month),
            fmt_field(&self.day_of_week),
            fmt_field(&self.year),
        )
    }
}

fn parse_field<T: FromStr>(field: &str, expression: &str) -> Result<Option<T>, InvalidRecurrenceError> {
    if field == "*" {
        return Ok(None);
    }
    // Lists, ranges and step values are not supported
    field
        .parse::<T>()
        .map(Some)
        .map_err(|_| InvalidRecurrenceError::Malformed(expression.to_string()))
}

impl FromStr for RecurrenceRule {
    type Err = InvalidRecurrenceError;

    /// Parses 5, 6 or 7 field cron expressions where each field is either a
    /// wildcard or a single integer:
    /// `min hour dom month dow`, optionally prefixed with seconds and
    /// suffixed with a year.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        let (second, rest) = match fields.len() {
            5 => (None, &fields[..]),
            6 | 7 => (parse_field(fields[0], s)?, &fields[1..]),
            _ => return Err(InvalidRecurrenceError::Malformed(s.to_string())),
        };
        let rule = Self {
            second,
            minute: parse_field(rest[0], s)?,
            hour: parse_field(rest[1], s)?,
            day_of_month: parse_field(rest[2], s)?,
            month: parse_field(rest[3], s)?,
            day_of_week: parse_field(rest[4], s)?,
            year: match rest.get(5) {
                Some(field) => parse_field(field, s)?,
                None => None,
            },
            tz: None,
        };
        rule.validate()?;
        Ok(rule)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.ymd(year, month, day).and_hms(hour, minute, second)
    }

    #[test]
    fn empty_rule_fires_every_minute_on_the_minute() {
        let rule = RecurrenceRule::default();
        let next = rule.next_after(utc(2021, 6, 1, 10, 30, 30));
        assert_eq!(next, Some(utc(2021, 6, 1, 10, 31, 0)));
    }

    #[test]
    fn daily_rule_rolls_over_to_next_day() {
        let rule = RecurrenceRule {
            minute: Some(30),
            hour: Some(9),
            ..Default::default()
        };
        let next = rule.next_after(utc(2021, 6, 1, 10, 0, 0));
        assert_eq!(next, Some(utc(2021, 6, 2, 9, 30, 0)));
    }

    #[test]
    fn next_is_strictly_after() {
        let rule = RecurrenceRule {
            minute: Some(30),
            hour: Some(9),
            ..Default::default()
        };
        let next = rule.next_after(utc(2021, 6, 1, 9, 30, 0));
        assert_eq!(next, Some(utc(2021, 6, 2, 9, 30, 0)));
    }

    #[test]
    fn day_of_month_and_day_of_week_match_either() {
        // Tuesday June 1st 2021. Day 15 is a Tuesday, the next Sunday is June 6th.
        let rule = RecurrenceRule {
            hour: Some(12),
            minute: Some(0),
            day_of_month: Some(15),
            day_of_week: Some(0),
            ..Default::default()
        };
        let next = rule.next_after(utc(2021, 6, 1, 13, 0, 0));
        assert_eq!(next, Some(utc(2021, 6, 6, 12, 0, 0)));
    }

    #[test]
    fn impossible_rule_never_fires() {
        let rule = RecurrenceRule {
            day_of_month: Some(30),
            month: Some(2),
            ..Default::default()
        };
        assert_eq!(rule.next_after(utc(2021, 1, 1, 0, 0, 0)), None);
    }

    #[test]
    fn evaluates_in_rule_timezone() {
        // Oslo is UTC+1 in January
        let rule = RecurrenceRule {
            minute: Some(0),
            hour: Some(9),
            tz: Some(chrono_tz::Europe::Oslo),
            ..Default::default()
        };
        let next = rule.next_after(utc(2021, 1, 10, 0, 0, 0));
        assert_eq!(next, Some(utc(2021, 1, 10, 8, 0, 0)));
    }

    #[test]
    fn pinned_rule_fires_exactly_once() {
        let instant = utc(2021, 6, 1, 10, 30, 15);
        let rule = RecurrenceRule::pinned_at(&instant);
        assert_eq!(rule.next_after(instant - Duration::hours(1)), Some(instant));
        assert_eq!(rule.next_after(instant), None);
    }

    #[test]
    fn parses_cron_expressions() {
        let rule = "0 30 9 * * *".parse::<RecurrenceRule>().unwrap();
        assert_eq!(rule.second, Some(0));
        assert_eq!(rule.minute, Some(30));
        assert_eq!(rule.hour, Some(9));
        assert_eq!(rule.day_of_month, None);

        let five_field = "30 9 1 6 *".parse::<RecurrenceRule>().unwrap();
        assert_eq!(five_field.second, None);
        assert_eq!(five_field.minute, Some(30));
        assert_eq!(five_field.day_of_month, Some(1));
        assert_eq!(five_field.month, Some(6));

        let with_year = "0 0 12 24 12 * 2030".parse::<RecurrenceRule>().unwrap();
        assert_eq!(with_year.year, Some(2030));
    }

    #[test]
    fn rejects_malformed_cron_expressions() {
        assert!("nonsense".parse::<RecurrenceRule>().is_err());
        assert!("* *".parse::<RecurrenceRule>().is_err());
        // Lists and ranges are not supported
        assert!("0 1,2 * * * *".parse::<RecurrenceRule>().is_err());
        assert!("0 1-5 * * * *".parse::<RecurrenceRule>().is_err());
        // Out of range values
        assert!("0 61 * * * *".parse::<RecurrenceRule>().is_err());
        assert!("0 0 0 0 0 0".parse::<RecurrenceRule>().is_err());
    }

    #[test]
    fn renders_seven_field_expression() {
        let rule = RecurrenceRule {
            minute: Some(30),
            hour: Some(9),
            ..Default::default()
        };
        assert_eq!(rule.to_cron_expression(), "0 30 9 * * * *");
        assert_eq!(
            rule.to_cron_expression().parse::<RecurrenceRule>().unwrap(),
            RecurrenceRule {
                second: Some(0),
                ..rule
            }
        );
    }

    #[test]
    fn validates_field_ranges() {
        assert!(RecurrenceRule::default().validate().is_ok());
        let rule = RecurrenceRule {
            month: Some(13),
            ..Default::default()
        };
        assert_eq!(
            rule.validate(),
            Err(InvalidRecurrenceError::OutOfRange {
                field: "month",
                value: 13
            })
        );
    }
}
