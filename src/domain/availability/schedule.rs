//! Schedule value objects: wall-clock times, weekday slots, and the weekly
//! working-hours template.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Wall-clock time of day, stored as minutes since midnight.
///
/// Parsed from and rendered as `"HH:MM"`. Appointment times and working-hour
/// boundaries all compare in this representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Parses an `"HH:MM"` string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| ValidationError::invalid_format("time", "expected HH:MM"))?;
        let hours: u16 = h
            .parse()
            .map_err(|_| ValidationError::invalid_format("time", "non-numeric hours"))?;
        let minutes: u16 = m
            .parse()
            .map_err(|_| ValidationError::invalid_format("time", "non-numeric minutes"))?;
        if hours > 23 {
            return Err(ValidationError::out_of_range("hours", 0, 23, hours as i32));
        }
        if minutes > 59 {
            return Err(ValidationError::out_of_range("minutes", 0, 59, minutes as i32));
        }
        Ok(Self(hours * 60 + minutes))
    }

    /// Creates a time from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, ValidationError> {
        if minutes >= 24 * 60 {
            return Err(ValidationError::out_of_range(
                "minutes_since_midnight",
                0,
                24 * 60 - 1,
                minutes as i32,
            ));
        }
        Ok(Self(minutes))
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TimeOfDay::parse(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// Day of the week, `0` = Sunday through `6` = Saturday.
///
/// Matches the numbering clients supply in weekly templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub fn new(day: u8) -> Result<Self, ValidationError> {
        if day > 6 {
            return Err(ValidationError::out_of_range("day_of_week", 0, 6, day as i32));
        }
        Ok(Self(day))
    }

    /// Resolves the day of week for a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.weekday().num_days_from_sunday() as u8)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

/// One weekly-template entry: the working window for a single day of week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub day_of_week: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub is_working: bool,
}

impl WorkingHours {
    /// Validates the entry: a working day must have a non-empty window.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_working && self.start_time >= self.end_time {
            return Err(ValidationError::invalid_format(
                "working_hours",
                format!(
                    "start_time {} must be before end_time {}",
                    self.start_time, self.end_time
                ),
            ));
        }
        Ok(())
    }

    /// True if `time` falls inside the window: `start <= time < end`.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start_time <= time && time < self.end_time
    }
}

/// The per-counselor weekly working-hours template.
///
/// At most one entry per day of week; duplicates are rejected at
/// construction rather than resolved last-one-wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WorkingHours>", into = "Vec<WorkingHours>")]
pub struct WeeklyTemplate(Vec<WorkingHours>);

impl WeeklyTemplate {
    pub fn new(entries: Vec<WorkingHours>) -> Result<Self, ValidationError> {
        let mut seen = [false; 7];
        for entry in &entries {
            entry.validate()?;
            let day = entry.day_of_week.as_u8() as usize;
            if seen[day] {
                return Err(ValidationError::invalid_format(
                    "weekly_template",
                    format!("duplicate entry for day {}", day),
                ));
            }
            seen[day] = true;
        }
        Ok(Self(entries))
    }

    /// Creates an empty template (counselor never works by template).
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Looks up the entry for a day of week, if any.
    pub fn entry_for(&self, day: DayOfWeek) -> Option<&WorkingHours> {
        self.0.iter().find(|e| e.day_of_week == day)
    }

    pub fn entries(&self) -> &[WorkingHours] {
        &self.0
    }
}

impl TryFrom<Vec<WorkingHours>> for WeeklyTemplate {
    type Error = ValidationError;

    fn try_from(entries: Vec<WorkingHours>) -> Result<Self, Self::Error> {
        WeeklyTemplate::new(entries)
    }
}

impl From<WeeklyTemplate> for Vec<WorkingHours> {
    fn from(t: WeeklyTemplate) -> Self {
        t.0
    }
}

/// A date-specific override of the weekly template.
///
/// `is_available: false` blocks the whole date; `is_available: true`
/// substitutes the exception's window for the template entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleException {
    pub date: NaiveDate,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub is_available: bool,
    pub reason: Option<String>,
}

impl ScheduleException {
    /// Validates the exception: an available date needs a non-empty window.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_available {
            match (self.start_time, self.end_time) {
                (Some(start), Some(end)) if start < end => Ok(()),
                (Some(start), Some(end)) => Err(ValidationError::invalid_format(
                    "exception",
                    format!("start_time {} must be before end_time {}", start, end),
                )),
                _ => Err(ValidationError::empty_field("exception_window")),
            }
        } else {
            Ok(())
        }
    }

    /// True if `time` falls inside the exception's window.
    ///
    /// Only meaningful when `is_available` is true.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => start <= time && time < end,
            _ => false,
        }
    }
}
