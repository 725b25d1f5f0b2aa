//! Productivity reports over the session log.
//!
//! All windows are computed relative to a caller-supplied "now" so the
//! reports are deterministic in tests. Day boundaries follow the time zone
//! of that "now".

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::SessionLog;
use crate::error::ValidationError;

/// Reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportRange {
    Week,
    Month,
    Year,
}

impl ReportRange {
    pub fn days(self) -> i64 {
        match self {
            ReportRange::Week => 7,
            ReportRange::Month => 30,
            ReportRange::Year => 365,
        }
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportRange::Week => "week",
            ReportRange::Month => "month",
            ReportRange::Year => "year",
        };
        f.write_str(name)
    }
}

impl FromStr for ReportRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" | "7d" => Ok(ReportRange::Week),
            "month" | "30d" => Ok(ReportRange::Month),
            "year" | "365d" => Ok(ReportRange::Year),
            other => Err(ValidationError::UnknownRange(other.to_string())),
        }
    }
}

/// Totals for one [`ReportRange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityReport {
    pub range: ReportRange,
    pub total_sessions: u32,
    pub total_minutes: u32,
    /// Mean focus session length in minutes.
    pub avg_session_min: f64,
    /// Focus sessions per day across the whole window.
    pub daily_avg: f64,
}

/// Focus activity on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub sessions: u32,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductiveWeekday {
    pub weekday: Weekday,
    pub sessions: u32,
}

/// Read-only reporting over a [`SessionLog`].
pub struct ProductivityAnalyzer<'a> {
    log: &'a SessionLog,
}

impl<'a> ProductivityAnalyzer<'a> {
    pub fn new(log: &'a SessionLog) -> Self {
        Self { log }
    }

    /// Focus totals for the `range.days()` days ending at `now`.
    pub fn report<Tz: TimeZone>(
        &self,
        range: ReportRange,
        now: &DateTime<Tz>,
    ) -> ProductivityReport {
        let end = now.with_timezone(&Utc);
        let start = end - Duration::days(range.days());
        let (sessions, minutes) = self
            .log
            .focus()
            .filter(|r| r.completed_at >= start && r.completed_at <= end)
            .fold((0u32, 0u32), |(s, m), r| {
                (s + 1, m.saturating_add(r.duration_min))
            });

        let avg_session_min = if sessions > 0 {
            minutes as f64 / sessions as f64
        } else {
            0.0
        };

        ProductivityReport {
            range,
            total_sessions: sessions,
            total_minutes: minutes,
            avg_session_min,
            daily_avg: sessions as f64 / range.days() as f64,
        }
    }

    /// One entry per calendar day for the seven days ending today, oldest
    /// first. Days without sessions are included with zero counts.
    pub fn last_seven_days<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<DayProgress> {
        let tz = now.timezone();
        let today = now.date_naive();
        let mut days: Vec<DayProgress> = (0..7)
            .rev()
            .map(|offset| {
                let date = today - Duration::days(offset);
                DayProgress {
                    date,
                    weekday: date.weekday(),
                    sessions: 0,
                    minutes: 0,
                }
            })
            .collect();

        for record in self.log.focus() {
            let date = record.completed_at.with_timezone(&tz).date_naive();
            if let Some(day) = days.iter_mut().find(|d| d.date == date) {
                day.sessions += 1;
                day.minutes = day.minutes.saturating_add(record.duration_min);
            }
        }
        days
    }

    /// The weekday with the most focus sessions over the whole log.
    ///
    /// Ties go to the earlier weekday, Monday first. `None` for an empty log.
    pub fn most_productive_weekday<Tz: TimeZone>(&self, tz: &Tz) -> Option<ProductiveWeekday> {
        let mut counts = [0u32; 7];
        for record in self.log.focus() {
            let weekday = record.completed_at.with_timezone(tz).weekday();
            counts[weekday.num_days_from_monday() as usize] += 1;
        }

        let mut best: Option<ProductiveWeekday> = None;
        for (idx, &sessions) in counts.iter().enumerate() {
            if sessions == 0 {
                continue;
            }
            if best.as_ref().map_or(true, |b| sessions > b.sessions) {
                best = Some(ProductiveWeekday {
                    weekday: weekday_from_monday(idx),
                    sessions,
                });
            }
        }
        best
    }
}

fn weekday_from_monday(idx: usize) -> Weekday {
    match idx {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}
