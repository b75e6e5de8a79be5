//! Calendar helpers for the Monday-first journal week.
//!
//! Day arithmetic is done on local wall-clock time, never by adding fixed
//! 24h spans, so a week always covers seven calendar days of the zone the
//! dates live in.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};

pub const WEEKDAY_LABELS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        // Skipped by a DST jump: land just after the gap
        LocalResult::None => tz
            .from_local_datetime(&naive.checked_add_signed(Duration::hours(1))?)
            .earliest(),
    }
}

/// Moves `date` by `days` calendar days, keeping its wall-clock time.
///
/// `None` when the result falls outside the representable date range.
pub fn add_days<Tz: TimeZone>(date: &DateTime<Tz>, days: i64) -> Option<DateTime<Tz>> {
    let naive = date
        .naive_local()
        .checked_add_signed(Duration::try_days(days)?)?;
    resolve_local(&date.timezone(), naive)
}

/// Monday of the week containing `date`, at the same time of day.
///
/// The result identifies a day, it is not a day boundary: `start_of_week`
/// of Wednesday 14:05 is Monday 14:05.
pub fn start_of_week<Tz: TimeZone>(date: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    add_days(date, -(weekday_index(date) as i64))
}

pub fn shift_weeks<Tz: TimeZone>(week_start: &DateTime<Tz>, weeks: i64) -> Option<DateTime<Tz>> {
    add_days(week_start, weeks.checked_mul(7)?)
}

/// Local midnight of `date` in `tz`.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    resolve_local(tz, date.and_hms_opt(0, 0, 0)?)
}

/// `YYYY-MM-DD` of the local calendar date.
pub fn format_date_key<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.naive_local().format(DATE_KEY_FORMAT).to_string()
}

pub fn date_key_for_timestamp<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> Option<String> {
    tz.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| format_date_key(&dt))
}

pub fn weekday_label(index: usize) -> Option<&'static str> {
    WEEKDAY_LABELS.get(index).copied()
}

/// Monday is 0, Sunday is 6.
pub fn weekday_index<Tz: TimeZone>(date: &DateTime<Tz>) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// The half-open interval `[start, start + 7 calendar days)` in epoch
/// milliseconds, with the date key of each of its seven days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekWindow {
    pub start_ms: i64,
    pub end_ms: i64,
    pub day_keys: [String; 7],
}

impl WeekWindow {
    pub fn starting_at<Tz: TimeZone>(week_start: &DateTime<Tz>) -> Option<Self> {
        let mut day_keys: [String; 7] = Default::default();
        for (i, key) in day_keys.iter_mut().enumerate() {
            *key = format_date_key(&add_days(week_start, i as i64)?);
        }

        Some(Self {
            start_ms: week_start.timestamp_millis(),
            end_ms: add_days(week_start, 7)?.timestamp_millis(),
            day_keys,
        })
    }

    pub fn contains(&self, timestamp_ms: i64) -> bool {
        self.start_ms <= timestamp_ms && timestamp_ms < self.end_ms
    }

    pub fn first_day_key(&self) -> &str {
        &self.day_keys[0]
    }

    pub fn last_day_key(&self) -> &str {
        &self.day_keys[6]
    }
}
