//! Date and time predicates.
//!
//! Formats use `chrono` strftime syntax. Values and bounds are parsed with
//! the same format; an unparsable value or bound fails the rule. Comparisons
//! are on naive values, so every operand is taken in the same time zone.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::chain::Chain;
use crate::note::format::descriptor;

/// Default date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Default time format. Without an explicit format, `HH:MM` is accepted too.
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// Fallback tried for times when no format is given.
pub const SHORT_TIME_FORMAT: &str = "%H:%M";
/// Default date-time format.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Precision of a date comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    Day,
    Month,
    Year,
}

/// Precision of a time comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
}

/// Precision of a date-time comparison.
///
/// [`Week`](Self::Week) compares ISO weeks, so a Sunday and the Monday after
/// it are in different weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeUnit {
    Second,
    Week,
    Month,
    Year,
}

fn date(s: &str, format: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, format.unwrap_or(DATE_FORMAT)).ok()
}

fn time(s: &str, format: Option<&str>) -> Option<NaiveTime> {
    match format {
        Some(format) => NaiveTime::parse_from_str(s, format).ok(),
        None => NaiveTime::parse_from_str(s, TIME_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(s, SHORT_TIME_FORMAT))
            .ok(),
    }
}

fn date_time(s: &str, format: Option<&str>) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, format.unwrap_or(DATE_TIME_FORMAT)).ok()
}

fn date_key(d: NaiveDate, unit: DateUnit) -> (i32, u32, u32) {
    match unit {
        DateUnit::Day => (d.year(), d.month(), d.day()),
        DateUnit::Month => (d.year(), d.month(), 0),
        DateUnit::Year => (d.year(), 0, 0),
    }
}

fn time_key(t: NaiveTime, unit: TimeUnit) -> (u32, u32, u32) {
    match unit {
        TimeUnit::Second => (t.hour(), t.minute(), t.second()),
        TimeUnit::Minute => (t.hour(), t.minute(), 0),
        TimeUnit::Hour => (t.hour(), 0, 0),
    }
}

fn date_time_key(t: NaiveDateTime, unit: DateTimeUnit) -> (i32, u32, Option<NaiveDateTime>) {
    match unit {
        DateTimeUnit::Second => (0, 0, Some(t)),
        DateTimeUnit::Week => {
            let week = t.date().iso_week();
            (week.year(), week.week(), None)
        }
        DateTimeUnit::Month => (t.year(), t.month(), None),
        DateTimeUnit::Year => (t.year(), 0, None),
    }
}

fn compare_with<V, K: Ord>(
    value: Option<V>,
    other: Option<V>,
    key: impl Fn(V) -> K,
    accept: impl FnOnce(std::cmp::Ordering) -> bool,
) -> bool {
    match (value, other) {
        (Some(value), Some(other)) => accept(key(value).cmp(&key(other))),
        _ => false,
    }
}

fn within<V, K: Ord>(value: Option<V>, start: Option<V>, end: Option<V>, key: impl Fn(V) -> K) -> bool {
    match (value, start, end) {
        (Some(value), Some(start), Some(end)) => {
            let value = key(value);
            key(start) <= value && value <= key(end)
        }
        _ => false,
    }
}

// ============================================================================
// DATES
// ============================================================================

/// Parses as a date in `format` (default [`DATE_FORMAT`]).
pub fn date_format(s: &str, format: Option<&str>) -> bool {
    date(s, format).is_some()
}

/// Strictly before `other` at the given precision.
pub fn date_before(s: &str, other: &str, format: Option<&str>, unit: DateUnit) -> bool {
    compare_with(date(s, format), date(other, format), |d| date_key(d, unit), |o| o.is_lt())
}

/// Strictly after `other` at the given precision.
pub fn date_after(s: &str, other: &str, format: Option<&str>, unit: DateUnit) -> bool {
    compare_with(date(s, format), date(other, format), |d| date_key(d, unit), |o| o.is_gt())
}

/// Equal to `other` at the given precision.
pub fn date_eq(s: &str, other: &str, format: Option<&str>, unit: DateUnit) -> bool {
    compare_with(date(s, format), date(other, format), |d| date_key(d, unit), |o| o.is_eq())
}

/// Within `start..=end`.
pub fn date_between(s: &str, start: &str, end: &str, format: Option<&str>) -> bool {
    within(date(s, format), date(start, format), date(end, format), |d| d)
}

// ============================================================================
// TIMES
// ============================================================================

/// Parses as a time in `format` (default [`TIME_FORMAT`], then
/// [`SHORT_TIME_FORMAT`]).
pub fn time_format(s: &str, format: Option<&str>) -> bool {
    time(s, format).is_some()
}

/// Strictly before `other` at the given precision.
pub fn time_before(s: &str, other: &str, format: Option<&str>, unit: TimeUnit) -> bool {
    compare_with(time(s, format), time(other, format), |t| time_key(t, unit), |o| o.is_lt())
}

/// Strictly after `other` at the given precision.
pub fn time_after(s: &str, other: &str, format: Option<&str>, unit: TimeUnit) -> bool {
    compare_with(time(s, format), time(other, format), |t| time_key(t, unit), |o| o.is_gt())
}

/// Equal to `other` at the given precision.
pub fn time_eq(s: &str, other: &str, format: Option<&str>, unit: TimeUnit) -> bool {
    compare_with(time(s, format), time(other, format), |t| time_key(t, unit), |o| o.is_eq())
}

/// Within `start..=end`.
pub fn time_between(s: &str, start: &str, end: &str, format: Option<&str>) -> bool {
    within(time(s, format), time(start, format), time(end, format), |t| t)
}

// ============================================================================
// DATE-TIMES
// ============================================================================

/// Parses as a date-time in `format` (default [`DATE_TIME_FORMAT`]).
pub fn date_time_format(s: &str, format: Option<&str>) -> bool {
    date_time(s, format).is_some()
}

/// Strictly before `other` at the given precision.
pub fn date_time_before(s: &str, other: &str, format: Option<&str>, unit: DateTimeUnit) -> bool {
    compare_with(date_time(s, format), date_time(other, format), |t| date_time_key(t, unit), |o| o.is_lt())
}

/// Strictly after `other` at the given precision.
pub fn date_time_after(s: &str, other: &str, format: Option<&str>, unit: DateTimeUnit) -> bool {
    compare_with(date_time(s, format), date_time(other, format), |t| date_time_key(t, unit), |o| o.is_gt())
}

/// Equal to `other` at the given precision.
pub fn date_time_eq(s: &str, other: &str, format: Option<&str>, unit: DateTimeUnit) -> bool {
    compare_with(date_time(s, format), date_time(other, format), |t| date_time_key(t, unit), |o| o.is_eq())
}

pub fn date_time_between(s: &str, start: &str, end: &str, format: Option<&str>) -> bool {
    within(date_time(s, format), date_time(start, format), date_time(end, format), |t| t)
}

// ============================================================================
// CHAIN RULES
// ============================================================================

fn rule_descriptor(rule: &str, operands: &[&str], format: Option<&str>) -> String {
    descriptor(rule, operands.iter().copied().chain(format))
}

macro_rules! format_rules {
    ($($(#[$meta:meta])* $method:ident => $rule:literal, $predicate:path;)*) => {
        impl<'n> Chain<'n, String> {
            $(
                $(#[$meta])*
                pub fn $method(self, format: Option<&str>) -> Self {
                    let descriptor = rule_descriptor($rule, &[], format);
                    self.must_rule(|s| $predicate(s, format), None, &descriptor)
                }
            )*
        }
    };
}

macro_rules! compare_rules {
    ($($(#[$meta:meta])* $method:ident => $rule:literal, |$s:ident, $other:ident, $format:ident| $body:expr;)*) => {
        impl<'n> Chain<'n, String> {
            $(
                $(#[$meta])*
                pub fn $method(self, $other: &str, $format: Option<&str>) -> Self {
                    let descriptor = rule_descriptor($rule, &[$other], $format);
                    self.must_rule(|$s: &String| $body, None, &descriptor)
                }
            )*
        }
    };
}

macro_rules! between_rules {
    ($($(#[$meta:meta])* $method:ident => $rule:literal, $predicate:path;)*) => {
        impl<'n> Chain<'n, String> {
            $(
                $(#[$meta])*
                pub fn $method(self, start: &str, end: &str, format: Option<&str>) -> Self {
                    let descriptor = rule_descriptor($rule, &[start, end], format);
                    self.must_rule(|s| $predicate(s, start, end, format), None, &descriptor)
                }
            )*
        }
    };
}

format_rules! {
    /// Parses as a date; see [`date_format`].
    date_format => "dateFormat", date_format;
    /// Parses as a time; see [`time_format`].
    time_format => "timeFormat", time_format;
    date_time_format => "dateTimeFormat", date_time_format;
}

compare_rules! {
    /// Strictly before `other`, compared by day.
    date_before => "dateBefore", |s, other, format| date_before(s, other, format, DateUnit::Day);
    date_before_month => "dateBeforeMonth", |s, other, format| date_before(s, other, format, DateUnit::Month);
    date_before_year => "dateBeforeYear", |s, other, format| date_before(s, other, format, DateUnit::Year);
    /// Strictly after `other`, compared by day.
    date_after => "dateAfter", |s, other, format| date_after(s, other, format, DateUnit::Day);
    date_after_month => "dateAfterMonth", |s, other, format| date_after(s, other, format, DateUnit::Month);
    date_after_year => "dateAfterYear", |s, other, format| date_after(s, other, format, DateUnit::Year);
    /// Same day as `other`.
    date_eq => "dateEq", |s, other, format| date_eq(s, other, format, DateUnit::Day);
    date_eq_month => "dateEqMonth", |s, other, format| date_eq(s, other, format, DateUnit::Month);
    date_eq_year => "dateEqYear", |s, other, format| date_eq(s, other, format, DateUnit::Year);
    /// Strictly before `other`, compared by second.
    time_before => "timeBefore", |s, other, format| time_before(s, other, format, TimeUnit::Second);
    time_before_minute => "timeBeforeMinute", |s, other, format| time_before(s, other, format, TimeUnit::Minute);
    time_before_hour => "timeBeforeHour", |s, other, format| time_before(s, other, format, TimeUnit::Hour);
    time_after => "timeAfter", |s, other, format| time_after(s, other, format, TimeUnit::Second);
    time_after_minute => "timeAfterMinute", |s, other, format| time_after(s, other, format, TimeUnit::Minute);
    time_after_hour => "timeAfterHour", |s, other, format| time_after(s, other, format, TimeUnit::Hour);
    time_eq => "timeEq", |s, other, format| time_eq(s, other, format, TimeUnit::Second);
    time_eq_minute => "timeEqMinute", |s, other, format| time_eq(s, other, format, TimeUnit::Minute);
    time_eq_hour => "timeEqHour", |s, other, format| time_eq(s, other, format, TimeUnit::Hour);
    /// Strictly before `other`, compared by second.
    date_time_before => "dateTimeBefore", |s, other, format| date_time_before(s, other, format, DateTimeUnit::Second);
    date_time_before_week => "dateTimeBeforeWeek", |s, other, format| date_time_before(s, other, format, DateTimeUnit::Week);
    date_time_before_month => "dateTimeBeforeMonth", |s, other, format| date_time_before(s, other, format, DateTimeUnit::Month);
    date_time_before_year => "dateTimeBeforeYear", |s, other, format| date_time_before(s, other, format, DateTimeUnit::Year);
    date_time_after => "dateTimeAfter", |s, other, format| date_time_after(s, other, format, DateTimeUnit::Second);
    date_time_after_week => "dateTimeAfterWeek", |s, other, format| date_time_after(s, other, format, DateTimeUnit::Week);
    date_time_after_month => "dateTimeAfterMonth", |s, other, format| date_time_after(s, other, format, DateTimeUnit::Month);
    date_time_after_year => "dateTimeAfterYear", |s, other, format| date_time_after(s, other, format, DateTimeUnit::Year);
    date_time_eq => "dateTimeEq", |s, other, format| date_time_eq(s, other, format, DateTimeUnit::Second);
    /// Same ISO week as `other`.
    date_time_eq_week => "dateTimeEqWeek", |s, other, format| date_time_eq(s, other, format, DateTimeUnit::Week);
    date_time_eq_month => "dateTimeEqMonth", |s, other, format| date_time_eq(s, other, format, DateTimeUnit::Month);
    date_time_eq_year => "dateTimeEqYear", |s, other, format| date_time_eq(s, other, format, DateTimeUnit::Year);
}

between_rules! {
    /// Within `start..=end`.
    date_between => "dateBetween", date_between;
    time_between => "timeBetween", time_between;
    date_time_between => "dateTimeBetween", date_time_between;
}
