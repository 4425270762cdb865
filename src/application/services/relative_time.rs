//! Relative-time and date display helpers for appointment screens.

use chrono::{DateTime, Datelike, Months, NaiveDateTime, TimeDelta, Utc};

/// Appointment slots this close to now are treated as already due.
pub const DUE_WINDOW: TimeDelta = TimeDelta::minutes(30);

const SLOT_FORMAT: &str = "%d-%m-%Y %I:%M %p";

/// Whole calendar units between two instants.
///
/// Each field is the total in that unit, not a remainder: two days apart
/// gives `days == 2` and `hours == 48`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Elapsed {
    pub years: u32,
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

fn clamp(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}

fn whole_months(from: NaiveDateTime, to: NaiveDateTime) -> u32 {
    if to <= from {
        return 0;
    }
    let span = (i64::from(to.year()) - i64::from(from.year())) * 12 + i64::from(to.month())
        - i64::from(from.month());
    let mut months = clamp(span);
    while months > 0
        && from
            .checked_add_months(Months::new(months))
            .is_none_or(|candidate| candidate > to)
    {
        months -= 1;
    }
    months
}

/// Computes the calendar distance from `from` to `to`.
///
/// Returns all zeros when `to` is not after `from`.
#[must_use]
pub fn elapsed(from: NaiveDateTime, to: NaiveDateTime) -> Elapsed {
    if to <= from {
        return Elapsed::default();
    }
    let delta = to - from;
    let months = whole_months(from, to);
    let days = clamp(delta.num_days());
    Elapsed {
        years: months / 12,
        months,
        weeks: days / 7,
        days,
        hours: clamp(delta.num_hours()),
        minutes: clamp(delta.num_minutes()),
        seconds: clamp(delta.num_seconds()),
    }
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Formats the largest non-zero unit, e.g. `"3 days ago"`.
///
/// Empty when `then` is not before `now`.
#[must_use]
pub fn time_ago(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let e = elapsed(then, now);
    if e.years > 0 {
        plural(e.years, "year")
    } else if e.months > 0 {
        plural(e.months, "month")
    } else if e.weeks > 0 {
        plural(e.weeks, "week")
    } else if e.days > 0 {
        plural(e.days, "day")
    } else if e.hours > 0 {
        plural(e.hours, "hour")
    } else if e.minutes > 0 {
        plural(e.minutes, "minute")
    } else if e.seconds > 0 {
        plural(e.seconds, "sec")
    } else {
        String::new()
    }
}

/// Formats the largest non-zero unit compactly, e.g. `"3d"` or `"2M"`.
#[must_use]
pub fn compact_offset(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let e = elapsed(then, now);
    [
        (e.years, 'y'),
        (e.months, 'M'),
        (e.weeks, 'w'),
        (e.days, 'd'),
        (e.hours, 'h'),
        (e.minutes, 'm'),
        (e.seconds, 's'),
    ]
    .into_iter()
    .find(|(n, _)| *n > 0)
    .map(|(n, unit)| format!("{n}{unit}"))
    .unwrap_or_default()
}

/// `"16 Oct 2026"`.
#[must_use]
pub fn display_date(at: NaiveDateTime) -> String {
    at.format("%d %b %Y").to_string()
}

/// `"09:05 AM"`.
#[must_use]
pub fn display_time(at: NaiveDateTime) -> String {
    at.format("%I:%M %p").to_string()
}

/// Builds a UTC instant from epoch milliseconds, truncated to whole seconds.
#[must_use]
pub fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(millis / 1000, 0)
}

/// Seconds since the epoch as a decimal string, always with a fractional
/// part (`"1700000000.0"`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn timestamp_string(at: DateTime<Utc>) -> String {
    format!("{:?}", at.timestamp_millis() as f64 / 1000.0)
}

/// Returns true if the slot `date` (`dd-MM-yyyy`) at `time` (`hh:mm AM`)
/// has passed or starts within [`DUE_WINDOW`] of `now`.
///
/// Unparseable input is never due.
#[must_use]
pub fn is_due(date: &str, time: &str, now: NaiveDateTime) -> bool {
    let Ok(slot) = NaiveDateTime::parse_from_str(&format!("{date} {time}"), SLOT_FORMAT) else {
        return false;
    };
    slot <= now || slot - now <= DUE_WINDOW
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_elapsed_totals() {
        let e = elapsed(at("2026-01-01 00:00:00"), at("2026-01-15 06:00:00"));
        assert_eq!(e.years, 0);
        assert_eq!(e.months, 0);
        assert_eq!(e.weeks, 2);
        assert_eq!(e.days, 14);
        assert_eq!(e.hours, 14 * 24 + 6);
    }

    #[test]
    fn test_month_boundary_respects_day_of_month() {
        let e = elapsed(at("2026-01-31 12:00:00"), at("2026-02-28 11:00:00"));
        assert_eq!(e.months, 0);
        let e = elapsed(at("2026-01-31 12:00:00"), at("2026-02-28 12:00:00"));
        assert_eq!(e.months, 1);
    }

    #[test]
    fn test_elapsed_backwards_is_zero() {
        let e = elapsed(at("2026-01-02 00:00:00"), at("2026-01-01 00:00:00"));
        assert_eq!(e, Elapsed::default());
    }

    #[test_case("2024-10-16 09:00:00", "2 years ago" ; "years")]
    #[test_case("2025-10-16 09:00:00", "1 year ago" ; "one_year")]
    #[test_case("2026-07-10 09:00:00", "3 months ago" ; "months")]
    #[test_case("2026-10-02 09:00:00", "2 weeks ago" ; "weeks")]
    #[test_case("2026-10-15 08:00:00", "1 day ago" ; "one_day")]
    #[test_case("2026-10-16 06:30:00", "2 hours ago" ; "hours")]
    #[test_case("2026-10-16 08:55:00", "5 minutes ago" ; "minutes")]
    #[test_case("2026-10-16 08:59:48", "12 secs ago" ; "seconds")]
    #[test_case("2026-10-16 09:00:00", "" ; "same_instant")]
    #[test_case("2026-10-17 09:00:00", "" ; "future")]
    fn test_time_ago(then: &str, want: &str) {
        assert_eq!(time_ago(at(then), at("2026-10-16 09:00:00")), want);
    }

    #[test_case("2025-09-16 09:00:00", "1y" ; "years")]
    #[test_case("2026-08-16 09:00:00", "2M" ; "months")]
    #[test_case("2026-10-06 09:00:00", "1w" ; "weeks")]
    #[test_case("2026-10-13 09:00:00", "3d" ; "days")]
    #[test_case("2026-10-16 04:00:00", "5h" ; "hours")]
    #[test_case("2026-10-16 08:54:00", "6m" ; "minutes")]
    #[test_case("2026-10-16 08:59:53", "7s" ; "seconds")]
    #[test_case("2026-10-16 09:00:00", "" ; "none")]
    fn test_compact_offset(then: &str, want: &str) {
        assert_eq!(compact_offset(at(then), at("2026-10-16 09:00:00")), want);
    }

    #[test]
    fn test_display_formats() {
        let t = at("2026-10-16 21:05:00");
        assert_eq!(display_date(t), "16 Oct 2026");
        assert_eq!(display_time(t), "09:05 PM");
    }

    #[test]
    fn test_from_millis_truncates() {
        let dt = from_millis(1_700_000_000_999).unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
        assert_eq!(dt.timestamp_subsec_millis(), 0);
    }

    #[test_case(-1_500, -1 ; "negative rounds toward zero")]
    #[test_case(-999, 0 ; "just before epoch")]
    #[test_case(1_500, 1 ; "positive")]
    fn test_from_millis_truncates_toward_zero(millis: i64, seconds: i64) {
        assert_eq!(from_millis(millis).unwrap().timestamp(), seconds);
    }

    #[test]
    fn test_timestamp_string() {
        let dt = DateTime::from_timestamp(1_700_000_000, 500_000_000).unwrap();
        assert_eq!(timestamp_string(dt), "1700000000.5");
    }

    #[test]
    fn test_timestamp_string_whole_second_keeps_fraction() {
        let dt = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(timestamp_string(dt), "1700000000.0");
    }

    #[test_case("16-10-2026", "08:00 AM", true ; "passed")]
    #[test_case("16-10-2026", "09:00 AM", true ; "now")]
    #[test_case("16-10-2026", "09:30 AM", true ; "within_window")]
    #[test_case("16-10-2026", "09:31 AM", false ; "just_outside_window")]
    #[test_case("16-10-2026", "11:10 AM", false ; "hours_away")]
    #[test_case("17-10-2026", "09:00 AM", false ; "tomorrow")]
    #[test_case("2026-10-16", "09:00 AM", false ; "bad_date_format")]
    #[test_case("16-10-2026", "", false ; "missing_time")]
    fn test_is_due(date: &str, time: &str, want: bool) {
        assert_eq!(is_due(date, time, at("2026-10-16 09:00:00")), want);
    }
}
