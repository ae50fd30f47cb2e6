//! Calendar-safe date helpers.
//!
//! Every function here is total: bad input comes back as `None` (or an empty
//! string for [`format_date`]) and callers decide how to present it. Dates are
//! plain calendar days ([`NaiveDate`]), so day differences are unaffected by the
//! local timezone or DST transitions.

use chrono::{
    DateTime, Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, TimeZone, Weekday,
};

/// Milliseconds since the Unix epoch, interpreted in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub i64);

/// Anything that can be read as a calendar day.
pub trait AsCalendarDate {
    fn as_calendar_date(&self) -> Option<NaiveDate>;
}

impl AsCalendarDate for NaiveDate {
    fn as_calendar_date(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl AsCalendarDate for NaiveDateTime {
    fn as_calendar_date(&self) -> Option<NaiveDate> {
        Some(self.date())
    }
}

impl<Tz: TimeZone> AsCalendarDate for DateTime<Tz> {
    fn as_calendar_date(&self) -> Option<NaiveDate> {
        Some(self.with_timezone(&Local).date_naive())
    }
}

impl AsCalendarDate for str {
    fn as_calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(self).or_else(|| parse_free_form(self))
    }
}

impl AsCalendarDate for String {
    fn as_calendar_date(&self) -> Option<NaiveDate> {
        self.as_str().as_calendar_date()
    }
}

impl AsCalendarDate for Timestamp {
    fn as_calendar_date(&self) -> Option<NaiveDate> {
        Local
            .timestamp_millis_opt(self.0)
            .single()
            .map(|dt| dt.date_naive())
    }
}

impl<T: AsCalendarDate> AsCalendarDate for Option<T> {
    fn as_calendar_date(&self) -> Option<NaiveDate> {
        self.as_ref().and_then(AsCalendarDate::as_calendar_date)
    }
}

impl<T: AsCalendarDate + ?Sized> AsCalendarDate for &T {
    fn as_calendar_date(&self) -> Option<NaiveDate> {
        (**self).as_calendar_date()
    }
}

/// Strict `YYYY-M-D` / `YYYY/M/D` parser.
///
/// Rejects impossible days (month 13, Feb 30, ...) instead of rolling them
/// over into the next month.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    let mut parts = trimmed.split(['-', '/']);
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(year, 4, 4) || !digits(month, 1, 2) || !digits(day, 1, 2) {
        return None;
    }

    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    (date.year() == year && date.month() == month && date.day() == day).then_some(date)
}

/// Lenient fallback for timestamps and human-written dates.
fn parse_free_form(text: &str) -> Option<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.as_calendar_date();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in ["%m/%d/%Y", "%Y.%m.%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Read any supported value as a calendar day. Never panics.
pub fn to_date<T: AsCalendarDate + ?Sized>(value: &T) -> Option<NaiveDate> {
    value.as_calendar_date()
}

/// Canonical `YYYY-MM-DD`, or an empty string when the value is unreadable.
pub fn format_date<T: AsCalendarDate + ?Sized>(value: &T) -> String {
    to_date(value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Whole days from `start` to `end` (negative when `end` is earlier).
/// `None` when either side is unreadable.
pub fn days_between<A, B>(start: &A, end: &B) -> Option<i64>
where
    A: AsCalendarDate + ?Sized,
    B: AsCalendarDate + ?Sized,
{
    let (s, e) = (to_date(start)?, to_date(end)?);
    Some((e - s).num_days())
}

/// ISO-8601 week number (weeks start Monday; week 1 holds the first Thursday).
pub fn week_of_year(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Shift by whole days, staying put if the result would leave chrono's range.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(date)
}

/// Shift by calendar months, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, months: i64) -> NaiveDate {
    let magnitude = Months::new(months.unsigned_abs().min(u32::MAX as u64) as u32);
    let shifted = if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    };
    shifted.unwrap_or(date)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let next = shift_months(first_of_month(date), 1);
    if next == first_of_month(date) {
        return date;
    }
    shift_days(next, -1)
}

/// Monday = 0 ... Sunday = 6.
pub fn monday_index(date: NaiveDate) -> i64 {
    date.weekday().num_days_from_monday() as i64
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn strict_parse_accepts_both_separators() {
        assert_eq!(parse_calendar_date("2024-05-01"), Some(ymd(2024, 5, 1)));
        assert_eq!(parse_calendar_date("2024/5/1"), Some(ymd(2024, 5, 1)));
        assert_eq!(parse_calendar_date("  2024-12-31 "), Some(ymd(2024, 12, 31)));
    }

    #[test]
    fn strict_parse_rejects_rollover_dates() {
        assert_eq!(parse_calendar_date("2024-13-01"), None);
        assert_eq!(parse_calendar_date("2023-02-29"), None);
        assert_eq!(parse_calendar_date("2024-02-30"), None);
        assert_eq!(parse_calendar_date("2024-04-31"), None);
        assert_eq!(parse_calendar_date("2024-00-10"), None);
        assert_eq!(parse_calendar_date("24-05-01"), None);
        assert_eq!(parse_calendar_date("2024-05-01-02"), None);
        assert_eq!(parse_calendar_date("2024-5-x"), None);
        assert_eq!(parse_calendar_date("2024-02-29"), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn to_date_falls_back_to_free_form() {
        assert_eq!(to_date("2024-05-01T10:30:00"), Some(ymd(2024, 5, 1)));
        assert_eq!(to_date("May 3, 2024"), Some(ymd(2024, 5, 3)));
        assert_eq!(to_date("05/03/2024"), Some(ymd(2024, 5, 3)));
        assert_eq!(to_date("not a date"), None);
        assert_eq!(to_date(""), None);
        assert_eq!(to_date(&None::<String>), None);
    }

    #[test]
    fn timestamps_resolve_to_a_local_day() {
        let noon = Local
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .unwrap()
            .timestamp_millis();
        assert_eq!(to_date(&Timestamp(noon)), Some(ymd(2024, 5, 1)));
    }

    #[test]
    fn format_is_zero_padded_or_empty() {
        assert_eq!(format_date("2024/5/1"), "2024-05-01");
        assert_eq!(format_date("garbage"), "");
    }

    #[test]
    fn strict_strings_round_trip() {
        for s in ["2024-01-01", "2024-02-29", "1999-12-31", "2031-07-15"] {
            assert_eq!(format_date(&parse_calendar_date(s)), s);
        }
    }

    #[test]
    fn days_between_is_antisymmetric() {
        let a = ymd(2024, 3, 1);
        let b = ymd(2024, 3, 31);
        assert_eq!(days_between(&a, &a), Some(0));
        assert_eq!(days_between(&a, &b), Some(30));
        assert_eq!(days_between(&b, &a), Some(-30));
        assert_eq!(days_between("2024-03-01", "junk"), None);
    }

    #[test]
    fn days_between_ignores_dst_switches() {
        // Spring-forward weekend in both Europe and the US falls inside this span.
        assert_eq!(days_between("2024-03-01", "2024-04-01"), Some(31));
        assert_eq!(days_between("2024-10-20", "2024-11-10"), Some(21));
    }

    #[test]
    fn iso_weeks_anchor_on_thursday() {
        assert_eq!(week_of_year(ymd(2021, 1, 3)), 53);
        assert_eq!(week_of_year(ymd(2021, 1, 4)), 1);
        assert_eq!(week_of_year(ymd(2024, 12, 30)), 1);
        assert_eq!(week_of_year(ymd(2024, 5, 6)), 19);
    }

    #[test]
    fn month_edges() {
        assert_eq!(first_of_month(ymd(2024, 2, 17)), ymd(2024, 2, 1));
        assert_eq!(last_of_month(ymd(2024, 2, 17)), ymd(2024, 2, 29));
        assert_eq!(last_of_month(ymd(2023, 12, 5)), ymd(2023, 12, 31));
        assert_eq!(shift_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 29));
        assert_eq!(shift_months(ymd(2024, 3, 15), -3), ymd(2023, 12, 15));
    }
}
