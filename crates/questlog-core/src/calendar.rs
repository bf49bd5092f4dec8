//! Day and week boundary arithmetic.
//!
//! Streak continuity and the weekly quota both compare timestamps at day
//! granularity, and weeks start on Sunday. All functions take the timezone
//! as a parameter; the anchor timezone is a configuration concern
//! ([`crate::storage::Config::timezone`]), never the server's local zone.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

/// Calendar date of `t` in the given timezone.
pub fn local_date<Tz: TimeZone>(t: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    t.with_timezone(tz).date_naive()
}

/// True when both instants fall on the same calendar day in `tz`.
pub fn is_same_day<Tz: TimeZone>(a: DateTime<Utc>, b: DateTime<Utc>, tz: &Tz) -> bool {
    local_date(a, tz) == local_date(b, tz)
}

/// UTC instant of midnight on `date` in `tz`.
///
/// DST gaps and folds resolve to the earliest valid instant.
pub fn midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => tz.from_utc_datetime(&naive).with_timezone(&Utc),
    }
}

/// Start of the week containing `now`: the most recent Sunday at 00:00
/// local time, returned as a UTC instant.
pub fn start_of_week<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let today = local_date(now, tz);
    let back = i64::from(today.weekday().num_days_from_sunday());
    midnight(today - Duration::days(back), tz)
}

/// The most recent week boundary strictly in the past: Sunday 00:00 of
/// the current week, or a full week earlier when `now` itself falls on a
/// Sunday. Completions at or after this instant belong to a week that is
/// still open.
pub fn start_of_last_week<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let week_start = start_of_week(now, tz);
    if local_date(now, tz).weekday() == chrono::Weekday::Sun {
        week_start - Duration::days(7)
    } else {
        week_start
    }
}

/// Half-open `[start, end)` UTC bounds of the calendar day containing `now`.
pub fn day_bounds<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = local_date(now, tz);
    (midnight(today, tz), midnight(today + Duration::days(1), tz))
}
