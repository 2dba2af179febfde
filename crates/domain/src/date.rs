use chrono::prelude::*;
use chrono::{Duration, LocalResult};
use chrono_tz::Tz;

/// Parses a wall clock time on the form `HH:MM` into `(hour, minute)`
pub fn parse_time_of_day(timestr: &str) -> Option<(u32, u32)> {
    let parts = timestr.trim().split(':').collect::<Vec<_>>();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }

    Some((hour, minute))
}

pub fn parse_timezone(timezone: &str) -> Option<Tz> {
    timezone.parse::<Tz>().ok()
}

/// Maps a local wall clock time in `tz` to an instant.
///
/// An ambiguous time (clocks turned back) resolves to the earliest instant.
/// A time skipped by a forward transition is interpreted with the offset that
/// was in force before the transition, so 02:30 on a day where 02:00 jumps to
/// 03:00 ends up at 03:30.
pub fn resolve_local(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let before = *naive - Duration::days(1);
            let offset = tz.offset_from_local_datetime(&before).earliest()?;
            let utc = *naive - Duration::seconds(offset.fix().local_minus_utc() as i64);
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

pub fn is_same_utc_day(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    a.naive_utc().date() == b.naive_utc().date()
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
