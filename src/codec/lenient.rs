//! Lenient `yyyy-MM-dd[ HH:mm:ss.SSS]` parsing.
//!
//! Every component is read as a plain run of digits and folded in arithmetically, so values
//! outside their calendar range roll over into the next larger unit instead of failing:
//! `2023-13-01` is `2024-01-01` and `2024-03-00` is `2024-02-29`. Anything after the last
//! component is ignored. The year may carry a leading `-`, the form years before 0 are
//! written in.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?[0-9]+)-([0-9]+)-([0-9]+)").expect("date pattern is valid"));

static TIMESTAMP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?[0-9]+)-([0-9]+)-([0-9]+) ([0-9]+):([0-9]+):([0-9]+)\.([0-9]+)")
        .expect("timestamp pattern is valid")
});

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

/// Parse `yyyy-MM-dd`.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let caps = DATE_PATTERN.captures(raw)?;
    roll_date(component(&caps, 1)?, component(&caps, 2)?, component(&caps, 3)?)
}

/// Parse `yyyy-MM-dd HH:mm:ss.SSS`. The fraction counts milliseconds, it is not a decimal
/// fraction of a second.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let caps = TIMESTAMP_PATTERN.captures(raw)?;
    let date = roll_date(component(&caps, 1)?, component(&caps, 2)?, component(&caps, 3)?)?;

    let offset = component(&caps, 4)?
        .checked_mul(MILLIS_PER_HOUR)?
        .checked_add(component(&caps, 5)?.checked_mul(MILLIS_PER_MINUTE)?)?
        .checked_add(component(&caps, 6)?.checked_mul(MILLIS_PER_SECOND)?)?
        .checked_add(component(&caps, 7)?)?;

    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::try_milliseconds(offset)?)
}

fn component(caps: &Captures<'_>, idx: usize) -> Option<i64> {
    caps.get(idx)?.as_str().parse().ok()
}

fn roll_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month - 1)?;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_signed(TimeDelta::try_days(day - 1)?)
}
