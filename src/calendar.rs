use chrono::{Datelike, NaiveDate};

/// Gregorian leap-year test.
pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Number of days in a 1-indexed month of the given year.
///
/// Any month outside 1..=12 is treated like a 31-day month; callers are
/// expected to hand in months taken from a real date.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Year and month reached after moving `months` whole months forward from `date`.
pub fn shift_month(date: NaiveDate, months: u32) -> Option<(i32, u32)> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    Some((year, month))
}

/// Advance `date` by whole calendar months, keeping its day of month.
///
/// When the target month is too short the result is clamped to that month's
/// last day (Jan 31 + 1 month = Feb 28/29). Returns `None` only when the
/// result falls outside chrono's representable range.
pub fn add_months_clamped(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let (year, month) = shift_month(date, months)?;
    let day = date.day().min(days_in_month(month, year));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Same as [`add_months_clamped`] but refuses to clamp: `None` when the target
/// month cannot hold the day of month of `date`.
pub fn add_months_exact(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let (year, month) = shift_month(date, months)?;
    if date.day() > days_in_month(month, year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, date.day())
}
