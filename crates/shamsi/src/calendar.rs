//! Jalali (Shamsi) calendar arithmetic.
//!
//! Pure functions for the Jalali calendar: leap years, month lengths,
//! date validity, and day-count conversion to and from the proleptic
//! Gregorian calendar. Nothing here reads a clock; timestamps enter
//! only through [`jalali_from_timestamp`], which interprets them as UTC.
//!
//! # Functions
//!
//! - [`is_leap_year`] — 33-year-cycle leap rule
//! - [`days_in_month`] — month length, leap-aware
//! - [`day_of_year`] — ordinal day within the Jalali year
//! - [`is_valid_date`] — strict or lenient component validation
//! - [`to_gregorian`] / [`to_jalali`] — calendar conversion
//! - [`jalali_from_timestamp`] — UTC civil date of a Unix timestamp

use chrono::{DateTime, Datelike};

/// Days in each Jalali month for a common year. Esfand (month 12) gains
/// a day in leap years.
const JALALI_MONTH_DAYS: [u32; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];

/// Days in each Gregorian month for a common year.
const GREGORIAN_MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Jalali years at this offset into the 33-year cycle are leap years.
///
/// The rule is the one embedded in the day-count conversion below (8 leap
/// years per 33), so [`is_leap_year`] and [`to_gregorian`] can never
/// disagree about whether Esfand has a 30th day.
///
/// # Examples
///
/// ```
/// use shamsi::calendar::is_leap_year;
///
/// assert!(is_leap_year(1403));
/// assert!(!is_leap_year(1404));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    let r = (year - 979).rem_euclid(33);
    r % 4 == 0 && r != 32
}

/// Length of `month` given whether the year is leap.
fn month_length(month: u32, leap: bool) -> u32 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        12 => {
            if leap {
                30
            } else {
                29
            }
        }
        _ => 0,
    }
}

/// Number of days in a Jalali month, or `0` for an out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    month_length(month, is_leap_year(year))
}

/// Ordinal day of the Jalali year (1-based) for a month/day pair.
///
/// The first eleven months have fixed lengths, so no year is needed.
pub fn day_of_year(month: u32, day: u32) -> u32 {
    (1..month).map(|m| month_length(m, true)).sum::<u32>() + day
}

/// Whether `(year, month, day)` names a real Jalali date.
///
/// In strict mode every component must be present and in range. In
/// lenient mode a `0` component means "absent" and is accepted, but the
/// components that are present are still checked: the month must be
/// 1–12, and the day must fit the month (using the leap-permissive bound
/// of 30 for Esfand when the year is absent) or 31 when the month is
/// also absent.
pub fn is_valid_date(year: i32, month: u32, day: u32, strict: bool) -> bool {
    if strict {
        return year >= 1
            && (1..=12).contains(&month)
            && day >= 1
            && day <= days_in_month(year, month);
    }
    if year < 0 {
        return false;
    }
    if month != 0 && !(1..=12).contains(&month) {
        return false;
    }
    if day != 0 {
        let bound = match (month, year) {
            (0, _) => 31,
            (m, 0) => month_length(m, true),
            (m, y) => month_length(m, is_leap_year(y)),
        };
        if day > bound {
            return false;
        }
    }
    true
}

/// Convert a Jalali date to the proleptic Gregorian calendar.
///
/// Returns `None` unless `year >= 1`, `month` is 1–12, and `day` is
/// 1–31. A day count past the end of the month rolls into the following
/// month rather than erroring; callers that need exact dates validate
/// with [`is_valid_date`] first.
///
/// # Examples
///
/// ```
/// use shamsi::calendar::to_gregorian;
///
/// assert_eq!(to_gregorian(1403, 1, 1), Some((2024, 3, 20)));
/// assert_eq!(to_gregorian(1348, 10, 11), Some((1970, 1, 1)));
/// assert_eq!(to_gregorian(1403, 13, 1), None);
/// ```
pub fn to_gregorian(year: i32, month: u32, day: u32) -> Option<(i32, u32, u32)> {
    if year < 1 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    let jy = i64::from(year) - 979;
    let mut day_no: i64 = 365 * jy + jy.div_euclid(33) * 8 + (jy.rem_euclid(33) + 3) / 4;
    for m in 0..(month as usize - 1) {
        day_no += i64::from(JALALI_MONTH_DAYS[m]);
    }
    day_no += i64::from(day) - 1;

    // Shift to the Gregorian epoch base (1600-01-01), then peel off
    // 400/100/4/1-year cycles.
    let mut g_day_no = day_no + 79;

    let mut gy: i64 = 1600 + 400 * g_day_no.div_euclid(146_097);
    g_day_no = g_day_no.rem_euclid(146_097);

    let mut leap = true;
    if g_day_no >= 36_525 {
        g_day_no -= 1;
        gy += 100 * g_day_no.div_euclid(36_524);
        g_day_no = g_day_no.rem_euclid(36_524);
        if g_day_no >= 365 {
            g_day_no += 1;
        } else {
            leap = false;
        }
    }

    gy += 4 * g_day_no.div_euclid(1461);
    g_day_no = g_day_no.rem_euclid(1461);

    if g_day_no >= 366 {
        leap = false;
        g_day_no -= 1;
        gy += g_day_no.div_euclid(365);
        g_day_no = g_day_no.rem_euclid(365);
    }

    let mut gm = 0usize;
    loop {
        let len = i64::from(GREGORIAN_MONTH_DAYS[gm]) + i64::from(gm == 1 && leap);
        if g_day_no < len {
            break;
        }
        g_day_no -= len;
        gm += 1;
    }

    Some((gy as i32, gm as u32 + 1, g_day_no as u32 + 1))
}

/// Convert a proleptic Gregorian date to the Jalali calendar.
///
/// Total over chrono's representable range; the inverse of
/// [`to_gregorian`] on valid dates.
///
/// # Examples
///
/// ```
/// use shamsi::calendar::to_jalali;
///
/// assert_eq!(to_jalali(2024, 3, 20), (1403, 1, 1));
/// assert_eq!(to_jalali(1970, 1, 1), (1348, 10, 11));
/// ```
pub fn to_jalali(year: i32, month: u32, day: u32) -> (i32, u32, u32) {
    let gy = i64::from(year) - 1600;
    let mut g_day_no: i64 =
        365 * gy + (gy + 3).div_euclid(4) - (gy + 99).div_euclid(100) + (gy + 399).div_euclid(400);
    for m in 0..(month.clamp(1, 12) as usize - 1) {
        g_day_no += i64::from(GREGORIAN_MONTH_DAYS[m]);
    }
    if month > 2 && is_gregorian_leap(year) {
        g_day_no += 1;
    }
    g_day_no += i64::from(day) - 1;

    let mut j_day_no = g_day_no - 79;

    // 12053 days = one 33-year Jalali cycle (25 common + 8 leap years).
    let cycles = j_day_no.div_euclid(12_053);
    j_day_no = j_day_no.rem_euclid(12_053);

    let mut jy = 979 + 33 * cycles + 4 * j_day_no.div_euclid(1461);
    j_day_no = j_day_no.rem_euclid(1461);

    if j_day_no >= 366 {
        jy += (j_day_no - 1).div_euclid(365);
        j_day_no = (j_day_no - 1).rem_euclid(365);
    }

    let mut jm = 0usize;
    while jm < 11 && j_day_no >= i64::from(JALALI_MONTH_DAYS[jm]) {
        j_day_no -= i64::from(JALALI_MONTH_DAYS[jm]);
        jm += 1;
    }

    (jy as i32, jm as u32 + 1, j_day_no as u32 + 1)
}

/// Jalali `(year, month, day)` of a Unix timestamp, read as UTC.
///
/// Returns `None` when the timestamp falls outside chrono's
/// representable range.
pub fn jalali_from_timestamp(timestamp: i64) -> Option<(i32, u32, u32)> {
    let civil = DateTime::from_timestamp(timestamp, 0)?.naive_utc().date();
    Some(to_jalali(civil.year(), civil.month(), civil.day()))
}

fn is_gregorian_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_years_follow_the_33_year_cycle() {
        for year in [1375, 1387, 1399, 1403] {
            assert!(is_leap_year(year), "{year} should be leap");
        }
        for year in [1380, 1400, 1402, 1404] {
            assert!(!is_leap_year(year), "{year} should be common");
        }
    }

    #[test]
    fn test_esfand_length_tracks_the_leap_rule() {
        assert_eq!(days_in_month(1403, 12), 30);
        assert_eq!(days_in_month(1404, 12), 29);
        assert_eq!(days_in_month(1404, 1), 31);
        assert_eq!(days_in_month(1404, 7), 30);
        assert_eq!(days_in_month(1404, 13), 0);
    }

    #[test]
    fn test_ordinal_days() {
        assert_eq!(day_of_year(1, 1), 1);
        assert_eq!(day_of_year(7, 1), 187);
        assert_eq!(day_of_year(12, 30), 366);
    }

    #[test]
    fn test_known_conversion_pairs() {
        let pairs = [
            ((1403, 1, 1), (2024, 3, 20)),
            ((1404, 1, 1), (2025, 3, 21)),
            ((1403, 12, 30), (2025, 3, 20)),
            ((1400, 6, 31), (2021, 9, 22)),
            ((1348, 10, 11), (1970, 1, 1)),
        ];
        for ((jy, jm, jd), (gy, gm, gd)) in pairs {
            assert_eq!(to_gregorian(jy, jm, jd), Some((gy, gm, gd)));
            assert_eq!(to_jalali(gy, gm, gd), (jy, jm, jd));
        }
    }

    #[test]
    fn test_conversion_round_trips() {
        for year in [1348, 1375, 1399, 1403, 1404, 1450] {
            for month in 1..=12 {
                for day in [1, 15, days_in_month(year, month)] {
                    let (gy, gm, gd) = to_gregorian(year, month, day).unwrap();
                    assert_eq!(to_jalali(gy, gm, gd), (year, month, day));
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_components_do_not_convert() {
        assert_eq!(to_gregorian(0, 1, 1), None);
        assert_eq!(to_gregorian(1404, 0, 1), None);
        assert_eq!(to_gregorian(1404, 13, 1), None);
        assert_eq!(to_gregorian(1404, 1, 0), None);
        assert_eq!(to_gregorian(1404, 1, 32), None);
    }

    #[test]
    fn test_strict_validation_requires_every_component() {
        assert!(is_valid_date(1404, 7, 30, true));
        assert!(!is_valid_date(1404, 7, 31, true));
        assert!(is_valid_date(1403, 12, 30, true));
        assert!(!is_valid_date(1404, 12, 30, true));
        assert!(!is_valid_date(0, 1, 1, true));
        assert!(!is_valid_date(1404, 0, 1, true));
        assert!(!is_valid_date(1404, 1, 0, true));
    }

    #[test]
    fn test_lenient_validation_treats_zero_as_absent() {
        assert!(is_valid_date(0, 0, 0, false));
        assert!(is_valid_date(1404, 0, 0, false));
        assert!(is_valid_date(0, 12, 30, false)); // year unknown: assume leap
        assert!(is_valid_date(0, 0, 31, false)); // month unknown: longest month
        assert!(!is_valid_date(0, 13, 1, false));
        assert!(!is_valid_date(1404, 7, 31, false));
        assert!(!is_valid_date(1404, 12, 30, false));
        assert!(!is_valid_date(0, 1, 32, false));
    }

    #[test]
    fn test_timestamps_resolve_through_utc() {
        assert_eq!(jalali_from_timestamp(0), Some((1348, 10, 11)));
        assert_eq!(jalali_from_timestamp(1_710_892_800), Some((1403, 1, 1)));
        // One second before midnight still lands on the previous day.
        assert_eq!(jalali_from_timestamp(1_710_892_799), Some((1402, 12, 29)));
    }
}
