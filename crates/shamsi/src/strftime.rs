//! strftime-style rendering of timestamps as Jalali text.
//!
//! [`render`] walks a `%`-directive pattern and substitutes Jalali date
//! and time fields, with month and weekday names in Persian script.
//! Output digits are ASCII; [`to_persian_digits`] transliterates a
//! rendered string when Persian digits are wanted.

use chrono::{DateTime, Datelike, Timelike, Weekday};

use crate::calendar;

/// Jalali month names, Farvardin first.
pub const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Abbreviated month names: the first three characters of the full name,
/// or the full name where it is already that short.
pub const MONTH_NAMES_SHORT: [&str; 12] = [
    "فرو", "ارد", "خرد", "تیر", "مرد", "شهر", "مهر", "آبا", "آذر", "دی", "بهم", "اسف",
];

/// Weekday names with the Iranian week order: Saturday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "شنبه",
    "یکشنبه",
    "دوشنبه",
    "سه‌شنبه",
    "چهارشنبه",
    "پنجشنبه",
    "جمعه",
];

/// Single-letter weekday abbreviations, Saturday first.
pub const WEEKDAY_NAMES_SHORT: [&str; 7] = ["ش", "ی", "د", "س", "چ", "پ", "ج"];

/// Before-noon / after-noon markers.
const MERIDIEM: [&str; 2] = ["ق.ظ", "ب.ظ"];

/// The civil fields of one instant, precomputed for directive lookup.
struct Moment {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    /// 0 = Saturday … 6 = Friday.
    weekday: usize,
    timestamp: i64,
}

/// Render `pattern` for `timestamp` (UTC) on the Jalali calendar.
///
/// Unknown `%` directives pass through verbatim, and a trailing lone `%`
/// is kept, so a pattern never fails to render. Returns `None` only when
/// the timestamp has no civil form in chrono's range.
///
/// # Examples
///
/// ```
/// use shamsi::strftime::render;
///
/// let nowruz = 1_710_892_800; // 2024-03-20T00:00:00Z
/// assert_eq!(render("%Y-%m-%d", nowruz).as_deref(), Some("1403-01-01"));
/// assert_eq!(render("%d %B %Y", nowruz).as_deref(), Some("01 فروردین 1403"));
/// ```
pub fn render(pattern: &str, timestamp: i64) -> Option<String> {
    let civil = DateTime::from_timestamp(timestamp, 0)?.naive_utc();
    let (year, month, day) = calendar::to_jalali(civil.year(), civil.month(), civil.day());
    let moment = Moment {
        year,
        month,
        day,
        hour: civil.hour(),
        minute: civil.minute(),
        second: civil.second(),
        weekday: weekday_index(civil.weekday()),
        timestamp,
    };
    Some(render_pattern(pattern, &moment))
}

/// Index into the Saturday-first weekday tables.
fn weekday_index(weekday: Weekday) -> usize {
    (weekday.num_days_from_monday() as usize + 2) % 7
}

fn render_pattern(pattern: &str, m: &Moment) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        let Some(directive) = chars.next() else {
            out.push('%');
            break;
        };
        match directive {
            'Y' => out.push_str(&format!("{:04}", m.year)),
            'y' => out.push_str(&format!("{:02}", m.year.rem_euclid(100))),
            'm' => out.push_str(&format!("{:02}", m.month)),
            'd' => out.push_str(&format!("{:02}", m.day)),
            'e' => out.push_str(&m.day.to_string()),
            'j' => out.push_str(&format!("{:03}", calendar::day_of_year(m.month, m.day))),
            'B' => out.push_str(MONTH_NAMES[m.month as usize - 1]),
            'b' | 'h' => out.push_str(MONTH_NAMES_SHORT[m.month as usize - 1]),
            'A' => out.push_str(WEEKDAY_NAMES[m.weekday]),
            'a' => out.push_str(WEEKDAY_NAMES_SHORT[m.weekday]),
            'u' => out.push_str(&(m.weekday + 1).to_string()),
            'w' => out.push_str(&m.weekday.to_string()),
            'H' => out.push_str(&format!("{:02}", m.hour)),
            'I' => out.push_str(&format!("{:02}", twelve_hour(m.hour))),
            'M' => out.push_str(&format!("{:02}", m.minute)),
            'S' => out.push_str(&format!("{:02}", m.second)),
            'p' | 'P' => out.push_str(MERIDIEM[usize::from(m.hour >= 12)]),
            'T' | 'X' => out.push_str(&render_pattern("%H:%M:%S", m)),
            'R' => out.push_str(&render_pattern("%H:%M", m)),
            'r' => out.push_str(&render_pattern("%I:%M:%S %p", m)),
            'D' | 'x' => out.push_str(&render_pattern("%d/%m/%y", m)),
            'F' => out.push_str(&render_pattern("%Y-%m-%d", m)),
            'c' => out.push_str(&render_pattern("%a %e %b %H:%M:%S", m)),
            's' => out.push_str(&m.timestamp.to_string()),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            '%' => out.push('%'),
            other => {
                out.push('%');
                out.push(other);
            }
        }
    }
    out
}

fn twelve_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// Replace every ASCII digit with the corresponding Persian digit.
///
/// # Examples
///
/// ```
/// use shamsi::strftime::to_persian_digits;
///
/// assert_eq!(to_persian_digits("1403/01/01"), "۱۴۰۳/۰۱/۰۱");
/// ```
pub fn to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '0' => '۰',
            '1' => '۱',
            '2' => '۲',
            '3' => '۳',
            '4' => '۴',
            '5' => '۵',
            '6' => '۶',
            '7' => '۷',
            '8' => '۸',
            '9' => '۹',
            other => other,
        })
        .collect()
}
