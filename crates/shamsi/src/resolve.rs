//! Free-text time expressions resolved against an explicit base.
//!
//! [`resolve_expression`] is the interpreter behind the facade's string
//! constructor: it turns a human expression into Unix seconds. Relative
//! forms are anchored to the `base` argument, never to an ambient clock,
//! so resolution is deterministic. Everything is UTC.
//!
//! Supported forms, first match wins:
//!
//! - `@1710892800` — absolute epoch seconds
//! - RFC 3339 datetimes (`2024-03-20T13:30:00Z`, offset variants)
//! - Gregorian calendar datetimes and dates (`2024-03-20 13:30`,
//!   `2024/03/20`; bare dates land at midnight)
//! - anchors: `now`, `today`, `midnight`, `noon`, `tomorrow`,
//!   `yesterday` (day anchors snap to 00:00)
//! - weekday jumps: `next monday`, `this friday`, `last wednesday`
//! - compact signed offsets: `+1d2h30m`, `-45s`, `+2w`
//! - worded offsets: `+1 day`, `3 weeks`, `10 minutes ago`,
//!   `in 2 hours`, `+2 months`, `1 year`
//!
//! Months and years shift the civil date (with end-of-month clamping);
//! every other unit is a fixed number of seconds. Bare numbers are not
//! expressions; the facade treats those as timestamps before the
//! resolver runs.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, Weekday};

use crate::error::{Result, ShamsiError};

/// Gregorian datetime layouts accepted as absolute expressions.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts, resolved to midnight UTC.
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Resolve a free-text expression to Unix seconds, relative to `base`.
///
/// # Errors
///
/// Returns [`ShamsiError::InvalidExpression`] when no supported form
/// matches, or when the arithmetic would leave the representable range.
///
/// # Examples
///
/// ```
/// use shamsi::resolve_expression;
///
/// let base = 1_710_892_800; // 2024-03-20T00:00:00Z
/// assert_eq!(resolve_expression("now", base).unwrap(), base);
/// assert_eq!(resolve_expression("+1 day", base).unwrap(), base + 86_400);
/// assert!(resolve_expression("sometime nice", base).is_err());
/// ```
pub fn resolve_expression(expression: &str, base: i64) -> Result<i64> {
    let trimmed = expression.trim();
    let normalized = normalize_expression(trimmed);
    let civil = DateTime::from_timestamp(base, 0).map(|dt| dt.naive_utc());

    try_epoch_seconds(&normalized)
        .or_else(|| try_rfc3339(trimmed))
        .or_else(|| try_calendar_datetime(trimmed))
        .or_else(|| civil.and_then(|now| try_anchor(&normalized, now)))
        .or_else(|| civil.and_then(|now| try_weekday_jump(&normalized, now)))
        .or_else(|| try_compact_offset(&normalized, base))
        .or_else(|| civil.and_then(|now| try_worded_offset(&normalized, base, now)))
        .ok_or_else(|| ShamsiError::InvalidExpression(trimmed.to_string()))
}

/// Lowercase and collapse interior whitespace.
fn normalize_expression(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ── Absolute forms ──────────────────────────────────────────────────────────

fn try_epoch_seconds(s: &str) -> Option<i64> {
    s.strip_prefix('@')?.parse().ok()
}

fn try_rfc3339(s: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.timestamp()).ok()
}

fn try_calendar_datetime(s: &str) -> Option<i64> {
    for layout in DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(dt.and_utc().timestamp());
        }
    }
    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(s, layout) {
            return midnight(date);
        }
    }
    None
}

// ── Anchored forms ──────────────────────────────────────────────────────────

fn try_anchor(s: &str, now: NaiveDateTime) -> Option<i64> {
    match s {
        "now" => Some(now.and_utc().timestamp()),
        "today" | "midnight" => midnight(now.date()),
        "noon" => Some(now.date().and_hms_opt(12, 0, 0)?.and_utc().timestamp()),
        "tomorrow" => midnight(now.date().succ_opt()?),
        "yesterday" => midnight(now.date().pred_opt()?),
        _ => None,
    }
}

/// "next monday", "this friday", "last wednesday", all at midnight.
fn try_weekday_jump(s: &str, now: NaiveDateTime) -> Option<i64> {
    let (modifier, rest) = s.split_once(' ')?;
    let weekday = parse_weekday(rest)?;
    let current = now.date().weekday();
    let delta = weekday.num_days_from_monday() as i64 - current.num_days_from_monday() as i64;

    let days = match modifier {
        // Always ahead: the same weekday means a full week out.
        "next" => match (delta + 7) % 7 {
            0 => 7,
            ahead => ahead,
        },
        // Same week, may be behind or ahead.
        "this" => delta,
        // Always behind: the same weekday means a full week back.
        "last" => -match (-delta + 7) % 7 {
            0 => 7,
            back => back,
        },
        _ => return None,
    };

    let target = now.date().checked_add_signed(Duration::days(days))?;
    midnight(target)
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    let weekday = match s {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

// ── Offset forms ────────────────────────────────────────────────────────────

/// "+1d2h30m" and friends: a required sign, then number/unit pairs.
fn try_compact_offset(s: &str, base: i64) -> Option<i64> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => return None,
    };
    if rest.is_empty() {
        return None;
    }

    let mut total: i64 = 0;
    let mut digits = String::new();
    let mut found_any = false;

    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        if digits.is_empty() {
            return None;
        }
        let n: i64 = digits.parse().ok()?;
        digits.clear();
        let unit_seconds: i64 = match ch {
            'w' => 604_800,
            'd' => 86_400,
            'h' => 3_600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total = total.checked_add(n.checked_mul(unit_seconds)?)?;
        found_any = true;
    }
    // A trailing number without a unit is not an offset.
    if !digits.is_empty() || !found_any {
        return None;
    }

    if negative {
        base.checked_sub(total)
    } else {
        base.checked_add(total)
    }
}

/// "+1 day", "3 weeks", "10 minutes ago", "in 2 hours", "+2 months".
fn try_worded_offset(s: &str, base: i64, now: NaiveDateTime) -> Option<i64> {
    let parts: Vec<&str> = s.split(' ').collect();
    let (count, unit): (i64, &str) = match parts.as_slice() {
        ["in", n, unit] => (n.parse().ok()?, *unit),
        [n, unit, "ago"] => (n.parse::<i64>().ok()?.checked_neg()?, *unit),
        [n, unit] => (n.parse().ok()?, *unit),
        _ => return None,
    };
    apply_offset(count, unit, base, now)
}

fn apply_offset(count: i64, unit: &str, base: i64, now: NaiveDateTime) -> Option<i64> {
    let unit = unit.strip_suffix('s').unwrap_or(unit);
    let seconds_per: i64 = match unit {
        "sec" | "second" => 1,
        "min" | "minute" => 60,
        "hour" => 3_600,
        "day" => 86_400,
        "week" => 604_800,
        "month" => return shift_months(count, now),
        "year" => return shift_months(count.checked_mul(12)?, now),
        _ => return None,
    };
    base.checked_add(count.checked_mul(seconds_per)?)
}

/// Civil month arithmetic; chrono clamps to the end of shorter months.
fn shift_months(months: i64, now: NaiveDateTime) -> Option<i64> {
    let shifted = if months >= 0 {
        now.checked_add_months(Months::new(u32::try_from(months).ok()?))?
    } else {
        now.checked_sub_months(Months::new(u32::try_from(months.checked_neg()?).ok()?))?
    };
    Some(shifted.and_utc().timestamp())
}

fn midnight(date: NaiveDate) -> Option<i64> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}
