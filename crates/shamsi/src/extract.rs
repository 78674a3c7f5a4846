//! Field extraction: running a compiled grammar over a candidate string.
//!
//! [`extract_fields`] produces a [`ParsedFields`] record no matter what:
//! parse failure degrades to zeroed fields and an error counter, never an
//! error value. The `now` anchor is injected by the caller (it feeds
//! two-digit-year promotion), so extraction is fully deterministic.

use serde::Serialize;

use crate::calendar;
use crate::pattern::{FieldKind, Grammar};

/// The outcome of matching a candidate string against a format grammar.
///
/// Always fully populated: the six numeric fields default to `0` when
/// their directive is absent or the match fails, and the metadata
/// envelope always carries its fixed values. The serialized form is the
/// conventional parsed-date record shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParsedFields {
    /// Four-digit year, or a two-digit capture promoted by the current
    /// century. `0` when absent.
    pub year: i32,
    /// Month 1–12, `0` when absent or word-shaped.
    pub month: u32,
    /// Day 1–31, `0` when absent or word-shaped.
    pub day: u32,
    /// Hour. `0` when absent; the `u` directive can exceed 23.
    pub hour: u32,
    /// Minute 0–59, `0` when absent.
    pub minute: u32,
    /// Second 0–59, `0` when absent.
    pub second: u32,
    /// `1` when the candidate did not match or named an impossible date.
    pub error_count: u32,
    /// Always empty; the counter above is the whole error story.
    pub errors: Vec<String>,
    /// Always empty.
    pub fraction: String,
    /// Always `0`.
    pub warning_count: u32,
    /// Always empty.
    pub warnings: Vec<String>,
    /// Always `0`.
    pub is_localtime: u32,
    /// Always `0`.
    pub zone_type: u32,
    /// Always `0`.
    pub zone: u32,
    /// Always empty.
    pub is_dst: String,
}

impl ParsedFields {
    /// The record for a candidate that did not match the grammar.
    fn unmatched() -> Self {
        ParsedFields {
            error_count: 1,
            ..ParsedFields::default()
        }
    }
}

/// Match `candidate` against `grammar` and assemble the field record.
///
/// On no match every numeric field is `0` and `error_count` is `1`.
/// On a match, captures are parsed to integers (word-shaped captures
/// count as absent), the `(month, day, year)` triple is checked with the
/// lenient calendar validation using the year exactly as captured, and
/// only then is a two-character year capture promoted by the century
/// implied by `now` (current Jalali year minus that year mod 100).
///
/// # Examples
///
/// ```
/// use shamsi::pattern::Grammar;
/// use shamsi::extract_fields;
///
/// let grammar = Grammar::compile("Y/m/d");
/// let fields = extract_fields(&grammar, "1404/01/09", 0);
/// assert_eq!((fields.year, fields.month, fields.day), (1404, 1, 9));
/// assert_eq!(fields.error_count, 0);
/// ```
pub fn extract_fields(grammar: &Grammar, candidate: &str, now: i64) -> ParsedFields {
    let Some(caps) = grammar.captures(candidate) else {
        return ParsedFields::unmatched();
    };

    let raw_year = caps.get(FieldKind::Year);
    let mut fields = ParsedFields {
        year: raw_year.map_or(0, |raw| raw.parse().unwrap_or(0)),
        month: numeric_capture(caps.get(FieldKind::Month)),
        day: numeric_capture(caps.get(FieldKind::Day)),
        hour: numeric_capture(caps.get(FieldKind::Hour)),
        minute: numeric_capture(caps.get(FieldKind::Minute)),
        second: numeric_capture(caps.get(FieldKind::Second)),
        ..ParsedFields::default()
    };

    // Validation sees the year as captured; promotion comes after. A
    // two-digit Esfand 30th is therefore checked against the raw year's
    // leap status, not the promoted year's.
    if !calendar::is_valid_date(fields.year, fields.month, fields.day, false) {
        fields.error_count = 1;
    }
    if raw_year.is_some_and(|raw| raw.chars().count() == 2) {
        fields.year += century_of(now);
    }

    fields
}

/// Digit captures parse to their value; absent and word-shaped captures
/// are `0`.
fn numeric_capture(raw: Option<&str>) -> u32 {
    raw.and_then(|text| text.parse().ok()).unwrap_or(0)
}

/// The century of `now`'s Jalali year (e.g. `1400` during 1404).
fn century_of(now: i64) -> i32 {
    match calendar::jalali_from_timestamp(now) {
        Some((year, _, _)) => year - year.rem_euclid(100),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-03-21T00:00:00Z = 1404-01-01: "now" sits in Jalali year 1404.
    const NOW: i64 = 1_742_515_200;

    #[test]
    fn test_full_datetime_extraction() {
        let grammar = Grammar::compile("Y/m/d H:i:s");
        let fields = extract_fields(&grammar, "1404/01/09 15:30:45", NOW);
        assert_eq!(fields.year, 1404);
        assert_eq!(fields.month, 1);
        assert_eq!(fields.day, 9);
        assert_eq!(fields.hour, 15);
        assert_eq!(fields.minute, 30);
        assert_eq!(fields.second, 45);
        assert_eq!(fields.error_count, 0);
        assert_eq!(fields.warning_count, 0);
        assert!(fields.errors.is_empty());
    }

    #[test]
    fn test_mismatch_zeroes_every_field() {
        let grammar = Grammar::compile("Y/m/d");
        let fields = extract_fields(&grammar, "today", NOW);
        assert_eq!(fields, ParsedFields::unmatched());
        assert_eq!(fields.year, 0);
        assert_eq!(fields.error_count, 1);
    }

    #[test]
    fn test_impossible_dates_keep_their_captures() {
        // Mehr has 30 days.
        let grammar = Grammar::compile("Y/m/d");
        let fields = extract_fields(&grammar, "1404/07/31", NOW);
        assert_eq!(fields.error_count, 1);
        assert_eq!((fields.year, fields.month, fields.day), (1404, 7, 31));
    }

    #[test]
    fn test_two_digit_years_gain_the_current_century() {
        let grammar = Grammar::compile("y/m/d");
        let fields = extract_fields(&grammar, "04/01/09", NOW);
        assert_eq!(fields.year, 1404);
        let fields = extract_fields(&grammar, "05/01/09", NOW);
        assert_eq!(fields.year, 1405);
        let fields = extract_fields(&grammar, "99/01/09", NOW);
        assert_eq!(fields.year, 1499);
    }

    #[test]
    fn test_validation_runs_before_century_promotion() {
        // Raw year 5 sits on a leap offset of the 33-year cycle, so an
        // Esfand 30th passes validation even though the promoted year
        // 1405 is common.
        let grammar = Grammar::compile("y/m/d");
        let fields = extract_fields(&grammar, "05/12/30", NOW);
        assert_eq!(fields.error_count, 0);
        assert_eq!(fields.year, 1405);
        assert!(!calendar::is_valid_date(1405, 12, 30, true));
    }

    #[test]
    fn test_absent_components_stay_zero() {
        let grammar = Grammar::compile("H:i");
        let fields = extract_fields(&grammar, "12:30", NOW);
        assert_eq!((fields.year, fields.month, fields.day), (0, 0, 0));
        assert_eq!((fields.hour, fields.minute), (12, 30));
        assert_eq!(fields.error_count, 0);
    }

    #[test]
    fn test_word_captures_count_as_absent() {
        let grammar = Grammar::compile("d M Y");
        let fields = extract_fields(&grammar, "09 Tir 1404", NOW);
        assert_eq!(fields.month, 0);
        assert_eq!((fields.year, fields.day), (1404, 9));
        assert_eq!(fields.error_count, 0);
    }

    #[test]
    fn test_oversized_hour_run_is_kept_verbatim() {
        let grammar = Grammar::compile("u");
        let fields = extract_fields(&grammar, "123456", NOW);
        assert_eq!(fields.hour, 123_456);
        assert_eq!(fields.error_count, 0);
    }

    #[test]
    fn test_envelope_serializes_with_the_fixed_shape() {
        let grammar = Grammar::compile("Y/m/d");
        let fields = extract_fields(&grammar, "1404/01/09", NOW);
        let value = serde_json::to_value(&fields).unwrap();
        let object = value.as_object().unwrap();

        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "year",
                "month",
                "day",
                "hour",
                "minute",
                "second",
                "error_count",
                "errors",
                "fraction",
                "warning_count",
                "warnings",
                "is_localtime",
                "zone_type",
                "zone",
                "is_dst",
            ]
        );
        assert_eq!(value["error_count"], 0);
        assert_eq!(value["errors"], serde_json::json!([]));
        assert_eq!(value["fraction"], "");
        assert_eq!(value["is_localtime"], 0);
        assert_eq!(value["zone_type"], 0);
        assert_eq!(value["zone"], 0);
        assert_eq!(value["is_dst"], "");
    }
}
