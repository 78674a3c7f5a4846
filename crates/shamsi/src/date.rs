//! The Jalali date object: construction, formatting, and shifting.
//!
//! [`JalaliDate`] wraps a single optional Unix timestamp. An instant that
//! failed to resolve is carried as an explicit invalid state rather than a
//! panic: every dependent operation short-circuits to `None` and the value
//! stays safe to pass around. Parsing lives on the type as associated
//! functions since it needs no instant of its own.

use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::calendar;
use crate::error::{Result, ShamsiError};
use crate::extract::{extract_fields, ParsedFields};
use crate::pattern::Grammar;
use crate::relative::time_ago;
use crate::resolve::resolve_expression;
use crate::strftime::{render, to_persian_digits};

/// A point in time viewed through the Jalali calendar.
///
/// The wrapped timestamp is `None` once any resolution step has failed;
/// formatting and relative-time calls then return `None` instead of
/// producing nonsense. Construction never errors.
///
/// # Examples
///
/// ```
/// use shamsi::JalaliDate;
///
/// let nowruz = JalaliDate::from_timestamp(1_710_892_800);
/// assert_eq!(nowruz.format("date").as_deref(), Some("1403-01-01"));
/// assert_eq!(
///     nowruz.reforge("+1 day").format("date").as_deref(),
///     Some("1403-01-02")
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JalaliDate {
    time: Option<i64>,
}

impl JalaliDate {
    /// The current wall-clock instant.
    pub fn now() -> Self {
        Self {
            time: Some(Utc::now().timestamp()),
        }
    }

    /// Wrap raw Unix seconds, taken verbatim.
    pub fn from_timestamp(timestamp: i64) -> Self {
        Self {
            time: Some(timestamp),
        }
    }

    /// Build a date from a string.
    ///
    /// Numeric strings are taken verbatim as Unix seconds. Anything else
    /// goes through [`resolve_expression`] relative to the current
    /// wall-clock time, and an unresolvable expression yields an invalid
    /// date rather than an error.
    ///
    /// ```
    /// use shamsi::JalaliDate;
    ///
    /// assert_eq!(
    ///     JalaliDate::forge("1710892800").time(),
    ///     Some(1_710_892_800)
    /// );
    /// assert_eq!(JalaliDate::forge("not a date").time(), None);
    /// ```
    pub fn forge(expression: &str) -> Self {
        let trimmed = expression.trim();
        if let Ok(seconds) = trimmed.parse::<i64>() {
            return Self::from_timestamp(seconds);
        }
        Self {
            time: resolve_expression(trimmed, Utc::now().timestamp()).ok(),
        }
    }

    /// The wrapped Unix seconds, or `None` when invalid.
    pub fn time(&self) -> Option<i64> {
        self.time
    }

    /// Render through a pattern or one of the named aliases
    /// (`datetime`, `date`, `time`).
    ///
    /// Returns `None` when the date is invalid or the instant falls
    /// outside the representable range.
    pub fn format(&self, pattern: &str) -> Option<String> {
        let timestamp = self.time?;
        render(alias_pattern(pattern), timestamp)
    }

    /// Like [`format`](Self::format), with ASCII digits transliterated
    /// to Persian digits.
    ///
    /// ```
    /// use shamsi::JalaliDate;
    ///
    /// let nowruz = JalaliDate::from_timestamp(1_710_892_800);
    /// assert_eq!(
    ///     nowruz.format_persian("date").as_deref(),
    ///     Some("۱۴۰۳-۰۱-۰۱")
    /// );
    /// ```
    pub fn format_persian(&self, pattern: &str) -> Option<String> {
        self.format(pattern).map(|text| to_persian_digits(&text))
    }

    /// Re-resolve a free-text expression relative to this instant.
    ///
    /// A valid date whose expression fails to resolve becomes invalid.
    /// An already-invalid date is returned unchanged.
    #[must_use]
    pub fn reforge(self, expression: &str) -> Self {
        match self.time {
            Some(base) => Self {
                time: resolve_expression(expression, base).ok(),
            },
            None => self,
        }
    }

    /// A localized phrase for the time elapsed between now and this
    /// instant, such as `"3 روز پیش"`.
    ///
    /// Returns `None` when the date is invalid. The phrase direction is
    /// carried by the suffix alone: past instants end in the "ago" word,
    /// future instants drop it.
    pub fn ago(&self) -> Option<String> {
        let then = self.time?;
        Some(time_ago(Utc::now().timestamp(), then))
    }

    /// Alias of [`ago`](Self::ago). The computation is direction
    /// symmetric, so both names reduce the same elapsed magnitude.
    pub fn until(&self) -> Option<String> {
        self.ago()
    }

    /// Parse `candidate` against a date-style format pattern.
    ///
    /// The record is always fully populated; callers branch on
    /// [`ParsedFields::error_count`]. Two-digit years are promoted using
    /// the current Jalali century.
    ///
    /// ```
    /// use shamsi::JalaliDate;
    ///
    /// let fields = JalaliDate::parse_from_format("Y/m/d", "1403/07/14");
    /// assert_eq!(fields.error_count, 0);
    /// assert_eq!((fields.year, fields.month, fields.day), (1403, 7, 14));
    /// ```
    pub fn parse_from_format(pattern: &str, candidate: &str) -> ParsedFields {
        let grammar = Grammar::compile(pattern);
        extract_fields(&grammar, candidate, Utc::now().timestamp())
    }

    /// Parse `candidate` and convert the result to a Gregorian
    /// [`NaiveDateTime`].
    ///
    /// # Errors
    ///
    /// Returns [`ShamsiError::InvalidDate`] when the candidate does not
    /// satisfy the pattern, the parsed Jalali date is impossible or
    /// absent, or the time-of-day components are out of range.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use shamsi::JalaliDate;
    ///
    /// let datetime =
    ///     JalaliDate::datetime_from_format("Y/m/d H:i", "1403/01/01 12:30").unwrap();
    /// let expected = NaiveDate::from_ymd_opt(2024, 3, 20)
    ///     .unwrap()
    ///     .and_hms_opt(12, 30, 0)
    ///     .unwrap();
    /// assert_eq!(datetime, expected);
    /// ```
    pub fn datetime_from_format(pattern: &str, candidate: &str) -> Result<NaiveDateTime> {
        let fields = Self::parse_from_format(pattern, candidate);
        if fields.error_count != 0 {
            return Err(ShamsiError::InvalidDate(format!(
                "{candidate:?} does not satisfy format {pattern:?}"
            )));
        }
        let (g_year, g_month, g_day) =
            calendar::to_gregorian(fields.year, fields.month, fields.day).ok_or_else(|| {
                ShamsiError::InvalidDate(format!(
                    "{:04}/{:02}/{:02} has no Gregorian equivalent",
                    fields.year, fields.month, fields.day
                ))
            })?;
        NaiveDate::from_ymd_opt(g_year, g_month, g_day)
            .and_then(|date| date.and_hms_opt(fields.hour, fields.minute, fields.second))
            .ok_or_else(|| {
                ShamsiError::InvalidDate(format!(
                    "{:02}:{:02}:{:02} is not a valid time of day",
                    fields.hour, fields.minute, fields.second
                ))
            })
    }
}

/// Named patterns accepted by [`JalaliDate::format`]; anything else is
/// treated as a pattern itself.
fn alias_pattern(name: &str) -> &str {
    match name {
        "datetime" => "%Y-%m-%d %H:%M:%S",
        "date" => "%Y-%m-%d",
        "time" => "%H:%M:%S",
        other => other,
    }
}
