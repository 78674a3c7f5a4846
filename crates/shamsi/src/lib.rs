//! # shamsi
//!
//! Jalali (Shamsi) calendar dates for Rust.
//!
//! Shamsi formats Unix timestamps through the Iranian solar calendar,
//! parses date strings against date-style format patterns, renders
//! localized relative-time phrases, and converts between Jalali and
//! Gregorian dates. Everything is deterministic: the current time is an
//! explicit argument wherever an algorithm needs one.
//!
//! ## Modules
//!
//! - [`calendar`] — Jalali/Gregorian conversion, leap years, date validity
//! - [`date`] — the [`JalaliDate`] object: forge, format, reforge, ago
//! - [`pattern`] — date-style format patterns compiled to a matching grammar
//! - [`extract`] — grammar application and the parsed-fields record
//! - [`relative`] — elapsed seconds to a localized "N units ago" phrase
//! - [`resolve`] — free-text expressions ("now", "+1 day") to timestamps
//! - [`strftime`] — pattern rendering and Persian digit transliteration
//! - [`error`] — Error types
//!
//! ## Quick start
//!
//! ```
//! use shamsi::JalaliDate;
//!
//! let date = JalaliDate::from_timestamp(1_710_892_800);
//! assert_eq!(date.format("date").as_deref(), Some("1403-01-01"));
//! assert_eq!(
//!     date.format_persian("%d %B %Y").as_deref(),
//!     Some("۰۱ فروردین ۱۴۰۳")
//! );
//!
//! let fields = JalaliDate::parse_from_format("Y/m/d", "1403/07/14");
//! assert_eq!(fields.error_count, 0);
//! assert_eq!((fields.year, fields.month, fields.day), (1403, 7, 14));
//! ```

pub mod calendar;
pub mod date;
pub mod error;
pub mod extract;
pub mod pattern;
pub mod relative;
pub mod resolve;
pub mod strftime;

pub use date::JalaliDate;
pub use error::ShamsiError;
pub use extract::{extract_fields, ParsedFields};
pub use pattern::{FieldKind, Grammar, Segment, Shape};
pub use relative::time_ago;
pub use resolve::resolve_expression;
pub use strftime::{render, to_persian_digits};
