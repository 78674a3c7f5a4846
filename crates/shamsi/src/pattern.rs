//! Format patterns compiled into matching grammars.
//!
//! A format pattern uses single-character directives (`Y`, `m`, `d`, …)
//! mixed with literal text. [`Grammar::compile`] turns a pattern into an
//! ordered list of typed [`Segment`]s; [`Grammar::captures`] then matches
//! a candidate string against the whole segment list, anchored at both
//! ends. Matching is hand-rolled rather than delegated to a regex engine,
//! so the grammar carries no coupling to any regex dialect's named-group
//! syntax, and variable-width segments backtrack as needed.

/// The escape marker: the character after it is always a literal.
const ESCAPE: char = '\\';

/// Number of distinct capturable fields.
const FIELD_COUNT: usize = 6;

// ── Grammar model ───────────────────────────────────────────────────────────

/// The date or time field a directive captures into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl FieldKind {
    fn index(self) -> usize {
        self as usize
    }
}

/// The textual shape a field capture must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Exactly this many ASCII digits.
    Digits(usize),
    /// Between `min` and `max` ASCII digits.
    DigitRange(usize, usize),
    /// One ASCII uppercase letter then lowercase letters, `min..=max`
    /// letters in total.
    Letters(usize, usize),
}

impl Shape {
    fn bounds(self) -> (usize, usize) {
        match self {
            Shape::Digits(n) => (n, n),
            Shape::DigitRange(min, max) => (min, max),
            Shape::Letters(min, max) => (min, max),
        }
    }

    fn accepts(self, run: &[char]) -> bool {
        match self {
            Shape::Digits(_) | Shape::DigitRange(..) => run.iter().all(char::is_ascii_digit),
            Shape::Letters(..) => {
                let mut chars = run.iter();
                matches!(chars.next(), Some(first) if first.is_ascii_uppercase())
                    && chars.all(char::is_ascii_lowercase)
            }
        }
    }
}

/// One compiled element of a format pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text the candidate must contain verbatim.
    Literal(String),
    /// A named capture with a constrained shape.
    Field { field: FieldKind, shape: Shape },
}

/// A compiled format pattern: the segments a candidate must match, in
/// order, consuming the whole candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    segments: Vec<Segment>,
}

/// The field captures of a successful match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Captures {
    slots: [Option<String>; FIELD_COUNT],
}

impl Captures {
    /// The raw text captured for `field`, if the pattern had it.
    pub fn get(&self, field: FieldKind) -> Option<&str> {
        self.slots[field.index()].as_deref()
    }
}

/// Which field and shape a directive character stands for.
fn directive(ch: char) -> Option<(FieldKind, Shape)> {
    use FieldKind::*;
    let entry = match ch {
        'Y' => (Year, Shape::Digits(4)),
        'y' => (Year, Shape::Digits(2)),
        'm' => (Month, Shape::Digits(2)),
        'n' => (Month, Shape::DigitRange(1, 2)),
        'M' => (Month, Shape::Letters(3, 3)),
        'F' => (Month, Shape::Letters(3, 9)),
        'd' => (Day, Shape::Digits(2)),
        'j' => (Day, Shape::DigitRange(1, 2)),
        'D' => (Day, Shape::Letters(3, 3)),
        'l' => (Day, Shape::Letters(6, 9)),
        'u' => (Hour, Shape::DigitRange(1, 6)),
        'h' | 'H' => (Hour, Shape::Digits(2)),
        'g' | 'G' => (Hour, Shape::DigitRange(1, 2)),
        'i' => (Minute, Shape::Digits(2)),
        's' => (Second, Shape::Digits(2)),
        _ => return None,
    };
    Some(entry)
}

// ── Compilation ─────────────────────────────────────────────────────────────

impl Grammar {
    /// Compile a format pattern. Never fails: unrecognized characters are
    /// literals, and `\` escapes the character after it (single-level; an
    /// escaped character cannot itself start an escape). A trailing lone
    /// escape is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use shamsi::pattern::{FieldKind, Grammar};
    ///
    /// let grammar = Grammar::compile("Y/m/d");
    /// let caps = grammar.captures("1404/01/09").unwrap();
    /// assert_eq!(caps.get(FieldKind::Year), Some("1404"));
    /// assert_eq!(caps.get(FieldKind::Day), Some("09"));
    /// ```
    pub fn compile(pattern: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut escaped = false;

        for ch in pattern.chars() {
            if escaped {
                literal.push(ch);
                escaped = false;
            } else if ch == ESCAPE {
                escaped = true;
            } else if let Some((field, shape)) = directive(ch) {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field { field, shape });
            } else {
                literal.push(ch);
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Grammar { segments }
    }

    /// The compiled segments, in pattern order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match `candidate` against the grammar, consuming it entirely.
    ///
    /// Variable-width fields are greedy but backtrack, so `g` followed by
    /// `i` matches `"130"` as hour `1`, minute `30`. When a degenerate
    /// pattern captures the same field twice, the first occurrence wins.
    pub fn captures(&self, candidate: &str) -> Option<Captures> {
        let chars: Vec<char> = candidate.chars().collect();
        let mut captures = Captures::default();
        match_segments(&self.segments, &chars, &mut captures.slots).then_some(captures)
    }
}

// ── Matching ────────────────────────────────────────────────────────────────

fn match_segments(
    segments: &[Segment],
    input: &[char],
    slots: &mut [Option<String>; FIELD_COUNT],
) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return input.is_empty();
    };

    match segment {
        Segment::Literal(text) => {
            let len = text.chars().count();
            if input.len() < len || !text.chars().eq(input[..len].iter().copied()) {
                return false;
            }
            match_segments(rest, &input[len..], slots)
        }
        Segment::Field { field, shape } => {
            let (min, max) = shape.bounds();
            let max = max.min(input.len());
            for take in (min..=max).rev() {
                if shape.accepts(&input[..take]) && match_segments(rest, &input[take..], slots) {
                    // Assigned on unwind, so the earliest occurrence of a
                    // repeated field overwrites any later one.
                    slots[field.index()] = Some(input[..take].iter().collect());
                    return true;
                }
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_compile_to_fields() {
        let grammar = Grammar::compile("Y/m/d");
        assert_eq!(
            grammar.segments(),
            &[
                Segment::Field {
                    field: FieldKind::Year,
                    shape: Shape::Digits(4)
                },
                Segment::Literal("/".into()),
                Segment::Field {
                    field: FieldKind::Month,
                    shape: Shape::Digits(2)
                },
                Segment::Literal("/".into()),
                Segment::Field {
                    field: FieldKind::Day,
                    shape: Shape::Digits(2)
                },
            ]
        );
    }

    #[test]
    fn test_adjacent_literals_merge() {
        let grammar = Grammar::compile("سال Y");
        assert_eq!(grammar.segments().len(), 2);
        assert_eq!(grammar.segments()[0], Segment::Literal("سال ".into()));
    }

    #[test]
    fn test_escape_turns_any_directive_into_a_literal() {
        for directive_char in "YymnMFdjDluhHgGis".chars() {
            let pattern = format!("\\{directive_char}");
            let grammar = Grammar::compile(&pattern);
            assert_eq!(
                grammar.segments(),
                &[Segment::Literal(directive_char.to_string())],
                "escaped {directive_char} should be a literal"
            );
            assert!(grammar.captures(&directive_char.to_string()).is_some());
        }
    }

    #[test]
    fn test_escaping_is_single_level() {
        // The first escape hides the second; the Y after them is a field.
        let grammar = Grammar::compile(r"\\Y");
        assert_eq!(
            grammar.segments(),
            &[
                Segment::Literal("\\".into()),
                Segment::Field {
                    field: FieldKind::Year,
                    shape: Shape::Digits(4)
                },
            ]
        );
        assert!(grammar.captures(r"\2024").is_some());
    }

    #[test]
    fn test_trailing_escape_is_dropped() {
        let grammar = Grammar::compile("Y\\");
        assert_eq!(grammar.segments().len(), 1);
        assert!(grammar.captures("1404").is_some());
    }

    #[test]
    fn test_full_datetime_pattern_captures_every_field() {
        let grammar = Grammar::compile("Y/m/d H:i:s");
        let caps = grammar.captures("1404/01/09 15:30:45").unwrap();
        assert_eq!(caps.get(FieldKind::Year), Some("1404"));
        assert_eq!(caps.get(FieldKind::Month), Some("01"));
        assert_eq!(caps.get(FieldKind::Day), Some("09"));
        assert_eq!(caps.get(FieldKind::Hour), Some("15"));
        assert_eq!(caps.get(FieldKind::Minute), Some("30"));
        assert_eq!(caps.get(FieldKind::Second), Some("45"));
    }

    #[test]
    fn test_matching_is_anchored_at_both_ends() {
        let grammar = Grammar::compile("Y/m/d");
        assert!(grammar.captures("1404/01/09").is_some());
        assert!(grammar.captures("1404/01/09 ").is_none());
        assert!(grammar.captures(" 1404/01/09").is_none());
        assert!(grammar.captures("1404/01").is_none());
    }

    #[test]
    fn test_variable_width_fields_backtrack() {
        let grammar = Grammar::compile("gi");
        let caps = grammar.captures("130").unwrap();
        assert_eq!(caps.get(FieldKind::Hour), Some("1"));
        assert_eq!(caps.get(FieldKind::Minute), Some("30"));

        let caps = grammar.captures("1130").unwrap();
        assert_eq!(caps.get(FieldKind::Hour), Some("11"));
        assert_eq!(caps.get(FieldKind::Minute), Some("30"));
    }

    #[test]
    fn test_word_shapes_check_length_and_capitalization() {
        let month = Grammar::compile("M");
        assert!(month.captures("Tir").is_some());
        assert!(month.captures("tir").is_none());
        assert!(month.captures("Tirr").is_none());

        let long_month = Grammar::compile("F");
        assert!(long_month.captures("Farvardin").is_some());
        assert!(long_month.captures("Dey").is_some());
        assert!(long_month.captures("Az").is_none());

        let weekday = Grammar::compile("l");
        assert!(weekday.captures("Tuesday").is_some());
        assert!(weekday.captures("Wednesday").is_some());
        assert!(weekday.captures("Sun").is_none());
    }

    #[test]
    fn test_hour_digit_run_spans_one_to_six_digits() {
        let grammar = Grammar::compile("u");
        assert_eq!(
            grammar.captures("123456").unwrap().get(FieldKind::Hour),
            Some("123456")
        );
        assert_eq!(grammar.captures("7").unwrap().get(FieldKind::Hour), Some("7"));
        assert!(grammar.captures("1234567").is_none());
    }

    #[test]
    fn test_repeated_fields_keep_the_first_capture() {
        let grammar = Grammar::compile("Y Y");
        let caps = grammar.captures("1404 1405").unwrap();
        assert_eq!(caps.get(FieldKind::Year), Some("1404"));
    }

    #[test]
    fn test_empty_pattern_matches_only_empty_input() {
        let grammar = Grammar::compile("");
        assert!(grammar.captures("").is_some());
        assert!(grammar.captures("x").is_none());
    }
}
