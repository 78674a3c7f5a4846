//! Localized relative-time phrases ("2 دقیقه پیش").
//!
//! [`time_ago`] reduces the distance between two timestamps along a
//! fixed unit ladder and renders a Persian phrase. It is pure: both
//! timestamps are inputs, so callers (and tests) control "now".

/// The unit ladder: each rung's label and the divisor that carries a
/// count from this rung to the next. Month arithmetic uses the 4.35
/// weeks-per-month average; the terminal rung has nothing to divide
/// into.
const LADDER: &[(&str, f64)] = &[
    ("ثانیه", 60.0),
    ("دقیقه", 60.0),
    ("ساعت", 24.0),
    ("روز", 7.0),
    ("هفته", 4.35),
    ("ماه", 12.0),
    ("سال", f64::INFINITY),
];

/// Render the distance from `then` to `now` as a localized phrase.
///
/// A past `then` gets the پیش suffix; a future `then` renders the same
/// magnitude without it. A zero distance is `"0 ثانیه پیش"`. Years are
/// the coarsest unit: multi-decade gaps stay on that rung. Counts use
/// ASCII digits with comma thousands grouping.
///
/// # Examples
///
/// ```
/// use shamsi::time_ago;
///
/// let now = 1_710_892_800;
/// assert_eq!(time_ago(now, now - 130), "2 دقیقه پیش");
/// assert_eq!(time_ago(now, now + 130), "2 دقیقه");
/// ```
pub fn time_ago(now: i64, then: i64) -> String {
    let delta = i128::from(now) - i128::from(then);
    let future = delta < 0;
    let mut diff = delta.unsigned_abs() as f64;

    let mut rung = 0;
    while rung + 1 < LADDER.len() && diff >= LADDER[rung].1 {
        diff /= LADDER[rung].1;
        rung += 1;
    }

    let count = diff.round() as u64;
    let mut phrase = format!("{} {}", group_thousands(count), LADDER[rung].0);
    if !future {
        phrase.push_str(" پیش");
    }
    phrase
}

/// Format an integer with `,` thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
