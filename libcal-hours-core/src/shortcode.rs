//! Shortcode attributes and window-size resolution.

/// Hard cap on the number of weeks shown, also the default.
pub const MAX_WEEKS: u32 = 3;

const DAYS_PER_WEEK: u32 = 7;

/// Attributes of an `[wplibcalhours]` embed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodeAttrs {
    pub location: String,
    pub num_weeks: Option<String>,
}

impl ShortcodeAttrs {
    pub fn new(location: impl Into<String>) -> Self {
        ShortcodeAttrs {
            location: location.into(),
            num_weeks: None,
        }
    }

    pub fn with_num_weeks(mut self, num_weeks: impl ToString) -> Self {
        self.num_weeks = Some(num_weeks.to_string());
        self
    }

    /// Build from raw key/value pairs. Keys are case-insensitive and
    /// unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut attrs = ShortcodeAttrs::default();
        for (key, value) in pairs {
            match key.as_ref().to_ascii_lowercase().as_str() {
                "location" => attrs.location = value.into(),
                "num_weeks" => attrs.num_weeks = Some(value.into()),
                _ => {}
            }
        }
        attrs
    }

    pub fn num_weeks(&self) -> u32 {
        resolve_num_weeks(self.num_weeks.as_deref())
    }

    pub fn num_days(&self) -> usize {
        (self.num_weeks() * DAYS_PER_WEEK) as usize
    }
}

/// Clamp a requested week count to `1..=MAX_WEEKS`.
///
/// Absent, non-numeric and out-of-range values all fall back to `MAX_WEEKS`.
pub fn resolve_num_weeks(requested: Option<&str>) -> u32 {
    match requested.map(leading_int) {
        Some(n) if (1..=i64::from(MAX_WEEKS)).contains(&n) => n as u32,
        _ => MAX_WEEKS,
    }
}

/// Integer value of the leading numeric prefix of `s`, 0 if there is none.
///
/// A prefix with a fraction or exponent ("1.9", "1e1") is read as a float and
/// truncated. Integers too large for `i64` saturate.
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_at = |i: usize| bytes[i.min(bytes.len())..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_at(end);
    end += int_digits;

    let mut is_float = false;
    let mut mantissa_digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_at(end + 1);
        if int_digits + frac_digits > 0 {
            is_float = true;
            end += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_at(exp);
        if exp_digits > 0 {
            is_float = true;
            end = exp + exp_digits;
        }
    }

    let number = &s[..end];
    if is_float {
        number.parse::<f64>().map_or(0, |f| f as i64)
    } else {
        number
            .parse::<i64>()
            .unwrap_or(if number.starts_with('-') { i64::MIN } else { i64::MAX })
    }
}
