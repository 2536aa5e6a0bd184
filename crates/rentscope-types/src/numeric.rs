//! Lenient numeric parsing for form text, and number text as a page shows it.
//!
//! Form fields hold free text. The page parses them the way a browser does:
//! leading whitespace is skipped and the longest numeric prefix wins, so
//! `"84.5㎡"` reads as `84.5` and `"3층"` as `3`. Text with no numeric prefix
//! yields `None`.
//!
//! Integer fields are carried as `i64`. An integer prefix that does not fit
//! yields `None` (sent as `null`) where a browser would send a rounded float.

/// Parse a float from the longest leading decimal prefix.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();

    if let Some(rest) = text.strip_prefix('+').or_else(|| text.strip_prefix('-'))
        && rest.starts_with("Infinity")
    {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if text.starts_with("Infinity") {
        return Some(f64::INFINITY);
    }

    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

/// Parse an integer from the longest leading digit prefix. A `0x` prefix
/// switches to hexadecimal.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, body) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let end = body
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(body.len());
    if end == 0 {
        return None;
    }

    let sign = if negative { "-" } else { "" };
    i64::from_str_radix(&format!("{sign}{}", &body[..end]), radix).ok()
}

/// Render a number the way JavaScript's `String(n)` does: integral values
/// without a fraction, and exponent notation outside `[1e-6, 1e21)`.
pub fn format_js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}
