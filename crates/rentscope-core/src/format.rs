//! Number rendering that matches what a browser shows for
//! `Number.prototype.toLocaleString()` in the `ko-KR`/`en-US` locales.

/// Group the integer part with `,` and keep at most three fraction digits.
///
/// Fractions round half away from zero and trailing zeros are dropped, so
/// `12345.6789` becomes `"12,345.679"` and `1000.5` becomes `"1,000.5"`.
pub fn group_thousands(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // Round on the scaled magnitude so halves go away from zero
    let scaled = (value.abs() * 1000.0).round() / 1000.0;
    let fixed = format!("{scaled:.3}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }

    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integer_part() {
        assert_eq!(group_thousands(12345.0), "12,345");
        assert_eq!(group_thousands(67.0), "67");
        assert_eq!(group_thousands(1_000_000.0), "1,000,000");
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(-4500.0), "-4,500");
    }

    #[test]
    fn keeps_at_most_three_fraction_digits() {
        assert_eq!(group_thousands(15312.45), "15,312.45");
        assert_eq!(group_thousands(12345.6789), "12,345.679");
        assert_eq!(group_thousands(1000.5), "1,000.5");
        assert_eq!(group_thousands(0.0004), "0");
        assert_eq!(group_thousands(-0.0004), "0");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(group_thousands(f64::NAN), "NaN");
        assert_eq!(group_thousands(f64::INFINITY), "∞");
        assert_eq!(group_thousands(f64::NEG_INFINITY), "-∞");
    }
}
