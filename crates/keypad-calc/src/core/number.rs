//! Conversions between display strings and `f64`
//!
//! The display always holds text. These two functions are the only places
//! where that text becomes a number and back again, so they define what
//! "numeric" means for every engine operation.

/// Exponents at or beyond this many integer digits switch to `1e+21` style
const MAX_PLAIN_DIGITS: i32 = 21;

/// Values below `1e-6` switch to `1e-7` style
const MIN_PLAIN_EXPONENT: i32 = -6;

/// Parses the longest numeric prefix of `input`, like a lenient float reader.
///
/// Leading whitespace and a sign are accepted, then `Infinity` or a decimal
/// literal with optional fraction and exponent. Trailing garbage is ignored
/// (`"12abc"` is `12`). Returns `None` when no digits are found, which is the
/// case for `""`, `"-"`, `"."` and the error marker.
#[must_use]
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        end = j;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < len && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse().ok()
}

/// Renders a number the way the display shows it.
///
/// Shortest round-trip digits; plain notation for magnitudes in
/// `[1e-6, 1e21)`, exponential (`1e+21`, `1.5e-7`) outside it. Negative zero
/// renders as `0`; non-finite values render as `NaN`, `Infinity` and
/// `-Infinity`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if value == 0.0 {
        return "0".into();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{value}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return format!("{value}");
    };

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the start of `digits`
    let n = exponent + 1;

    let body = if k <= n && n <= MAX_PLAIN_DIGITS {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= MAX_PLAIN_DIGITS {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if MIN_PLAIN_EXPONENT < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let exp_sign = if e >= 0 { '+' } else { '-' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{exp_sign}{}", e.abs())
        } else {
            format!("{lead}.{rest}e{exp_sign}{}", e.abs())
        }
    };

    format!("{sign}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== parse_float tests =====

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_float("42"), Some(42.0));
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!(parse_float("3.25"), Some(3.25));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("5."), Some(5.0));
        assert_eq!(parse_float("-.5"), Some(-0.5));
        assert_eq!(parse_float("+7"), Some(7.0));
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse_float("1e+21"), Some(1e21));
        assert_eq!(parse_float("1.5e-7"), Some(1.5e-7));
        assert_eq!(parse_float("2E3"), Some(2000.0));
    }

    #[test]
    fn test_parse_dangling_exponent_is_ignored() {
        assert_eq!(parse_float("3e"), Some(3.0));
        assert_eq!(parse_float("3e+"), Some(3.0));
    }

    #[test]
    fn test_parse_trailing_garbage() {
        assert_eq!(parse_float("12abc"), Some(12.0));
        assert_eq!(parse_float("1.2.3"), Some(1.2));
        assert_eq!(parse_float("5+3"), Some(5.0));
    }

    #[test]
    fn test_parse_leading_whitespace() {
        assert_eq!(parse_float("  8"), Some(8.0));
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(parse_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("-"), None);
        assert_eq!(parse_float("."), None);
        assert_eq!(parse_float("-."), None);
        assert_eq!(parse_float("Error"), None);
        assert_eq!(parse_float("NaN"), None);
    }

    // ===== format_number tests =====

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(1024.0), "1024");
        assert_eq!(format_number(-8.0), "-8");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(123.456), "123.456");
        assert_eq!(format_number(200.5), "200.5");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn test_format_shortest_round_trip() {
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_format_large_exponential() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e300), "1.5e+300");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
    }

    #[test]
    fn test_format_small_exponential() {
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_then_parse_preserves_value() {
        for v in [0.1, 1e21, 1.5e-7, -123.456, 2.0f64.powi(60)] {
            assert_eq!(parse_float(&format_number(v)), Some(v));
        }
    }
}
