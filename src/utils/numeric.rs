// src/utils/numeric.rs
//! Lenient numeric parsing
//!
//! ckpool reports hashrates as strings with a unit suffix (`"12.5T"`) and
//! mixes JSON numbers with numeric strings elsewhere. These helpers take the
//! longest numeric prefix and ignore whatever follows it. The formatting
//! helpers produce the same text a browser would for the same numbers.

use serde_json::Value;

/// Parses the longest leading float in `input`, ignoring leading whitespace
/// and any trailing characters.
///
/// Returns `None` when no digits are found or the result is not finite.
pub fn parse_leading_f64(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
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

    // Exponent only counts when at least one digit follows it.
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

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads a JSON number or numeric string as `f64`
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_f64(s),
        _ => None,
    }
}

/// Renders a scalar JSON value as plain text (strings without quotes)
///
/// Returns `None` for `null` and missing values.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Digits checked past the requested precision when looking for an exact tie
const TIE_DIGITS: usize = 30;

/// Formats `value` with `decimals` fixed decimals, breaking exact ties away
/// from zero
///
/// `format!("{:.N}")` rounds an exactly representable midpoint such as
/// `0.0625` to even (`"0.062"`); this rounds it up (`"0.063"`). Values that
/// are not exact midpoints format identically.
///
/// # Arguments
/// * `value` - Number to format
/// * `decimals` - Digits after the decimal point
///
/// # Returns
/// The fixed-point text, or the plain rendering for NaN and infinities
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    let wide = format!("{:.*}", decimals + TIE_DIGITS, magnitude);
    let (head, tail) = wide.split_at(wide.len() - TIE_DIGITS);
    let tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if !tie {
        return format!("{}{:.*}", sign, decimals, magnitude);
    }

    let kept = head.strip_suffix('.').unwrap_or(head);
    format!("{}{}", sign, increment_last_digit(kept))
}

fn increment_last_digit(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut i = bytes.len();
    loop {
        if i == 0 {
            bytes.insert(0, b'1');
            break;
        }
        i -= 1;
        match bytes[i] {
            b'.' => continue,
            b'9' => bytes[i] = b'0',
            d => {
                bytes[i] = d + 1;
                break;
            }
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Shortest text that reads back as `value`
///
/// Plain decimals between `1e-6` and `1e21`, exponent notation outside that
/// range (`"1e-7"`, `"1.5e+21"`), matching how a browser stringifies numbers.
pub fn number_text(value: f64) -> String {
    if value == 0.0 {
        // also covers -0
        return "0".to_string();
    }
    if !value.is_finite() || (1e-6..1e21).contains(&value.abs()) {
        return value.to_string();
    }
    let exp = format!("{:e}", value);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}
