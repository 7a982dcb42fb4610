//! Display formatting and parsing.
//!
//! Every string the engine shows passes through here, so `parse_display`
//! can assume it only ever sees grouped decimals or [`ERROR_TOKEN`].

/// Shown in place of a result that cannot be computed.
pub const ERROR_TOKEN: &str = "Error";

const SEPARATOR: char = ',';

/// Format a value for the display: integers without decimals, everything
/// else in the shortest form that reads back to the same `f64`, then
/// comma-grouped.
pub fn format_number(n: f64) -> String {
    // -0.0 would render as "-0"
    let n = if n == 0.0 { 0.0 } else { n };
    let raw = if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    };
    group_thousands(&raw)
}

/// Format text the user is still typing.
///
/// The digits are regrouped as they are, never round-tripped through `f64`:
/// a fraction keeps its trailing zeros (`1.0`, `2.50`) and integers wider
/// than an `f64` mantissa keep every digit. Leading zeros are dropped and a
/// bare `-0` reads as `0`.
pub fn format_entry(raw: &str) -> String {
    if raw.contains('.') {
        return group_thousands(raw);
    }
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    match digits.trim_start_matches('0') {
        "" => "0".to_string(),
        digits => group_thousands(&format!("{sign}{digits}")),
    }
}

/// Insert separators into the integer part of an unformatted number.
pub fn group_thousands(raw: &str) -> String {
    let (sign, body) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (int_part, fraction) = body.split_at(body.find('.').unwrap_or(body.len()));

    let mut out = String::with_capacity(raw.len() + int_part.len() / 3);
    out.push_str(sign);
    let len = int_part.chars().count();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(SEPARATOR);
        }
        out.push(c);
    }
    out.push_str(fraction);
    out
}

/// Display text without separators or surrounding whitespace.
pub fn strip_separators(text: &str) -> String {
    text.trim().chars().filter(|&c| c != SEPARATOR).collect()
}

/// Read the display back as a number. The error token and anything
/// unparsable or non-finite read as 0.
pub fn parse_display(text: &str) -> f64 {
    let raw = strip_separators(text);
    if raw == ERROR_TOKEN {
        return 0.0;
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Number of decimal digits in the text, ignoring sign, point and separators.
pub fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}
