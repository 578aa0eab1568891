use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

// Past this a `Decimal` either overflows or rounds to zero.
const MAX_DECIMAL_EXPONENT: i64 = 56;

pub fn ser_to_str<T: Serialize>(t: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(t)
}

/// Full HTTP/1.1 response text for a status line and a JSON body.
pub fn http_response(status_line: &str, content: &str) -> String {
    format!(
        "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        content.len(),
        content
    )
}

/// Token following `Bearer ` in the `authorization` header.
pub fn extract_token(headers: &HashMap<String, String>) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-01-20T14:22:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Longest decimal literal at the start of `input`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, and an optional exponent.
/// Trailing garbage is ignored: `"12.5kg"` gives `"12.5"`. The literal comes back
/// normalized (`".5"` as `"0.5"`, `"+7"` as `"7"`). `None` when no digits lead the string.
pub fn leading_number(input: &str) -> Option<String> {
    let bytes = input.trim_start().as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut at = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            at = 1;
            true
        }
        Some(b'+') => {
            at = 1;
            false
        }
        _ => false,
    };

    let int_end = digits_from(at);
    let int_part = &bytes[at..int_end];
    at = int_end;

    let mut frac_part: &[u8] = &[];
    if bytes.get(at) == Some(&b'.') {
        let frac_end = digits_from(at + 1);
        frac_part = &bytes[at + 1..frac_end];
        if !int_part.is_empty() || !frac_part.is_empty() {
            at = frac_end;
        }
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exponent: &[u8] = &[];
    if matches!(bytes.get(at), Some(b'e' | b'E')) {
        let mut exp_at = at + 1;
        if matches!(bytes.get(exp_at), Some(b'-' | b'+')) {
            exp_at += 1;
        }
        let exp_end = digits_from(exp_at);
        if exp_end > exp_at {
            exponent = &bytes[at + 1..exp_end];
        }
    }

    // Only ASCII digits and signs were sliced out above.
    let ascii = |part: &[u8]| String::from_utf8_lossy(part).into_owned();
    let mut literal = String::new();
    if negative {
        literal.push('-');
    }
    if int_part.is_empty() {
        literal.push('0');
    } else {
        literal.push_str(&ascii(int_part));
    }
    if !frac_part.is_empty() {
        literal.push('.');
        literal.push_str(&ascii(frac_part));
    }
    if !exponent.is_empty() {
        literal.push('e');
        literal.push_str(ascii(exponent).trim_start_matches('+'));
    }
    Some(literal)
}

/// Exact `Decimal` for a literal produced by [`leading_number`].
///
/// `None` when the value overflows a `Decimal`. Digits past the 28th decimal place do not
/// survive, so a tiny value comes back as zero or `None`.
pub fn decimal_from_literal(literal: &str) -> Option<Decimal> {
    let (mantissa, exponent) = match literal.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (literal, 0),
    };
    if exponent.abs() > MAX_DECIMAL_EXPONENT {
        return None;
    }

    let (sign, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = format!("{}{}", int_part, frac_part);

    // Shift the decimal point in the text rather than multiplying.
    let point = int_part.len() as i64 + exponent;
    let plain = if point <= 0 {
        format!("{}0.{}{}", sign, "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point as usize >= digits.len() {
        format!("{}{}{}", sign, digits, "0".repeat(point as usize - digits.len()))
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{}{}.{}", sign, whole, fraction)
    };
    Decimal::from_str(&plain).ok()
}
