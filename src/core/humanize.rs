//! Human readable rendering of durations, timestamps and numbers, and the
//! string escaping rules shared by the formatters.

use crate::core::attribute::Value;
use crate::core::error::{Result, SlogError};
use chrono::{DateTime, Utc};
use std::fmt::Write;

const NANOS_PER_MINUTE: i64 = 60_000_000_000;

/// Append `value` through its `Display` implementation.
#[inline]
pub(crate) fn push_display(buffer: &mut String, value: impl std::fmt::Display) {
    // Writing into a String cannot fail.
    let _ = write!(buffer, "{}", value);
}

/// Shortest round-trip rendering, picking plain or scientific notation,
/// whichever is shorter. Exponents carry a sign and at least two digits.
///
/// ```
/// let mut out = String::new();
/// slogpp::core::humanize::format_float(1e-9, &mut out);
/// assert_eq!(out, "1e-09");
/// ```
pub fn format_float(value: f64, buffer: &mut String) {
    if value.is_nan() {
        buffer.push_str("nan");
        return;
    }
    if value.is_infinite() {
        buffer.push_str(if value < 0.0 { "-inf" } else { "inf" });
        return;
    }

    let plain = value.to_string();
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    // mantissa + 'e' + sign + digits
    let digits = exponent.unsigned_abs().to_string();
    let scientific_len = mantissa.len() + 2 + digits.len().max(2);

    if scientific_len < plain.len() {
        buffer.push_str(mantissa);
        buffer.push('e');
        buffer.push(if exponent < 0 { '-' } else { '+' });
        if digits.len() < 2 {
            buffer.push('0');
        }
        buffer.push_str(&digits);
    } else {
        buffer.push_str(&plain);
    }
}

pub fn format_int(value: i64, buffer: &mut String) {
    push_display(buffer, value);
}

/// Go-style duration rendering of signed nanoseconds: `0s`, `1.1µs`,
/// `4m5.001s`, `5h6m7.001s`.
pub fn format_duration(nanos: i64, buffer: &mut String) {
    if nanos == 0 {
        buffer.push_str("0s");
        return;
    }
    if nanos < 0 {
        buffer.push('-');
    }
    // i64::MIN has no positive counterpart in i64
    let abs = nanos.unsigned_abs();

    if abs < 1_000 {
        push_display(buffer, abs);
        buffer.push_str("ns");
    } else if abs < 1_000_000 {
        format_float(abs as f64 / 1e3, buffer);
        buffer.push_str("µs");
    } else if abs < 1_000_000_000 {
        format_float(abs as f64 / 1e6, buffer);
        buffer.push_str("ms");
    } else {
        let per_minute = NANOS_PER_MINUTE as u64;
        let minutes = abs / per_minute;
        if minutes == 0 {
            format_float(abs as f64 / 1e9, buffer);
            buffer.push('s');
            return;
        }

        let seconds = (abs % per_minute) as f64 / 1e9;
        let hours = minutes / 60;
        if hours > 0 {
            push_display(buffer, hours);
            buffer.push('h');
        }
        push_display(buffer, minutes % 60);
        buffer.push('m');
        format_float(seconds, buffer);
        buffer.push('s');
    }
}

/// `YYYY-MM-DDTHH:MM:SS.fffZ` with a fraction of 3, 6 or 9 digits, the
/// shortest that represents the sub-second part exactly.
pub fn format_timestamp(timestamp: &DateTime<Utc>, buffer: &mut String) {
    push_display(buffer, timestamp.format("%Y-%m-%dT%H:%M:%S"));
    buffer.push('.');

    // leap seconds are reported past 1e9 by chrono
    let nanos = timestamp.timestamp_subsec_nanos() % 1_000_000_000;
    let (fraction, width) = if nanos % 1_000_000 == 0 {
        (nanos / 1_000_000, 3)
    } else if nanos % 1_000 == 0 {
        (nanos / 1_000, 6)
    } else {
        (nanos, 9)
    };
    // below 1e9 nanoseconds every fraction fits its width
    let fitted = format_fixed_width(i64::from(fraction), width, buffer);
    debug_assert!(fitted.is_ok(), "{:?}", fitted);
    buffer.push('Z');
}

/// Zero-padded `value` on exactly `width` characters.
///
/// Fails when `value` is negative or needs more than `width` digits.
pub fn format_fixed_width(value: i64, width: usize, buffer: &mut String) -> Result<()> {
    if value < 0 {
        return Err(SlogError::invalid_argument(format!(
            "negative value {} cannot be printed on a fixed width",
            value
        )));
    }
    let digits = value.checked_ilog10().map_or(1, |log| log as usize + 1);
    if digits > width {
        return Err(SlogError::invalid_argument(format!(
            "value {} does not fit in {} characters",
            value, width
        )));
    }
    let _ = write!(buffer, "{:0width$}", value, width = width);
    Ok(())
}

#[inline]
fn needs_json_escaping(value: &str) -> bool {
    value
        .bytes()
        .any(|b| b == b'"' || b == b'\\' || b < 0x20 || b >= 0x7f)
}

/// Quoted JSON string. Control characters and everything from `0x7f` up
/// are written as `\uXXXX` UTF-16 units.
pub fn json_escape(value: &str, buffer: &mut String) {
    buffer.reserve(value.len() + 2);
    buffer.push('"');
    if !needs_json_escaping(value) {
        buffer.push_str(value);
        buffer.push('"');
        return;
    }

    for ch in value.chars() {
        match ch {
            '"' => buffer.push_str("\\\""),
            '\\' => buffer.push_str("\\\\"),
            '\u{8}' => buffer.push_str("\\b"),
            '\u{c}' => buffer.push_str("\\f"),
            '\n' => buffer.push_str("\\n"),
            '\r' => buffer.push_str("\\r"),
            '\t' => buffer.push_str("\\t"),
            c if (c as u32) < 0x20 || (c as u32) >= 0x7f => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(buffer, "\\u{:04x}", unit);
                }
            }
            c => buffer.push(c),
        }
    }
    buffer.push('"');
}

#[inline]
fn is_text_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Text rendering of a string: quoted when it contains whitespace, with
/// unescaped double quotes escaped.
pub fn text_escape(value: &str, buffer: &mut String) {
    let quoted = value.chars().any(is_text_space);
    if quoted {
        buffer.push('"');
    }
    let mut previous = '\0';
    for ch in value.chars() {
        if ch == '"' && previous != '\\' {
            buffer.push('\\');
        }
        buffer.push(ch);
        previous = ch;
    }
    if quoted {
        buffer.push('"');
    }
}

/// Unquoted text rendering of a scalar value. Groups render their children
/// space separated as `key=value`.
pub(crate) fn value_to_string(value: &Value, buffer: &mut String) {
    match value {
        Value::Bool(v) => buffer.push_str(if *v { "true" } else { "false" }),
        Value::Int(v) => format_int(*v, buffer),
        Value::Float(v) => format_float(*v, buffer),
        Value::String(v) => buffer.push_str(v),
        Value::Duration(v) => format_duration(*v, buffer),
        Value::Time(v) => format_timestamp(v, buffer),
        Value::Group(children) => {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    buffer.push(' ');
                }
                buffer.push_str(&child.key);
                buffer.push('=');
                value_to_string(&child.value, buffer);
            }
        }
    }
}
