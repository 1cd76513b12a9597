//! Numeric parsing for the loosely typed values found in probe data and
//! user options.
//!
//! Probe output and orchestrator options arrive as JSON where the same field
//! may be a number in one file and a string in the next. Nothing here
//! evaluates input as an expression: rationals are split on `/` and each
//! side is parsed as a plain decimal.

use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::OnceLock;

fn leading_int_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").ok()).as_ref()
}

fn leading_float_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").ok())
        .as_ref()
}

/// Render a JSON scalar as the text a user would have typed.
///
/// Returns `None` for `null`. Arrays and objects are rendered as JSON so they
/// fail whatever parse follows instead of silently vanishing.
pub fn value_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// Parse the leading integer of `text`, ignoring anything after it.
///
/// `"1920"`, `" 1920px"` and `"1920.9"` all yield 1920; `"abc"` yields `None`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let caps = leading_int_re()?.captures(text)?;
    caps.get(1)?.as_str().parse::<i64>().ok()
}

/// Parse the leading decimal number of `text`, ignoring anything after it.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let caps = leading_float_re()?.captures(text)?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

/// Evaluate a rate written as `"num/den"` or as a plain decimal.
///
/// Returns `None` when either side is not a number. A zero denominator is
/// not rejected here and yields an infinite or NaN value, so callers must
/// check the result with [`f64::is_finite`].
pub fn parse_rational(text: &str) -> Option<f64> {
    let text = text.trim();
    match text.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            Some(num / den)
        }
        None => text.parse::<f64>().ok(),
    }
}

/// Read a JSON value as a number, accepting numeric strings.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Read a JSON value as a pixel dimension (non-negative whole number).
pub fn value_as_dimension(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return u32::try_from(u).ok();
            }
            let f = n.as_f64()?;
            if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
                Some(f as u32)
            } else {
                None
            }
        }
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}
