//! Coercion of user-typed and persisted amounts into non-negative numbers.

use serde_json::Value;

/// An amount as it arrives from an input field or a persisted record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawAmount<'a> {
    Number(f64),
    Text(&'a str),
}

impl From<f64> for RawAmount<'_> {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl From<i32> for RawAmount<'_> {
    fn from(value: i32) -> Self {
        RawAmount::Number(f64::from(value))
    }
}

impl<'a> From<&'a str> for RawAmount<'a> {
    fn from(value: &'a str) -> Self {
        RawAmount::Text(value)
    }
}

impl<'a> From<&'a String> for RawAmount<'a> {
    fn from(value: &'a String) -> Self {
        RawAmount::Text(value.as_str())
    }
}

impl RawAmount<'_> {
    /// Resolves to a finite, non-negative number. Anything else becomes `0.0`.
    pub fn resolve(self) -> f64 {
        let value = match self {
            RawAmount::Number(value) => value,
            RawAmount::Text(text) => parse_text(text),
        };
        clamp_non_negative(value)
    }

    /// Resolves and rounds to cents, the form every user edit is stored in.
    pub fn to_cents(self) -> f64 {
        round_to_cents(self.resolve())
    }
}

/// Coerces a loosely-typed JSON value (number, numeric string, anything else).
pub fn coerce_amount(value: &Value) -> f64 {
    match value {
        Value::Number(number) => clamp_non_negative(number.as_f64().unwrap_or(0.0)),
        Value::String(text) => RawAmount::Text(text).resolve(),
        _ => 0.0,
    }
}

/// Rounds half away from zero to two decimal places.
///
/// Values whose cent form overflows `f64` collapse to `0.0`, like any other non-finite input.
pub fn round_to_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.is_finite() {
        rounded
    } else {
        0.0
    }
}

/// Keeps digits and a single dot, truncating the fraction to two places.
///
/// `"$1,200.505"` becomes `"1200.50"`; `"12..3"` becomes `"12.3"`.
pub fn sanitize_decimal_input(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();
    let mut parts = filtered.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    match parts.next() {
        Some(rest) => {
            let fraction: String = rest.chars().filter(|ch| *ch != '.').take(2).collect();
            format!("{whole}.{fraction}")
        }
        None => whole.to_string(),
    }
}

fn parse_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return value;
    }
    sanitize_decimal_input(trimmed).parse::<f64>().unwrap_or(0.0)
}

fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
