//! Value encoding for the QuickStatements line format.
//!
//! Each value kind maps to exactly one token grammar:
//!
//! | kind        | token                                   |
//! |-------------|-----------------------------------------|
//! | entity      | `Q42`                                   |
//! | text        | `"escaped text"`                        |
//! | monolingual | `en:"escaped text"`                     |
//! | quantity    | `+1.5~0.1U11573`                        |
//! | time        | `+2021-02-15T00:00:00Z/11`              |
//! | coordinate  | `@52.5200/13.4050`                      |

use crate::error::FormatError;
use crate::model::value::{validate_language, validate_text};
use crate::model::{GlobeCoordinate, Quantity, Time, Value};
use crate::util::datetime::format_timestamp;

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value as its line-format token.
pub fn encode_value(value: &Value) -> Result<String, FormatError> {
    let token = match value {
        Value::Entity(id) => id.to_string(),
        Value::Text(text) => quote_text(text.as_str())?,
        Value::MonolingualText(text) => {
            validate_language(text.language())?;
            format!("{}:{}", text.language(), quote_text(text.text())?)
        }
        Value::Quantity(quantity) => encode_quantity(quantity),
        Value::Time(time) => encode_time(time),
        Value::GlobeCoordinate(coordinate) => encode_coordinate(coordinate),
    };
    check_token(&token)?;
    Ok(token)
}

/// Surrounds text with double quotes, escaping embedded quotes and backslashes.
pub fn quote_text(text: &str) -> Result<String, FormatError> {
    validate_text(text)?;
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    out.push_str(&escape_text(text));
    out.push('"');
    Ok(out)
}

/// Backslash-escapes `"` and `\`.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Reverses [`escape_text`].
pub fn unescape_text(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}

fn encode_quantity(quantity: &Quantity) -> String {
    let mut out = signed_decimal(quantity.amount());
    if let Some(tolerance) = quantity.tolerance() {
        out.push('~');
        out.push_str(&tolerance.to_string());
    }
    if let Some(unit) = quantity.unit() {
        out.push('U');
        // Units are written by their numeric item id (`U11573` for Q11573).
        match (unit.as_str().strip_prefix('Q'), unit.numeric_part()) {
            (Some(digits), Some(_)) => out.push_str(digits),
            _ => out.push_str(unit.as_str()),
        }
    }
    out
}

/// Formats an amount with an explicit sign.
///
/// `f64`'s `Display` yields the shortest representation that round-trips
/// and never switches to exponent notation.
fn signed_decimal(amount: f64) -> String {
    let sign = if amount.is_sign_negative() && amount != 0.0 {
        '-'
    } else {
        '+'
    };
    format!("{}{}", sign, amount.abs())
}

fn encode_time(time: &Time) -> String {
    let (hour, minute, second) = time.time_of_day();
    format!(
        "{}/{}",
        format_timestamp(time.year(), time.month(), time.day(), hour, minute, second),
        time.precision().code()
    )
}

fn encode_coordinate(coordinate: &GlobeCoordinate) -> String {
    let places = coordinate.decimal_places();
    format!(
        "@{}/{}",
        fixed_point(coordinate.latitude(), places),
        fixed_point(coordinate.longitude(), places)
    )
}

fn fixed_point(value: f64, places: usize) -> String {
    let rendered = format!("{:.*}", places, value);
    // Small negatives can round to "-0.00"; drop the sign.
    match rendered.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => rendered,
    }
}

/// Fails if a token would break the field or record structure.
pub(crate) fn check_token(token: &str) -> Result<(), FormatError> {
    for c in token.chars() {
        match c {
            '\n' | '\r' => return Err(FormatError::RawNewline),
            '|' | '\t' => {
                return Err(FormatError::ReservedCharacter {
                    context: "token",
                    char: c,
                });
            }
            _ => {}
        }
    }
    Ok(())
}
