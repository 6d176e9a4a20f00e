//! Calendar helpers and the QuickStatements timestamp grammar.
//!
//! Timestamps look like `+YYYY-MM-DDTHH:MM:SSZ/P` where the sign is always
//! explicit, the year has at least four digits, and `P` is a precision code.

use crate::error::FormatError;

/// Returns true if the given (proleptic Gregorian) year is a leap year.
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in a given month (1-indexed).
pub fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Checks that month, day and time-of-day fields form a valid calendar point.
pub fn validate_calendar(
    year: i64,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<(), FormatError> {
    let invalid = |field, value| FormatError::InvalidCalendarField {
        field,
        value,
        year,
        month,
    };
    if !(1..=12).contains(&month) {
        return Err(invalid("month", month));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(invalid("day", day));
    }
    if hour > 23 {
        return Err(invalid("hour", hour));
    }
    if minute > 59 {
        return Err(invalid("minute", minute));
    }
    if second > 59 {
        return Err(invalid("second", second));
    }
    Ok(())
}

/// Formats calendar fields as a sign-prefixed timestamp without precision.
pub fn format_timestamp(
    year: i64,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> String {
    let sign = if year < 0 { '-' } else { '+' };
    format!(
        "{}{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        sign,
        year.unsigned_abs(),
        month,
        day,
        hour,
        minute,
        second
    )
}

/// Fields recovered from a timestamp token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimestamp {
    pub year: i64,
    /// 0 when the token leaves the month unspecified.
    pub month: u32,
    /// 0 when the token leaves the day unspecified.
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub precision: u8,
}

/// Parses a `+YYYY-MM-DDTHH:MM:SSZ/P` token.
///
/// Month and day may be `00`, the legacy spelling for "unspecified" used
/// with coarse precisions. Range checks on the remaining fields are left to
/// the caller, which knows the precision semantics.
pub fn parse_timestamp(token: &str) -> Result<ParsedTimestamp, FormatError> {
    let malformed = |reason| FormatError::MalformedTimestamp {
        value: token.to_string(),
        reason,
    };

    let (sign, rest) = match token.as_bytes().first() {
        Some(b'+') => (1i64, &token[1..]),
        Some(b'-') => (-1i64, &token[1..]),
        _ => return Err(malformed("missing sign")),
    };

    let (stamp, precision) = rest
        .split_once('/')
        .ok_or_else(|| malformed("missing precision"))?;
    let precision: u8 = precision
        .parse()
        .map_err(|_| malformed("precision is not a number"))?;

    let stamp = stamp
        .strip_suffix('Z')
        .ok_or_else(|| malformed("missing Z suffix"))?;
    let (date, time) = stamp
        .split_once('T')
        .ok_or_else(|| malformed("missing T separator"))?;

    // The year may be wider than four digits, so split from the right.
    let mut date_fields = date.rsplitn(3, '-');
    let day = date_fields.next().ok_or_else(|| malformed("missing day"))?;
    let month = date_fields.next().ok_or_else(|| malformed("missing month"))?;
    let year = date_fields.next().ok_or_else(|| malformed("missing year"))?;
    if year.len() < 4 || month.len() != 2 || day.len() != 2 {
        return Err(malformed("bad date field width"));
    }

    let mut time_fields = time.split(':');
    let (Some(hour), Some(minute), Some(second), None) = (
        time_fields.next(),
        time_fields.next(),
        time_fields.next(),
        time_fields.next(),
    ) else {
        return Err(malformed("time must be HH:MM:SS"));
    };
    if hour.len() != 2 || minute.len() != 2 || second.len() != 2 {
        return Err(malformed("bad time field width"));
    }

    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if ![year, month, day, hour, minute, second].into_iter().all(digits) {
        return Err(malformed("non-digit in numeric field"));
    }

    let year: i64 = year.parse().map_err(|_| malformed("year out of range"))?;
    // Fields are short digit strings at this point.
    let field = |s: &str| s.parse::<u32>().unwrap_or_default();

    Ok(ParsedTimestamp {
        year: sign * year,
        month: field(month),
        day: field(day),
        hour: field(hour),
        minute: field(minute),
        second: field(second),
        precision,
    })
}
