//! Utility modules for QuickStatements.

pub mod datetime;

pub use datetime::{
    days_in_month, format_timestamp, is_leap_year, parse_timestamp, validate_calendar,
    ParsedTimestamp,
};
