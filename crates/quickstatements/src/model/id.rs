//! Opaque identifiers for entities and properties.
//!
//! QuickStatements addresses items (`Q42`), properties (`P31`), source
//! properties (`S854`), term slots (`Len`, `Dde`), and the `LAST` sentinel
//! all through the same field type. Only the shape is checked here: the
//! identifier must be non-empty and must not contain whitespace or any of
//! the characters the line format reserves.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// The sentinel subject/target meaning "the entity created by the
/// immediately preceding CREATE line".
pub const LAST: &str = "LAST";

/// Characters that delimit fields or tokens in the line format.
pub(crate) const RESERVED_CHARS: [char; 2] = ['|', '"'];

/// A non-empty, whitespace-free identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Creates an identifier after checking its shape.
    pub fn new(value: impl Into<String>) -> Result<Self, FormatError> {
        let value = value.into();
        validate_identifier(&value)?;
        Ok(Self(value))
    }

    /// Returns the `LAST` sentinel.
    pub fn last() -> Self {
        Self(LAST.to_string())
    }

    /// Wraps a value already known to be a well-formed identifier.
    pub(crate) fn from_trusted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns true if this is the `LAST` sentinel.
    pub fn is_last(&self) -> bool {
        self.0 == LAST
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric part of a prefixed identifier (`Q11573` -> `11573`).
    ///
    /// Returns `None` if the identifier is not a single letter followed by digits.
    pub fn numeric_part(&self) -> Option<&str> {
        let mut chars = self.0.chars();
        let first = chars.next()?;
        let rest = chars.as_str();
        if first.is_ascii_alphabetic() && !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            Some(rest)
        } else {
            None
        }
    }
}

fn validate_identifier(value: &str) -> Result<(), FormatError> {
    if value.is_empty() {
        return Err(FormatError::EmptyIdentifier);
    }
    if let Some(c) = value
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || RESERVED_CHARS.contains(c))
    {
        return Err(FormatError::InvalidIdentifierChar {
            value: value.to_string(),
            char: c,
        });
    }
    Ok(())
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Identifier {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::new(s)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = FormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Identifier::new(value)
    }
}

impl TryFrom<String> for Identifier {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Identifier::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(Identifier::new("Q42").is_ok());
        assert!(Identifier::new("P31").is_ok());
        assert!(Identifier::new("S854").is_ok());
        assert!(Identifier::new("Len").is_ok());
        assert!(Identifier::new(LAST).unwrap().is_last());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert_eq!(Identifier::new(""), Err(FormatError::EmptyIdentifier));
        assert!(matches!(
            Identifier::new("Q 42"),
            Err(FormatError::InvalidIdentifierChar { char: ' ', .. })
        ));
        assert!(matches!(
            Identifier::new("Q42\n"),
            Err(FormatError::InvalidIdentifierChar { char: '\n', .. })
        ));
        assert!(matches!(
            Identifier::new("Q4|2"),
            Err(FormatError::InvalidIdentifierChar { char: '|', .. })
        ));
    }

    #[test]
    fn test_numeric_part() {
        assert_eq!(Identifier::new("Q11573").unwrap().numeric_part(), Some("11573"));
        assert_eq!(Identifier::new("P31").unwrap().numeric_part(), Some("31"));
        assert_eq!(Identifier::new("LAST").unwrap().numeric_part(), None);
        assert_eq!(Identifier::new("Q").unwrap().numeric_part(), None);
    }

    #[test]
    fn test_parse() {
        let id: Identifier = "Q5".parse().unwrap();
        assert_eq!(id.as_str(), "Q5");
        assert_eq!(id.to_string(), "Q5");
        assert!("".parse::<Identifier>().is_err());
    }
}
