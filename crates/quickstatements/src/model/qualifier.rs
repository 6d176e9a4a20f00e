//! Qualifiers and reference blocks attached to claim lines.

use crate::error::{ConstructionError, FormatError};
use crate::model::{Identifier, Time, Value};

/// Property for "start time".
pub const START_TIME: &str = "P580";
/// Property for "end time".
pub const END_TIME: &str = "P582";
/// Source property for "reference URL".
pub const REFERENCE_URL: &str = "S854";
/// Source property for "retrieved".
pub const RETRIEVED: &str = "S813";

fn check_predicate(predicate: &Identifier, role: &'static str) -> Result<(), ConstructionError> {
    if predicate.is_last() {
        return Err(ConstructionError::LastAsPredicate { role });
    }
    Ok(())
}

/// A predicate/value pair refining a claim.
///
/// Qualifiers are emitted in attachment order.
#[derive(Debug, Clone, PartialEq)]
pub struct Qualifier {
    predicate: Identifier,
    value: Value,
}

impl Qualifier {
    pub fn new(predicate: Identifier, value: impl Into<Value>) -> Result<Self, ConstructionError> {
        check_predicate(&predicate, "qualifier")?;
        Ok(Self {
            predicate,
            value: value.into(),
        })
    }

    /// A "start time" (P580) qualifier.
    pub fn start_time(time: Time) -> Self {
        Self {
            predicate: Identifier::from_trusted(START_TIME),
            value: Value::Time(time),
        }
    }

    /// An "end time" (P582) qualifier.
    pub fn end_time(time: Time) -> Self {
        Self {
            predicate: Identifier::from_trusted(END_TIME),
            value: Value::Time(time),
        }
    }

    pub fn predicate(&self) -> &Identifier {
        &self.predicate
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Renders `<Predicate>|<token>`.
    pub fn encode(&self) -> Result<String, FormatError> {
        crate::codec::encode_qualifier(self)
    }
}

/// One predicate/value pair inside a reference block.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSnippet {
    predicate: Identifier,
    value: Value,
}

impl ReferenceSnippet {
    pub fn new(predicate: Identifier, value: impl Into<Value>) -> Result<Self, ConstructionError> {
        check_predicate(&predicate, "reference")?;
        Ok(Self {
            predicate,
            value: value.into(),
        })
    }

    /// A "reference URL" snippet.
    pub fn reference_url(url: &str) -> Result<Self, ConstructionError> {
        Ok(Self {
            predicate: Identifier::from_trusted(REFERENCE_URL),
            value: Value::text(url)?,
        })
    }

    /// A "retrieved" snippet.
    pub fn retrieved(time: Time) -> Self {
        Self {
            predicate: Identifier::from_trusted(RETRIEVED),
            value: Value::Time(time),
        }
    }

    pub fn predicate(&self) -> &Identifier {
        &self.predicate
    }

    /// Returns the predicate in source form (`P854` is written as `S854`).
    pub fn source_predicate(&self) -> String {
        match (self.predicate.as_str().strip_prefix('P'), self.predicate.numeric_part()) {
            (Some(digits), Some(_)) => format!("S{digits}"),
            _ => self.predicate.to_string(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// An ordered, non-empty group of snippets forming one reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceBlock {
    snippets: Vec<ReferenceSnippet>,
}

impl ReferenceBlock {
    pub fn new(snippets: impl IntoIterator<Item = ReferenceSnippet>) -> Result<Self, ConstructionError> {
        let snippets: Vec<_> = snippets.into_iter().collect();
        if snippets.is_empty() {
            return Err(ConstructionError::EmptyReferenceBlock);
        }
        Ok(Self { snippets })
    }

    /// A block holding a single snippet.
    pub fn single(snippet: ReferenceSnippet) -> Self {
        Self {
            snippets: vec![snippet],
        }
    }

    pub fn snippets(&self) -> &[ReferenceSnippet] {
        &self.snippets
    }

    /// Renders the block, starting with the new-group marker.
    pub fn encode(&self) -> Result<String, FormatError> {
        crate::codec::encode_reference_block(self)
    }
}
