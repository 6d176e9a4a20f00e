//! Lines: the unit of edit in a QuickStatements batch.

use crate::error::{ConstructionError, FormatError};
use crate::model::builder::ClaimBuilder;
use crate::model::value::validate_language;
use crate::model::{DataType, Identifier, Qualifier, ReferenceBlock, Value};

/// One edit, rendered as a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Create(CreateLine),
    Claim(ClaimLine),
}

impl Line {
    /// Returns the exact textual record for this line.
    ///
    /// Rendering never mutates the line; calling this twice yields
    /// byte-identical output.
    pub fn get_line(&self) -> Result<String, FormatError> {
        crate::codec::encode_line(self)
    }

    /// Returns true if a following `LAST` refers to the entity this line creates.
    pub fn is_create(&self) -> bool {
        matches!(self, Line::Create(_))
    }
}

impl From<CreateLine> for Line {
    fn from(line: CreateLine) -> Self {
        Line::Create(line)
    }
}

impl From<ClaimLine> for Line {
    fn from(line: ClaimLine) -> Self {
        Line::Claim(line)
    }
}

/// Declares a new entity. Carries no subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateLine {
    /// A new item.
    Item,
    /// A new property of the given datatype.
    Property(DataType),
}

/// Subject, predicate and target plus qualifiers and references.
///
/// Immutable once built: use [`ClaimLine::builder`] to assemble one, or
/// [`ClaimLine::into_builder`] to derive an extended copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimLine {
    pub(crate) subject: Identifier,
    pub(crate) predicate: Identifier,
    pub(crate) target: Value,
    pub(crate) qualifiers: Vec<Qualifier>,
    pub(crate) references: Vec<ReferenceBlock>,
}

impl ClaimLine {
    /// Starts building a claim.
    pub fn builder(subject: Identifier, predicate: Identifier, target: impl Into<Value>) -> ClaimBuilder {
        ClaimBuilder::new(subject, predicate, target.into())
    }

    /// A claim with no qualifiers or references.
    pub fn new(
        subject: Identifier,
        predicate: Identifier,
        target: impl Into<Value>,
    ) -> Result<Self, ConstructionError> {
        Self::builder(subject, predicate, target).build()
    }

    /// Sets the label of `subject` in `language` (`Q1|Len|"..."`).
    pub fn label(subject: Identifier, language: &str, text: &str) -> Result<Self, ConstructionError> {
        Self::term('L', subject, language, text)
    }

    /// Sets the description of `subject` in `language` (`Q1|Den|"..."`).
    pub fn description(subject: Identifier, language: &str, text: &str) -> Result<Self, ConstructionError> {
        Self::term('D', subject, language, text)
    }

    /// Adds an alias to `subject` in `language` (`Q1|Aen|"..."`).
    pub fn alias(subject: Identifier, language: &str, text: &str) -> Result<Self, ConstructionError> {
        Self::term('A', subject, language, text)
    }

    fn term(kind: char, subject: Identifier, language: &str, text: &str) -> Result<Self, ConstructionError> {
        validate_language(language)?;
        let predicate = Identifier::from_trusted(format!("{kind}{language}"));
        Self::new(subject, predicate, Value::text(text)?)
    }

    /// Reopens this claim as a builder holding the same parts.
    pub fn into_builder(self) -> ClaimBuilder {
        ClaimBuilder::from_claim(self)
    }

    pub fn subject(&self) -> &Identifier {
        &self.subject
    }

    pub fn predicate(&self) -> &Identifier {
        &self.predicate
    }

    pub fn target(&self) -> &Value {
        &self.target
    }

    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    pub fn references(&self) -> &[ReferenceBlock] {
        &self.references
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn test_term_lines() {
        let label = ClaimLine::label(id("Q42"), "en", "Douglas Adams").unwrap();
        assert_eq!(label.predicate().as_str(), "Len");
        let line = Line::from(label);
        assert_eq!(line.get_line().unwrap(), r#"Q42|Len|"Douglas Adams""#);

        let desc = ClaimLine::description(id("Q42"), "de", "Schriftsteller").unwrap();
        assert_eq!(desc.predicate().as_str(), "Dde");

        let alias = ClaimLine::alias(id("LAST"), "en", "DNA").unwrap();
        assert_eq!(alias.predicate().as_str(), "Aen");
    }

    #[test]
    fn test_term_rejects_bad_language() {
        assert!(matches!(
            ClaimLine::label(id("Q42"), "e n", "x"),
            Err(ConstructionError::Format(FormatError::InvalidLanguage { .. }))
        ));
    }

    #[test]
    fn test_claim_rejects_last_predicate() {
        assert_eq!(
            ClaimLine::new(id("Q1"), Identifier::last(), id("Q5")),
            Err(ConstructionError::LastAsPredicate { role: "claim" })
        );
    }

    #[test]
    fn test_into_builder_extends_copy() {
        let base = ClaimLine::new(id("Q1"), id("P31"), id("Q5")).unwrap();
        let extended = base
            .clone()
            .into_builder()
            .qualifier(Qualifier::new(id("P642"), id("Q2")).unwrap())
            .build()
            .unwrap();
        assert!(base.qualifiers().is_empty());
        assert_eq!(extended.qualifiers().len(), 1);
        assert_eq!(extended.subject(), base.subject());
    }
}
