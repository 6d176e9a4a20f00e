//! Builder API for ergonomic claim and batch construction.
//!
//! # Example
//!
//! ```rust
//! use quickstatements::model::builder::BatchBuilder;
//! use quickstatements::{Identifier, Qualifier, Time, TimePrecision};
//!
//! let id = |s: &str| Identifier::new(s).unwrap();
//!
//! let batch = BatchBuilder::new("Add employment")
//!     .create_item()
//!     .claim(id("LAST"), id("P31"), id("Q5"), |c| c)
//!     .claim(id("Q47475003"), id("P108"), id("Q49121"), |c| c
//!         .qualifier(Qualifier::start_time(
//!             Time::new(2021, 2, 15, TimePrecision::Day).unwrap(),
//!         ))
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(batch.len(), 3);
//! ```

use crate::error::ConstructionError;
use crate::model::{
    Batch, ClaimLine, CreateLine, DataType, Identifier, Line, Qualifier, ReferenceBlock, Value,
};

/// Builder for a [`ClaimLine`].
///
/// Attachments are kept in call order; that order is reproduced verbatim
/// in the rendered line.
#[derive(Debug, Clone)]
pub struct ClaimBuilder {
    subject: Identifier,
    predicate: Identifier,
    target: Value,
    qualifiers: Vec<Qualifier>,
    references: Vec<ReferenceBlock>,
}

impl ClaimBuilder {
    /// Creates a builder for the given subject, predicate and target.
    pub fn new(subject: Identifier, predicate: Identifier, target: Value) -> Self {
        Self {
            subject,
            predicate,
            target,
            qualifiers: Vec::new(),
            references: Vec::new(),
        }
    }

    pub(crate) fn from_claim(claim: ClaimLine) -> Self {
        Self {
            subject: claim.subject,
            predicate: claim.predicate,
            target: claim.target,
            qualifiers: claim.qualifiers,
            references: claim.references,
        }
    }

    /// Appends a qualifier.
    pub fn qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    /// Appends several qualifiers in order.
    pub fn qualifiers(mut self, qualifiers: impl IntoIterator<Item = Qualifier>) -> Self {
        self.qualifiers.extend(qualifiers);
        self
    }

    /// Appends a reference block.
    pub fn reference(mut self, block: ReferenceBlock) -> Self {
        self.references.push(block);
        self
    }

    /// Returns the number of qualifiers added so far.
    pub fn qualifier_count(&self) -> usize {
        self.qualifiers.len()
    }

    /// Builds the immutable claim.
    pub fn build(self) -> Result<ClaimLine, ConstructionError> {
        if self.predicate.is_last() {
            return Err(ConstructionError::LastAsPredicate { role: "claim" });
        }
        Ok(ClaimLine {
            subject: self.subject,
            predicate: self.predicate,
            target: self.target,
            qualifiers: self.qualifiers,
            references: self.references,
        })
    }
}

/// Builder for a [`Batch`].
///
/// Lines are append-only. The first construction error encountered is
/// reported by [`build`](BatchBuilder::build); later lines are still
/// collected but the batch is never produced.
#[derive(Debug, Clone)]
pub struct BatchBuilder {
    name: String,
    lines: Vec<Line>,
    error: Option<ConstructionError>,
}

impl BatchBuilder {
    /// Creates a new builder for a batch with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
            error: None,
        }
    }

    /// Sets the batch name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // =========================================================================
    // Creation lines
    // =========================================================================

    /// Adds a CREATE line for a new item.
    pub fn create_item(mut self) -> Self {
        self.lines.push(Line::Create(CreateLine::Item));
        self
    }

    /// Adds a CREATE line for a new property.
    pub fn create_property(mut self, data_type: DataType) -> Self {
        self.lines.push(Line::Create(CreateLine::Property(data_type)));
        self
    }

    // =========================================================================
    // Claim lines
    // =========================================================================

    /// Adds a claim line assembled by a builder function.
    pub fn claim<F>(mut self, subject: Identifier, predicate: Identifier, target: impl Into<Value>, f: F) -> Self
    where
        F: FnOnce(ClaimBuilder) -> ClaimBuilder,
    {
        let builder = f(ClaimBuilder::new(subject, predicate, target.into()));
        match builder.build() {
            Ok(claim) => self.lines.push(Line::Claim(claim)),
            Err(err) => self.record(err),
        }
        self
    }

    /// Adds the result of a fallible line construction (e.g. [`ClaimLine::label`]).
    pub fn try_line(mut self, line: Result<impl Into<Line>, ConstructionError>) -> Self {
        match line {
            Ok(line) => self.lines.push(line.into()),
            Err(err) => self.record(err),
        }
        self
    }

    // =========================================================================
    // Raw lines
    // =========================================================================

    /// Adds a line directly.
    pub fn line(mut self, line: impl Into<Line>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Adds multiple lines.
    pub fn lines(mut self, lines: impl IntoIterator<Item = Line>) -> Self {
        self.lines.extend(lines);
        self
    }

    fn record(&mut self, err: ConstructionError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Builds the final batch.
    pub fn build(self) -> Result<Batch, ConstructionError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Batch::new(self.name, self.lines)),
        }
    }

    /// Returns the number of lines added so far.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn test_claim_builder_preserves_order() {
        let claim = ClaimBuilder::new(id("Q1"), id("P31"), Value::from(id("Q5")))
            .qualifier(Qualifier::new(id("P1"), id("Q10")).unwrap())
            .qualifiers([
                Qualifier::new(id("P2"), id("Q20")).unwrap(),
                Qualifier::new(id("P3"), id("Q30")).unwrap(),
            ])
            .build()
            .unwrap();
        let predicates: Vec<_> = claim.qualifiers().iter().map(|q| q.predicate().as_str()).collect();
        assert_eq!(predicates, ["P1", "P2", "P3"]);
    }

    #[test]
    fn test_batch_builder() {
        let batch = BatchBuilder::new("draft")
            .name("final")
            .create_item()
            .create_property(DataType::ExternalId)
            .claim(id("LAST"), id("P31"), id("Q5"), |c| c)
            .try_line(ClaimLine::label(id("LAST"), "en", "someone"))
            .build()
            .unwrap();
        assert_eq!(batch.name(), "final");
        assert_eq!(batch.len(), 4);
        assert!(batch.lines()[0].is_create());
    }

    #[test]
    fn test_batch_builder_reports_first_error() {
        let result = BatchBuilder::new("broken")
            .claim(id("Q1"), Identifier::last(), id("Q5"), |c| c)
            .try_line(ClaimLine::label(id("Q1"), "", "x"))
            .build();
        assert_eq!(result, Err(ConstructionError::LastAsPredicate { role: "claim" }));
    }
}
