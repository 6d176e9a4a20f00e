//! Advisory validation for QuickStatements batches.
//!
//! Encoding only guarantees syntactic correctness. Whether a value fits its
//! property's datatype is the caller's responsibility; applications can use
//! a [`SchemaContext`] to opt in to checking it before submission. Unknown
//! properties are always allowed, and nothing here contacts the knowledge
//! base.

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::model::{Batch, DataType, Identifier, Line, Value};

/// Known property datatypes (advisory).
#[derive(Debug, Clone, Default)]
pub struct SchemaContext {
    properties: HashMap<Identifier, DataType>,
}

impl SchemaContext {
    /// Creates a new empty schema context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property with its expected data type.
    ///
    /// Source-form ids (`S854`) are stored under their property form (`P854`).
    pub fn add_property(&mut self, id: Identifier, data_type: DataType) {
        self.properties.insert(property_key(&id), data_type);
    }

    /// Gets the expected data type for a property, if registered.
    pub fn get_property_type(&self, id: &Identifier) -> Option<DataType> {
        self.properties.get(&property_key(id)).copied()
    }
}

/// Maps `S854` to `P854`; other ids are returned unchanged.
fn property_key(id: &Identifier) -> Identifier {
    match (id.as_str().strip_prefix('S'), id.numeric_part()) {
        (Some(digits), Some(_)) => Identifier::from_trusted(format!("P{digits}")),
        _ => id.clone(),
    }
}

/// Validates every line of a batch.
///
/// Checks that:
/// - `LAST` is not used before the first CREATE line
/// - claim targets, qualifiers and reference snippets fit their registered
///   property datatypes
pub fn validate_batch(batch: &Batch, schema: &SchemaContext) -> Result<(), ValidationError> {
    let mut created = false;
    for (index, line) in batch.lines().iter().enumerate() {
        if line.is_create() {
            created = true;
            continue;
        }
        if !created && uses_last(line) {
            return Err(ValidationError::DanglingLast { line: index });
        }
        validate_line(index, line, schema)?;
    }
    Ok(())
}

/// Validates one line's values against the schema.
pub fn validate_line(index: usize, line: &Line, schema: &SchemaContext) -> Result<(), ValidationError> {
    let Line::Claim(claim) = line else {
        return Ok(());
    };
    check(index, claim.predicate(), claim.target(), schema)?;
    for qualifier in claim.qualifiers() {
        check(index, qualifier.predicate(), qualifier.value(), schema)?;
    }
    for block in claim.references() {
        for snippet in block.snippets() {
            check(index, snippet.predicate(), snippet.value(), schema)?;
        }
    }
    Ok(())
}

fn check(
    line: usize,
    property: &Identifier,
    value: &Value,
    schema: &SchemaContext,
) -> Result<(), ValidationError> {
    if let Some(expected) = schema.get_property_type(property) {
        if !expected.accepts(value) {
            return Err(ValidationError::TypeMismatch {
                line,
                property: property.clone(),
                expected,
            });
        }
    }
    Ok(())
}

fn uses_last(line: &Line) -> bool {
    let Line::Claim(claim) = line else {
        return false;
    };
    let is_last = |value: &Value| matches!(value, Value::Entity(id) if id.is_last());
    claim.subject().is_last()
        || is_last(claim.target())
        || claim.qualifiers().iter().any(|q| is_last(q.value()))
        || claim
            .references()
            .iter()
            .flat_map(|block| block.snippets())
            .any(|s| is_last(s.value()))
}
