//! Line encoding: qualifiers, reference blocks, CREATE and claim records.

use crate::codec::value::encode_value;
use crate::error::FormatError;
use crate::model::{ClaimLine, CreateLine, Line, Qualifier, ReferenceBlock};

/// Separates fields within a record.
pub const FIELD_SEPARATOR: &str = "|";

/// Reserved first field of an entity-creation record.
pub const CREATE_MARKER: &str = "CREATE";

/// Prefix on the first snippet predicate of a reference block, opening a new
/// reference group.
pub const REFERENCE_GROUP_MARKER: &str = "!";

/// Encodes a qualifier as `<Predicate>|<token>`.
pub fn encode_qualifier(qualifier: &Qualifier) -> Result<String, FormatError> {
    encode_qualifier_with(qualifier, FIELD_SEPARATOR)
}

fn encode_qualifier_with(qualifier: &Qualifier, sep: &str) -> Result<String, FormatError> {
    Ok(format!(
        "{}{}{}",
        qualifier.predicate(),
        sep,
        encode_value(qualifier.value())?
    ))
}

/// Encodes a reference block as `!S854|"..."|S813|...`.
pub fn encode_reference_block(block: &ReferenceBlock) -> Result<String, FormatError> {
    encode_reference_block_with(block, FIELD_SEPARATOR)
}

fn encode_reference_block_with(block: &ReferenceBlock, sep: &str) -> Result<String, FormatError> {
    let mut fields = Vec::with_capacity(block.snippets().len() * 2);
    for (i, snippet) in block.snippets().iter().enumerate() {
        let predicate = snippet.source_predicate();
        if i == 0 {
            fields.push(format!("{REFERENCE_GROUP_MARKER}{predicate}"));
        } else {
            fields.push(predicate);
        }
        fields.push(encode_value(snippet.value())?);
    }
    Ok(fields.join(sep))
}

/// Encodes a line with the default `|` field separator.
pub fn encode_line(line: &Line) -> Result<String, FormatError> {
    encode_line_with(line, FIELD_SEPARATOR)
}

/// Encodes a line with a caller-chosen field separator.
pub fn encode_line_with(line: &Line, sep: &str) -> Result<String, FormatError> {
    match line {
        Line::Create(create) => Ok(encode_create(create)),
        Line::Claim(claim) => encode_claim(claim, sep),
    }
}

fn encode_create(create: &CreateLine) -> String {
    match create {
        CreateLine::Item => CREATE_MARKER.to_string(),
        CreateLine::Property(data_type) => format!("{},{}", data_type.tag(), CREATE_MARKER),
    }
}

fn encode_claim(claim: &ClaimLine, sep: &str) -> Result<String, FormatError> {
    let mut parts = Vec::with_capacity(3 + claim.qualifiers().len() + claim.references().len());
    parts.push(claim.subject().to_string());
    parts.push(claim.predicate().to_string());
    parts.push(encode_value(claim.target())?);
    for qualifier in claim.qualifiers() {
        parts.push(encode_qualifier_with(qualifier, sep)?);
    }
    for block in claim.references() {
        parts.push(encode_reference_block_with(block, sep)?);
    }
    Ok(parts.join(sep))
}
