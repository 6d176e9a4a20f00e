//! Data model types for QuickStatements.
//!
//! This module contains all the core types for describing edits:
//! - Identifiers (items, properties, `LAST`)
//! - Values (typed claim targets)
//! - Qualifiers and reference blocks
//! - Lines (CREATE and claim records)
//! - Batches (ordered lines)
//! - Builders (ergonomic construction)

pub mod batch;
pub mod builder;
pub mod id;
pub mod line;
pub mod qualifier;
pub mod value;

pub use batch::Batch;
pub use builder::{BatchBuilder, ClaimBuilder};
pub use id::{Identifier, LAST};
pub use line::{ClaimLine, CreateLine, Line};
pub use qualifier::{Qualifier, ReferenceBlock, ReferenceSnippet};
pub use value::{
    DataType, GlobeCoordinate, MonolingualText, Quantity, Text, Time, TimePrecision, Value,
};
