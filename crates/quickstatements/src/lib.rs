//! QuickStatements V1: typed builder and serializer for knowledge-base edit batches.
//!
//! This crate turns structured statement objects (subjects, predicates,
//! targets, qualifiers, references) into the exact line format the
//! QuickStatements service accepts.
//!
//! # Overview
//!
//! - **Values** validate at construction, so every existing value encodes
//! - **Lines** are immutable once built; attachment order is preserved
//! - **Batches** render deterministically, one record per line
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use quickstatements::{ClaimLine, Identifier, Line, Qualifier, Time, TimePrecision, Value};
//!
//! let id = |s: &str| Identifier::new(s).unwrap();
//!
//! let start = NaiveDate::from_ymd_opt(2021, 2, 15).unwrap();
//! let line: Line = ClaimLine::builder(id("Q47475003"), id("P108"), id("Q49121"))
//!     .qualifier(Qualifier::new(id("S854"), Value::text("https://orcid.org/0000-0003-4423-4370").unwrap()).unwrap())
//!     .qualifier(Qualifier::start_time(Time::from_date(start, TimePrecision::Day)))
//!     .qualifier(Qualifier::new(id("P39"), id("Q1706722")).unwrap())
//!     .build()
//!     .unwrap()
//!     .into();
//!
//! assert_eq!(
//!     line.get_line().unwrap(),
//!     r#"Q47475003|P108|Q49121|S854|"https://orcid.org/0000-0003-4423-4370"|P580|+2021-02-15T00:00:00Z/11|P39|Q1706722"#,
//! );
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Identifier, Value, Qualifier, Line, Batch)
//! - [`codec`]: Token, line, and payload encoding
//! - [`validate`]: Advisory datatype and `LAST` checks
//! - [`client`]: Configuration, credentials, and the transport seam
//! - [`error`]: Error types
//!
//! # Wire Format
//!
//! ```text
//! CREATE
//! external-id,CREATE
//! Q42|P31|Q5|P580|+2001-01-01T00:00:00Z/9|!S854|"https://example.org"
//! ```

pub mod client;
pub mod codec;
pub mod error;
pub mod model;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use client::{BatchResult, Client, ClientConfig, Credentials, CredentialsProvider, Submission, Transport};
pub use codec::{compose, encode_line, encode_value, render_lines, RenderOptions};
pub use error::{ConfigError, ConstructionError, Error, FormatError, TransportError, ValidationError};
pub use model::{
    Batch, BatchBuilder, ClaimBuilder, ClaimLine, CreateLine, DataType, GlobeCoordinate, Identifier,
    Line, MonolingualText, Qualifier, Quantity, ReferenceBlock, ReferenceSnippet, Text, Time,
    TimePrecision, Value, LAST,
};
pub use validate::{validate_batch, validate_line, SchemaContext};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Line-format version this crate emits.
pub const FORMAT_VERSION: &str = "v1";
