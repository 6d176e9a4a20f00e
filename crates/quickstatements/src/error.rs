//! Error types for QuickStatements encoding, construction, and submission.

use thiserror::Error;

use crate::model::{DataType, Identifier};

/// Error raised when a value cannot be rendered as a line-format token.
///
/// Format errors are always surfaced at construction or encode time; no
/// partial output is ever produced alongside one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("[Q101] identifier is empty")]
    EmptyIdentifier,

    #[error("[Q102] identifier {value:?} contains invalid character {char:?}")]
    InvalidIdentifierChar { value: String, char: char },

    #[error("[Q103] text contains a raw line break")]
    RawNewline,

    #[error("[Q104] {context} contains reserved character {char:?}")]
    ReservedCharacter { context: &'static str, char: char },

    #[error("[Q105] invalid language code {code:?}")]
    InvalidLanguage { code: String },

    #[error("[Q106] precision code {code} out of range [0, 14]")]
    InvalidPrecision { code: u8 },

    #[error("[Q107] {field} is not a finite number")]
    NonFiniteNumber { field: &'static str },

    #[error("[Q108] latitude {lat} out of range [-90, +90]")]
    LatitudeOutOfRange { lat: f64 },

    #[error("[Q109] longitude {lon} out of range [-180, +180]")]
    LongitudeOutOfRange { lon: f64 },

    #[error("[Q110] coordinate precision {precision} must be positive")]
    InvalidCoordinatePrecision { precision: f64 },

    #[error("[Q111] invalid {field} {value} for {year:04}-{month:02}")]
    InvalidCalendarField {
        field: &'static str,
        value: u32,
        year: i64,
        month: u32,
    },

    #[error("[Q112] malformed timestamp {value:?}: {reason}")]
    MalformedTimestamp { value: String, reason: &'static str },

    #[error("[Q113] quantity tolerance {tolerance} must not be negative")]
    NegativeTolerance { tolerance: f64 },
}

impl FormatError {
    /// Returns the stable error code (e.g., "Q103").
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::EmptyIdentifier => "Q101",
            FormatError::InvalidIdentifierChar { .. } => "Q102",
            FormatError::RawNewline => "Q103",
            FormatError::ReservedCharacter { .. } => "Q104",
            FormatError::InvalidLanguage { .. } => "Q105",
            FormatError::InvalidPrecision { .. } => "Q106",
            FormatError::NonFiniteNumber { .. } => "Q107",
            FormatError::LatitudeOutOfRange { .. } => "Q108",
            FormatError::LongitudeOutOfRange { .. } => "Q109",
            FormatError::InvalidCoordinatePrecision { .. } => "Q110",
            FormatError::InvalidCalendarField { .. } => "Q111",
            FormatError::MalformedTimestamp { .. } => "Q112",
            FormatError::NegativeTolerance { .. } => "Q113",
        }
    }
}

/// Error raised when a qualifier, reference, or line is assembled from an
/// invalid combination of parts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("[Q201] {role} predicate cannot be the LAST sentinel")]
    LastAsPredicate { role: &'static str },

    #[error("[Q202] reference block has no snippets")]
    EmptyReferenceBlock,

    #[error("[Q203] unknown property datatype {tag:?}")]
    UnknownDataType { tag: String },

    #[error("[Q204] {0}")]
    Format(#[from] FormatError),
}

impl ConstructionError {
    /// Returns the stable error code (e.g., "Q201").
    pub fn code(&self) -> &'static str {
        match self {
            ConstructionError::LastAsPredicate { .. } => "Q201",
            ConstructionError::EmptyReferenceBlock => "Q202",
            ConstructionError::UnknownDataType { .. } => "Q203",
            ConstructionError::Format(inner) => inner.code(),
        }
    }
}

/// Error during advisory type checking against a [`SchemaContext`](crate::SchemaContext).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("line {line}: value for {property} does not fit datatype {expected:?}")]
    TypeMismatch {
        line: usize,
        property: Identifier,
        expected: DataType,
    },

    #[error("line {line}: LAST used before any CREATE line")]
    DanglingLast { line: usize },
}

/// Error while resolving client configuration or credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing {field} (set it in the config file or {env})")]
    MissingField {
        field: &'static str,
        env: &'static str,
    },

    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Error reported by a [`Transport`](crate::client::Transport) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("batch rejected by remote: status {status:?}")]
    Rejected { status: String },

    #[error("remote response carried no batch id")]
    MissingBatchId,

    #[error("malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("transport failure: {0}")]
    Other(String),
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
