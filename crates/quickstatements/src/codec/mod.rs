//! Text encoding for the QuickStatements V1 line format.
//!
//! Data flows one way: value -> token -> qualifier/reference -> line ->
//! batch payload. Nothing here reads results back from a later stage.

pub mod batch;
pub mod line;
pub mod value;

pub use batch::{compose, lines_to_url, render_lines, RenderOptions, RECORD_SEPARATOR, URL_RECORD_SEPARATOR};
pub use line::{
    encode_line, encode_line_with, encode_qualifier, encode_reference_block, CREATE_MARKER,
    FIELD_SEPARATOR, REFERENCE_GROUP_MARKER,
};
pub use value::{encode_value, escape_text, quote_text, unescape_text};
