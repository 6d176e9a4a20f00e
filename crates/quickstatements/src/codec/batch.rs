//! Batch composition: joining records into a submittable payload.

use tracing::{debug, trace};
use url::{form_urlencoded, Url};

use crate::codec::line::{encode_line_with, FIELD_SEPARATOR};
use crate::error::{ConfigError, Error, FormatError};
use crate::model::Line;

/// Separates records in a submitted payload.
pub const RECORD_SEPARATOR: &str = "\n";

/// Separates records inside a V1 import URL.
pub const URL_RECORD_SEPARATOR: &str = "||";

/// Field and record separators used when rendering lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub field_separator: String,
    pub record_separator: String,
}

impl RenderOptions {
    /// `|` between fields, newline between records.
    pub fn payload() -> Self {
        Self {
            field_separator: FIELD_SEPARATOR.to_string(),
            record_separator: RECORD_SEPARATOR.to_string(),
        }
    }

    /// `|` between fields, `||` between records.
    pub fn url() -> Self {
        Self {
            field_separator: FIELD_SEPARATOR.to_string(),
            record_separator: URL_RECORD_SEPARATOR.to_string(),
        }
    }

    /// Tab between fields, newline between records.
    pub fn tsv() -> Self {
        Self {
            field_separator: "\t".to_string(),
            record_separator: RECORD_SEPARATOR.to_string(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::payload()
    }
}

/// Renders lines in order with the given separators.
///
/// Fails on the first line that cannot be encoded; no partial output is
/// returned.
pub fn render_lines(lines: &[Line], options: &RenderOptions) -> Result<String, FormatError> {
    let mut records = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let record = encode_line_with(line, &options.field_separator)?;
        trace!(index, record = %record, "rendered line");
        records.push(record);
    }
    Ok(records.join(&options.record_separator))
}

/// Composes the submittable payload for a batch.
///
/// The batch name is not part of the payload; it travels alongside it to
/// the transport.
pub fn compose(lines: &[Line], batch_name: &str) -> Result<String, FormatError> {
    let payload = render_lines(lines, &RenderOptions::payload())?;
    debug!(
        batch = batch_name,
        lines = lines.len(),
        bytes = payload.len(),
        "composed batch payload"
    );
    Ok(payload)
}

/// Builds a `<base>/#/v1=<lines>` import URL.
///
/// Everything except ASCII alphanumerics and `*-._` is percent-encoded,
/// spaces included.
pub fn lines_to_url(lines: &[Line], base_url: &str) -> Result<String, Error> {
    let base = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;
    let rendered = render_lines(lines, &RenderOptions::url())?;
    let encoded: String = form_urlencoded::byte_serialize(rendered.as_bytes()).collect();
    // byte_serialize writes spaces as '+'; a literal '+' is already %2B.
    let encoded = encoded.replace('+', "%20");
    Ok(format!(
        "{}/#/v1={}",
        base.as_str().trim_end_matches('/'),
        encoded
    ))
}
