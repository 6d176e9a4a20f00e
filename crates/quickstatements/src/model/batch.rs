//! Batch structure for ordered lines.
//!
//! Batches are submitted as a whole. Order is significant: a `LAST`
//! reference resolves against the CREATE line that ran most recently.

use crate::codec::{self, RenderOptions};
use crate::error::{Error, FormatError};
use crate::model::Line;

/// An ordered sequence of lines with a human-readable name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Batch {
    name: String,
    lines: Vec<Line>,
}

impl Batch {
    /// Creates a batch from its name and lines.
    pub fn new(name: impl Into<String>, lines: Vec<Line>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns a new batch with `line` appended.
    pub fn with_line(mut self, line: impl Into<Line>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Renders the submittable payload: one record per line, newline-separated.
    pub fn compose(&self) -> Result<String, FormatError> {
        codec::compose(&self.lines, &self.name)
    }

    /// Renders the lines with custom separators.
    pub fn render(&self, options: &RenderOptions) -> Result<String, FormatError> {
        codec::render_lines(&self.lines, options)
    }

    /// Builds a V1 import URL that pre-fills the QuickStatements web UI.
    pub fn to_url(&self, base_url: &str) -> Result<String, Error> {
        codec::lines_to_url(&self.lines, base_url)
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
