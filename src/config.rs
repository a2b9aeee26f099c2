//! Serialization settings.
//!
//! [`WriterConfig`] controls line layout and output encoding. Every field
//! has a GEDCOM 5.5.5 default, so partial JSON configuration is accepted.

use crate::error::{GedcomError, Result};
use crate::line::LineTerminator;
use serde::{Deserialize, Serialize};

/// Maximum encoded line length, terminator included.
pub const DEFAULT_MAX_LINE_BYTES: usize = 255;

/// Settings for turning a document into text.
///
/// # Examples
///
/// ```
/// use gedcom555::{LineTerminator, WriterConfig};
///
/// let config = WriterConfig::from_json(r#"{"line_terminator": "crlf"}"#)?;
/// assert_eq!(config.line_terminator, LineTerminator::CrLf);
/// assert_eq!(config.max_line_bytes, 255);
/// assert!(config.byte_order_mark);
/// # Ok::<(), gedcom555::GedcomError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct WriterConfig {
    /// Maximum encoded bytes per line, terminator included.
    pub max_line_bytes: usize,

    /// Terminator appended to each line.
    pub line_terminator: LineTerminator,

    /// Prefix byte and file output with a UTF-8 byte order mark.
    ///
    /// In-memory strings never carry the mark.
    pub byte_order_mark: bool,

    /// Double literal `@` characters in text values.
    pub escape_at_signs: bool,

    /// Check that every cross-reference resolves before writing.
    pub validate_references: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            line_terminator: LineTerminator::Lf,
            byte_order_mark: true,
            escape_at_signs: true,
            validate_references: false,
        }
    }
}

impl WriterConfig {
    /// Parse a configuration from JSON; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::ConfigError`] if the JSON is malformed or a
    /// value has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GedcomError::ConfigError(e.to_string()))
    }

    /// Serialize the configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::ConfigError`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GedcomError::ConfigError(e.to_string()))
    }

    /// Builder-style override of the per-line byte limit.
    #[must_use]
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Builder-style override of the line terminator.
    #[must_use]
    pub fn with_line_terminator(mut self, terminator: LineTerminator) -> Self {
        self.line_terminator = terminator;
        self
    }

    /// Builder-style override of the byte order mark.
    #[must_use]
    pub fn with_byte_order_mark(mut self, enabled: bool) -> Self {
        self.byte_order_mark = enabled;
        self
    }

    /// Builder-style override of `@` escaping.
    #[must_use]
    pub fn with_escape_at_signs(mut self, enabled: bool) -> Self {
        self.escape_at_signs = enabled;
        self
    }

    /// Builder-style override of reference validation.
    #[must_use]
    pub fn with_reference_validation(mut self, enabled: bool) -> Self {
        self.validate_references = enabled;
        self
    }
}
