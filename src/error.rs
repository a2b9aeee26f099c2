//! Error types for GEDCOM operations.
//!
//! This module provides the [`GedcomError`] type for all library operations
//! and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all GEDCOM library operations.
///
/// Serialization errors abort the whole document: no partial output is
/// produced once one of these is returned.
#[derive(Error, Debug)]
pub enum GedcomError {
    /// A value needed a `CONC` continuation on a field whose maximum length
    /// is 248 characters or less.
    #[error(
        "Field length policy violation: {tag} value of {length} characters needs CONC but {field} allows at most {max_len}"
    )]
    FieldLengthPolicyViolation {
        /// Tag of the offending line
        tag: String,
        /// Name of the governing field specification
        field: &'static str,
        /// Declared maximum length of the field
        max_len: usize,
        /// Length of the value in characters
        length: usize,
    },

    /// A cross-reference value points at an identity no record declares.
    #[error("Unresolved pointer reference: {tag} refers to @{pointer}@")]
    UnresolvedPointerReference {
        /// Tag of the referencing line
        tag: String,
        /// Identifier that could not be resolved
        pointer: String,
    },

    /// Two record roots declare the same identity.
    #[error("Duplicate pointer: @{0}@ is declared more than once")]
    DuplicatePointer(String),

    /// A resolved level fell outside `0..=99`.
    #[error("Level out of range: {0} (expected 0-99)")]
    LevelOutOfRange(i32),

    /// The fixed part of a line leaves no room for its value.
    #[error("Line budget exceeded: {tag} leaves {budget} bytes for its value")]
    LineBudgetExceeded {
        /// Tag of the line
        tag: String,
        /// Remaining byte budget
        budget: usize,
    },

    /// A child was added that the grammar does not allow under its parent.
    #[error("Unknown substructure: {child} is not allowed under {parent}")]
    UnknownSubstructure {
        /// Grammar name of the parent
        parent: &'static str,
        /// Tag or grammar name of the rejected child
        child: String,
    },

    /// A single-occurrence slot was filled twice.
    #[error("Repeated substructure: {child} may occur only once under {parent}")]
    RepeatedSubstructure {
        /// Grammar name of the parent
        parent: &'static str,
        /// Grammar name of the repeated child
        child: &'static str,
    },

    /// A required slot was left empty.
    #[error("Missing substructure: {parent} requires {child}")]
    MissingSubstructure {
        /// Grammar name of the parent
        parent: &'static str,
        /// Grammar name of the missing child
        child: &'static str,
    },

    /// A value that the grammar does not accept for this tag.
    #[error("Invalid value for {tag}: {reason}")]
    InvalidValue {
        /// Tag or grammar name receiving the value
        tag: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A date string could not be interpreted.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A document was written after the writer was finished.
    #[error("Writer finished: {0}")]
    WriterFinished(String),

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error from the underlying destination.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`GedcomError`].
pub type Result<T> = std::result::Result<T, GedcomError>;
