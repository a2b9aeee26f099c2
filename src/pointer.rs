//! Cross-reference identifiers.
//!
//! A [`PointerId`] is the identity of a record root (`0 @I1@ INDI`) and the
//! target of references from other lines (`1 HUSB @I1@`). Identifiers are
//! at most [`MAX_POINTER_LEN`] characters; longer input is truncated.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum number of characters in an identifier, excluding the `@` delimiters.
pub const MAX_POINTER_LEN: usize = 20;

lazy_static! {
    static ref WELL_FORMED: Regex = Regex::new(r"^[A-Za-z0-9]{1,20}$").unwrap();
}

/// A GEDCOM cross-reference identifier, rendered as `@id@`.
///
/// # Examples
///
/// ```
/// use gedcom555::PointerId;
///
/// let id = PointerId::new("I1");
/// assert_eq!(id.as_str(), "I1");
/// assert_eq!(id.to_string(), "@I1@");
///
/// let long = PointerId::new("0123456789ABCDEFGHIJKLMN");
/// assert_eq!(long.as_str(), "0123456789ABCDEFGHIJ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(String);

impl PointerId {
    /// Create an identifier from caller-supplied text.
    ///
    /// Surrounding `@` delimiters are stripped and the remainder is truncated
    /// to [`MAX_POINTER_LEN`] characters.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        let id = id.as_ref().trim_matches('@');
        PointerId(id.chars().take(MAX_POINTER_LEN).collect())
    }

    /// Create an identifier from a UUID's hex digits.
    #[must_use]
    pub fn from_uuid(uuid: &Uuid) -> Self {
        PointerId::new(uuid.simple().to_string().to_uppercase())
    }

    /// Generate a fresh random identifier.
    ///
    /// Generation needs no coordination between documents or threads.
    #[must_use]
    pub fn generate() -> Self {
        PointerId::from_uuid(&Uuid::new_v4())
    }

    /// The bare identifier without delimiters.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte length of the rendered `@id@` form.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.0.len() + 2
    }

    /// Whether the identifier consists of 1 to 20 ASCII alphanumerics.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        WELL_FORMED.is_match(&self.0)
    }
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}@", self.0)
    }
}

impl From<&str> for PointerId {
    fn from(id: &str) -> Self {
        PointerId::new(id)
    }
}

impl From<String> for PointerId {
    fn from(id: String) -> Self {
        PointerId::new(id)
    }
}
