//! Level number resolution.
//!
//! A node's level is a pure function of the chain of declared offsets from
//! the document root: `parent_level + offset`, except that top-level
//! document sections are pinned at level 0. Repetition never changes a
//! level, so a resolver needs no sibling or occurrence state.

use crate::error::{GedcomError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest level a GEDCOM line may carry.
pub const MAX_LEVEL: u8 = 99;

/// An absolute GEDCOM level in `0..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Level of the document root and of every top-level section.
    pub const ROOT: Level = Level(0);

    /// Create a level, rejecting values above [`MAX_LEVEL`].
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::LevelOutOfRange`] for values above 99.
    pub fn new(level: u8) -> Result<Self> {
        if level > MAX_LEVEL {
            return Err(GedcomError::LevelOutOfRange(i32::from(level)));
        }
        Ok(Level(level))
    }

    /// The numeric level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Level of continuation lines owned by a line at this level.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::LevelOutOfRange`] when this level is already 99.
    pub fn deeper(self) -> Result<Self> {
        self.offset(LevelOffset::Nested)
    }

    /// Apply a declared offset.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::LevelOutOfRange`] if the result is negative or
    /// above 99.
    pub fn offset(self, offset: LevelOffset) -> Result<Self> {
        let level = i32::from(self.0) + i32::from(offset.delta());
        u8::try_from(level)
            .ok()
            .filter(|level| *level <= MAX_LEVEL)
            .map(Level)
            .ok_or(GedcomError::LevelOutOfRange(level))
    }

    /// Number of ASCII digits in the rendered level.
    #[must_use]
    pub const fn digits(self) -> usize {
        if self.0 < 10 {
            1
        } else {
            2
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = GedcomError;

    fn try_from(level: u8) -> Result<Self> {
        Level::new(level)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

/// Declared level shift of a node type relative to its parent.
///
/// This is grammar data: every node type carries a fixed offset, chosen
/// when the grammar was authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LevelOffset {
    /// `-1`: an organisational wrapper flattened back onto its parent's level
    Flattened,
    /// `0`: a grouping wrapper (or record root) that does not consume a level
    Transparent,
    /// `+1`: one level deeper than the parent
    #[default]
    Nested,
}

impl LevelOffset {
    /// Signed level change.
    #[must_use]
    pub const fn delta(self) -> i8 {
        match self {
            Self::Flattened => -1,
            Self::Transparent => 0,
            Self::Nested => 1,
        }
    }
}

/// Where a node sits relative to the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Direct child of the document root: header, submitter, records, trailer
    Section,
    /// Any deeper node, single or repeated
    Substructure,
}

/// Compute the level of a node from its parent's level.
///
/// # Errors
///
/// Returns [`GedcomError::LevelOutOfRange`] when the offset leaves `0..=99`.
///
/// # Examples
///
/// ```
/// use gedcom555::level::{resolve, Level, LevelOffset, Position};
///
/// let parent = Level::new(2)?;
/// assert_eq!(resolve(parent, LevelOffset::Nested, Position::Substructure)?.get(), 3);
/// assert_eq!(resolve(parent, LevelOffset::Transparent, Position::Substructure)?.get(), 2);
/// assert_eq!(resolve(parent, LevelOffset::Nested, Position::Section)?.get(), 0);
/// # Ok::<(), gedcom555::GedcomError>(())
/// ```
pub fn resolve(parent: Level, offset: LevelOffset, position: Position) -> Result<Level> {
    match position {
        Position::Section => Ok(Level::ROOT),
        Position::Substructure => parent.offset(offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_sum() {
        let one = Level::new(1).unwrap();
        assert_eq!(resolve(one, LevelOffset::Nested, Position::Substructure).unwrap().get(), 2);
        assert_eq!(resolve(one, LevelOffset::Transparent, Position::Substructure).unwrap().get(), 1);
        assert_eq!(resolve(one, LevelOffset::Flattened, Position::Substructure).unwrap().get(), 0);
    }

    #[test]
    fn test_sections_are_pinned_to_zero() {
        let deep = Level::new(7).unwrap();
        for offset in [LevelOffset::Flattened, LevelOffset::Transparent, LevelOffset::Nested] {
            assert_eq!(resolve(deep, offset, Position::Section).unwrap(), Level::ROOT);
        }
    }

    #[test]
    fn test_flattening_below_root_fails() {
        let err = resolve(Level::ROOT, LevelOffset::Flattened, Position::Substructure).unwrap_err();
        assert!(matches!(err, GedcomError::LevelOutOfRange(-1)));
    }

    #[test]
    fn test_level_ceiling() {
        let top = Level::new(MAX_LEVEL).unwrap();
        assert!(matches!(top.deeper(), Err(GedcomError::LevelOutOfRange(100))));
        assert!(Level::new(100).is_err());
    }

    #[test]
    fn test_digits() {
        assert_eq!(Level::new(9).unwrap().digits(), 1);
        assert_eq!(Level::new(10).unwrap().digits(), 2);
    }
}
