//! Resolved lines and their text rendering.

use crate::pointer::PointerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line terminator appended to every rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
    /// `\r`
    Cr,
}

impl LineTerminator {
    /// The terminator text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// Encoded length in bytes.
    #[must_use]
    pub const fn byte_len(self) -> usize {
        self.as_str().len()
    }

    /// The conventional terminator of the host platform.
    #[must_use]
    pub const fn platform() -> Self {
        if cfg!(windows) {
            Self::CrLf
        } else {
            Self::Lf
        }
    }
}

/// One output line: `level [@pointer@] tag [value]`.
///
/// Values are final: escaped and already chunked to fit the line budget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedLine {
    /// Level number, 0 to 99
    pub level: u8,
    /// Tag
    pub tag: String,
    /// Identity declared on this line
    pub pointer: Option<PointerId>,
    /// Rendered value
    pub value: Option<String>,
}

impl ResolvedLine {
    /// Create a line.
    #[must_use]
    pub fn new(level: u8, tag: impl Into<String>, pointer: Option<PointerId>, value: Option<String>) -> Self {
        ResolvedLine {
            level,
            tag: tag.into(),
            pointer,
            value,
        }
    }

    /// Render with the given terminator.
    ///
    /// # Examples
    ///
    /// ```
    /// use gedcom555::{LineTerminator, PointerId, ResolvedLine};
    ///
    /// let line = ResolvedLine::new(0, "INDI", Some(PointerId::new("I1")), None);
    /// assert_eq!(line.render(LineTerminator::Lf), "0 @I1@ INDI\n");
    /// ```
    #[must_use]
    pub fn render(&self, terminator: LineTerminator) -> String {
        let mut out = String::with_capacity(self.encoded_len(terminator));
        self.render_into(&mut out, terminator);
        out
    }

    /// Append the rendered line to `out`.
    pub fn render_into(&self, out: &mut String, terminator: LineTerminator) {
        use fmt::Write as _;
        // Writing into a String cannot fail.
        let _ = write!(out, "{self}");
        out.push_str(terminator.as_str());
    }

    /// Encoded byte length including the terminator.
    #[must_use]
    pub fn encoded_len(&self, terminator: LineTerminator) -> usize {
        let level = if self.level < 10 { 1 } else { 2 };
        let pointer = self.pointer.as_ref().map_or(0, |p| p.encoded_len() + 1);
        let value = self.value.as_ref().map_or(0, |v| v.len() + 1);
        level + pointer + 1 + self.tag.len() + value + terminator.byte_len()
    }
}

impl fmt::Display for ResolvedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)?;
        if let Some(pointer) = &self.pointer {
            write!(f, " {pointer}")?;
        }
        write!(f, " {}", self.tag)?;
        if let Some(value) = &self.value {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

/// Render a sequence of lines into one string.
#[must_use]
pub fn render_all(lines: &[ResolvedLine], terminator: LineTerminator) -> String {
    let capacity = lines.iter().map(|l| l.encoded_len(terminator)).sum();
    let mut out = String::with_capacity(capacity);
    for line in lines {
        line.render_into(&mut out, terminator);
    }
    out
}
