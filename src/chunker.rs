//! Splitting long or multi-line values into `CONT`/`CONC` lines.
//!
//! A value is first split on embedded line breaks. The first segment starts
//! the owning tag's line; each later segment starts a `CONT` line. Inside a
//! segment, characters are packed greedily into the byte budget of the line
//! that carries them, and every further chunk becomes a `CONC` line. Both
//! continuation kinds sit one level below the owning line.
//!
//! Budgets are exact per line: the maximum line length minus the level
//! digits, the optional `@id@` pointer and its space, the tag, the space
//! before the value and the terminator. Characters are never split, and
//! when `@` escaping is on an `@` costs two bytes so escaped pairs stay on
//! one line.

use crate::config::WriterConfig;
use crate::error::{GedcomError, Result};
use crate::field_catalog::FieldSpec;
use crate::level::Level;
use crate::line::{LineTerminator, ResolvedLine};
use crate::pointer::PointerId;
use smallvec::SmallVec;
use std::borrow::Cow;
use tracing::debug;

/// Tag of a continuation that restores an embedded line break.
pub const CONT: &str = "CONT";
/// Tag of a continuation that concatenates without a break.
pub const CONC: &str = "CONC";

/// Lines produced for one value; most values need only one.
pub type ChunkedLines = SmallVec<[ResolvedLine; 2]>;

/// Splits values into a primary line plus continuation lines.
#[derive(Debug, Clone, Copy)]
pub struct LineChunker {
    max_line_bytes: usize,
    terminator: LineTerminator,
    escape_at_signs: bool,
}

impl Default for LineChunker {
    fn default() -> Self {
        LineChunker::new(&WriterConfig::default())
    }
}

impl LineChunker {
    /// Create a chunker from writer settings.
    #[must_use]
    pub fn new(config: &WriterConfig) -> Self {
        LineChunker {
            max_line_bytes: config.max_line_bytes,
            terminator: config.line_terminator,
            escape_at_signs: config.escape_at_signs,
        }
    }

    /// Bytes available for the value on a line with this prefix.
    #[must_use]
    pub fn safe_chunk_size(&self, level: Level, tag: &str, pointer: Option<&PointerId>) -> usize {
        self.budget(level.digits(), tag.len(), pointer.map_or(0, PointerId::encoded_len))
    }

    /// Check that a line, value included, fits within the byte limit.
    ///
    /// Lines built outside [`LineChunker::chunk`] (value-less tag lines and
    /// cross-reference lines) go through this check.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::LineBudgetExceeded`] if the line is too long.
    pub fn check_line(&self, line: &ResolvedLine) -> Result<()> {
        if line.encoded_len(self.terminator) <= self.max_line_bytes {
            return Ok(());
        }
        let level_digits = if line.level < 10 { 1 } else { 2 };
        let pointer_len = line.pointer.as_ref().map_or(0, PointerId::encoded_len);
        Err(GedcomError::LineBudgetExceeded {
            tag: line.tag.clone(),
            budget: self.budget(level_digits, line.tag.len(), pointer_len),
        })
    }

    fn budget(&self, level_digits: usize, tag_len: usize, pointer_len: usize) -> usize {
        let pointer = if pointer_len > 0 { pointer_len + 1 } else { 0 };
        let fixed = level_digits + pointer + 1 + tag_len + 1 + self.terminator.byte_len();
        self.max_line_bytes.saturating_sub(fixed)
    }

    /// Split a literal value into its primary line and continuation lines.
    ///
    /// `field` is the specification governing the value; `None` means the
    /// field is unknown and treated as unbounded.
    ///
    /// # Errors
    ///
    /// - [`GedcomError::FieldLengthPolicyViolation`] if a `CONC` line would be
    ///   needed for a field whose maximum length is 248 or less.
    /// - [`GedcomError::LevelOutOfRange`] if continuation lines would need
    ///   level 100.
    /// - [`GedcomError::LineBudgetExceeded`] if a line prefix leaves no room
    ///   for a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use gedcom555::chunker::LineChunker;
    /// use gedcom555::level::Level;
    ///
    /// let chunker = LineChunker::default();
    /// let lines = chunker.chunk(Level::new(1)?, "NOTE", None, "first\nsecond", None)?;
    /// let rendered: Vec<String> = lines.iter().map(ToString::to_string).collect();
    /// assert_eq!(rendered, vec!["1 NOTE first", "2 CONT second"]);
    /// # Ok::<(), gedcom555::GedcomError>(())
    /// ```
    pub fn chunk(
        &self,
        level: Level,
        tag: &str,
        pointer: Option<&PointerId>,
        text: &str,
        field: Option<&'static FieldSpec>,
    ) -> Result<ChunkedLines> {
        let primary_budget = self.safe_chunk_size(level, tag, pointer);
        let continuation_digits = if level.get() < 9 { 1 } else { 2 };
        let continuation_budget = self.budget(continuation_digits, CONT.len(), 0);

        let mut lines = ChunkedLines::new();
        for (segment_index, segment) in split_line_breaks(text).into_iter().enumerate() {
            let first_budget = if segment_index == 0 {
                primary_budget
            } else {
                continuation_budget
            };
            let chunks = self.pack(segment, first_budget, continuation_budget, tag)?;

            for (chunk_index, chunk) in chunks.into_iter().enumerate() {
                let value = if chunk.is_empty() {
                    None
                } else {
                    Some(self.escape(chunk).into_owned())
                };
                let line = match (segment_index, chunk_index) {
                    (0, 0) => ResolvedLine::new(level.get(), tag, pointer.cloned(), value),
                    (_, 0) => ResolvedLine::new(level.deeper()?.get(), CONT, None, value),
                    _ => {
                        check_concatenation(tag, text, field)?;
                        ResolvedLine::new(level.deeper()?.get(), CONC, None, value)
                    }
                };
                lines.push(line);
            }
        }

        if lines.len() > 1 {
            debug!(tag, continuation_lines = lines.len() - 1, "chunked value");
        }
        Ok(lines)
    }

    fn cost(&self, ch: char) -> usize {
        if self.escape_at_signs && ch == '@' {
            2
        } else {
            ch.len_utf8()
        }
    }

    /// Greedily pack whole characters; always yields at least one chunk.
    fn pack<'a>(&self, segment: &'a str, first_budget: usize, rest_budget: usize, tag: &str) -> Result<Vec<&'a str>> {
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut used = 0;
        let mut budget = first_budget;

        for (index, ch) in segment.char_indices() {
            let cost = self.cost(ch);
            if used + cost > budget && used > 0 {
                chunks.push(&segment[start..index]);
                start = index;
                used = 0;
                budget = rest_budget;
            }
            if cost > budget {
                return Err(GedcomError::LineBudgetExceeded {
                    tag: tag.to_string(),
                    budget,
                });
            }
            used += cost;
        }
        chunks.push(&segment[start..]);
        Ok(chunks)
    }

    fn escape<'a>(&self, chunk: &'a str) -> Cow<'a, str> {
        if self.escape_at_signs {
            escape_at_signs(chunk)
        } else {
            Cow::Borrowed(chunk)
        }
    }
}

fn check_concatenation(tag: &str, text: &str, field: Option<&'static FieldSpec>) -> Result<()> {
    match field {
        Some(spec) if !spec.allows_concatenation() => Err(GedcomError::FieldLengthPolicyViolation {
            tag: tag.to_string(),
            field: spec.name,
            max_len: spec.max_len,
            length: text.chars().count(),
        }),
        _ => Ok(()),
    }
}

/// Double every `@` so literal text cannot be read as a pointer delimiter.
#[must_use]
pub fn escape_at_signs(text: &str) -> Cow<'_, str> {
    if text.contains('@') {
        Cow::Owned(text.replace('@', "@@"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Split on `\n`, `\r\n` and lone `\r`, keeping empty segments.
fn split_line_breaks(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'\n' => {
                segments.push(&text[start..index]);
                index += 1;
                start = index;
            }
            b'\r' => {
                segments.push(&text[start..index]);
                index += if bytes.get(index + 1) == Some(&b'\n') { 2 } else { 1 };
                start = index;
            }
            _ => index += 1,
        }
    }
    segments.push(&text[start..]);
    segments
}
