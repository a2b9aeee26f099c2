//! Depth-first traversal of a record tree into resolved lines.
//!
//! The walker visits nodes in pre-order, children in stored order, and
//! stamps each tagged node with the level computed by
//! [`crate::level::resolve`]. Groups emit nothing but still pass their
//! level (shifted by their own offset) down to their children. Text values
//! go through the [`LineChunker`], so continuation lines follow their owning
//! line immediately and precede its first child.

use crate::chunker::LineChunker;
use crate::config::WriterConfig;
use crate::document::Document;
use crate::error::Result;
use crate::level::{self, Level, Position};
use crate::line::ResolvedLine;
use crate::node::{RecordNode, Value};
use tracing::{debug, trace};

/// Tag of the line that ends every document.
pub const TRAILER_TAG: &str = "TRLR";

/// Turns record trees into ordered [`ResolvedLine`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeWalker {
    chunker: LineChunker,
}

impl TreeWalker {
    /// Create a walker using the given line layout.
    #[must_use]
    pub fn new(config: &WriterConfig) -> Self {
        TreeWalker {
            chunker: LineChunker::new(config),
        }
    }

    /// Resolve a whole document, appending `0 TRLR` if the tree lacks one.
    ///
    /// # Errors
    ///
    /// Propagates chunking and level errors; no lines are returned on failure.
    pub fn walk_document(&self, document: &Document) -> Result<Vec<ResolvedLine>> {
        let mut lines = self.walk(document.root())?;
        let terminated = lines
            .last()
            .is_some_and(|line| line.level == 0 && line.tag == TRAILER_TAG);
        if !terminated {
            debug!("appending missing trailer");
            lines.push(ResolvedLine::new(0, TRAILER_TAG, None, None));
        }
        debug!(lines = lines.len(), "resolved document");
        Ok(lines)
    }

    /// Resolve a tree rooted at level 0.
    ///
    /// When the root is a group, its children are document sections and are
    /// pinned to level 0. A tagged root is emitted at level 0 and its
    /// children are ordinary substructures.
    ///
    /// # Errors
    ///
    /// Propagates chunking and level errors.
    pub fn walk(&self, root: &RecordNode) -> Result<Vec<ResolvedLine>> {
        let mut lines = Vec::new();
        self.visit(root, |line| {
            lines.push(line);
            Ok(())
        })?;
        Ok(lines)
    }

    /// Feed each resolved line to `sink` as soon as it is produced.
    ///
    /// # Errors
    ///
    /// Propagates chunking and level errors, and any error from `sink`.
    pub fn visit<F>(&self, root: &RecordNode, mut sink: F) -> Result<()>
    where
        F: FnMut(ResolvedLine) -> Result<()>,
    {
        self.emit(root, Level::ROOT, &mut sink)?;
        let position = if root.is_group() {
            Position::Section
        } else {
            Position::Substructure
        };
        for child in &root.children {
            let child_level = level::resolve(Level::ROOT, child.level_offset, position)?;
            self.descend(child, child_level, &mut sink)?;
        }
        Ok(())
    }

    fn descend<F>(&self, node: &RecordNode, level: Level, sink: &mut F) -> Result<()>
    where
        F: FnMut(ResolvedLine) -> Result<()>,
    {
        self.emit(node, level, sink)?;
        for child in &node.children {
            let child_level = level::resolve(level, child.level_offset, Position::Substructure)?;
            self.descend(child, child_level, sink)?;
        }
        Ok(())
    }

    fn emit<F>(&self, node: &RecordNode, level: Level, sink: &mut F) -> Result<()>
    where
        F: FnMut(ResolvedLine) -> Result<()>,
    {
        let Some(tag) = node.tag.as_deref() else {
            return Ok(());
        };

        match &node.value {
            Some(Value::Text(text)) if text.is_empty() => {
                if node.children.is_empty() && node.pointer.is_none() {
                    debug!(tag, level = level.get(), "skipping empty value");
                    return Ok(());
                }
                self.checked(line(level, tag, node, None), sink)
            }
            Some(Value::Text(text)) => {
                let chunks = self
                    .chunker
                    .chunk(level, tag, node.pointer.as_ref(), text, node.field)?;
                for chunk in chunks {
                    trace!(line = %chunk, "emit");
                    sink(chunk)?;
                }
                Ok(())
            }
            Some(Value::Pointer(target)) => self.checked(line(level, tag, node, Some(target.to_string())), sink),
            None => self.checked(line(level, tag, node, None), sink),
        }
    }

    fn checked<F>(&self, line: ResolvedLine, sink: &mut F) -> Result<()>
    where
        F: FnMut(ResolvedLine) -> Result<()>,
    {
        self.chunker.check_line(&line)?;
        sink(line)
    }
}

fn line(level: Level, tag: &str, node: &RecordNode, value: Option<String>) -> ResolvedLine {
    let line = ResolvedLine::new(level.get(), tag, node.pointer.clone(), value);
    trace!(line = %line, "emit");
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NodeBuilder;
    use crate::error::GedcomError;
    use crate::level::LevelOffset;
    use crate::pointer::PointerId;

    fn rendered(lines: &[ResolvedLine]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    fn section(child: RecordNode) -> RecordNode {
        RecordNode::group().with_child(child)
    }

    #[test]
    fn test_sections_pinned_and_groups_transparent() {
        let root = RecordNode::group()
            .with_child(section(RecordNode::tag("HEAD").with_level_offset(LevelOffset::Transparent)))
            .with_child(section(
                RecordNode::tag("INDI")
                    .with_pointer(PointerId::new("I1"))
                    .with_level_offset(LevelOffset::Transparent)
                    .with_child(
                        RecordNode::tag("BIRT").with_child(
                            RecordNode::group()
                                .with_child(RecordNode::tag("DATE").with_text("1822"))
                                .with_child(
                                    RecordNode::group().with_child(RecordNode::tag("PLAC").with_text("Weston")),
                                ),
                        ),
                    ),
            ));
        let lines = TreeWalker::default().walk(&root).unwrap();
        assert_eq!(
            rendered(&lines),
            vec!["0 HEAD", "0 @I1@ INDI", "1 BIRT", "2 DATE 1822", "2 PLAC Weston"]
        );
    }

    #[test]
    fn test_flattened_wrapper_returns_to_parent_level() {
        let root = RecordNode::tag("SOUR").with_child(
            RecordNode::tag("DATA").with_child(
                RecordNode::group()
                    .with_level_offset(LevelOffset::Flattened)
                    .with_child(RecordNode::tag("TEXT").with_text("x")),
            ),
        );
        let lines = TreeWalker::default().walk(&root).unwrap();
        assert_eq!(rendered(&lines), vec!["0 SOUR", "1 DATA", "1 TEXT x"]);
    }

    #[test]
    fn test_reference_values_are_verbatim() {
        let root = RecordNode::tag("FAM")
            .with_pointer(PointerId::new("F1"))
            .with_child(RecordNode::tag("HUSB").with_reference(PointerId::new("I1")));
        let lines = TreeWalker::default().walk(&root).unwrap();
        assert_eq!(rendered(&lines), vec!["0 @F1@ FAM", "1 HUSB @I1@"]);
    }

    #[test]
    fn test_continuations_precede_children() {
        let root = RecordNode::tag("NOTE")
            .with_text("a\nb")
            .with_child(RecordNode::tag("SOUR").with_reference(PointerId::new("S1")));
        let lines = TreeWalker::default().walk(&root).unwrap();
        assert_eq!(rendered(&lines), vec!["0 NOTE a", "1 CONT b", "1 SOUR @S1@"]);
    }

    #[test]
    fn test_empty_text_is_absent() {
        let root = RecordNode::tag("INDI")
            .with_child(RecordNode::tag("NOTE").with_text(""))
            .with_child(RecordNode::tag("BIRT").with_text("").with_child(RecordNode::tag("DATE").with_text("1900")));
        let lines = TreeWalker::default().walk(&root).unwrap();
        assert_eq!(rendered(&lines), vec!["0 INDI", "1 BIRT", "2 DATE 1900"]);
    }

    #[test]
    fn test_at_sign_escaped_in_text() {
        let root = RecordNode::tag("EMAIL").with_text("me@example.org");
        let lines = TreeWalker::default().walk(&root).unwrap();
        assert_eq!(lines[0].value.as_deref(), Some("me@@example.org"));
    }

    #[test]
    fn test_level_overflow_is_an_error() {
        let mut node = RecordNode::tag("X");
        for _ in 0..100 {
            node = RecordNode::tag("X").with_child(node);
        }
        assert!(TreeWalker::default().walk(&node).is_err());
    }

    #[test]
    fn test_oversized_tag_line_is_an_error() {
        let root = RecordNode::tag("_".repeat(300));
        let err = TreeWalker::default().walk(&root).unwrap_err();
        assert!(matches!(err, GedcomError::LineBudgetExceeded { .. }));

        let root = RecordNode::tag("INDI")
            .with_pointer(PointerId::new("I1"))
            .with_child(RecordNode::tag("_".repeat(260)).with_reference(PointerId::new("F1")));
        assert!(matches!(
            TreeWalker::default().walk(&root),
            Err(GedcomError::LineBudgetExceeded { .. })
        ));
    }

    #[test]
    fn test_empty_record_keeps_identity_line() {
        let root = RecordNode::tag("NOTE").with_pointer(PointerId::new("N1")).with_text("");
        let lines = TreeWalker::default().walk(&root).unwrap();
        assert_eq!(rendered(&lines), vec!["0 @N1@ NOTE"]);

        let note = NodeBuilder::note("N1", "").build().unwrap();
        let lines = TreeWalker::default().walk(&note).unwrap();
        assert_eq!(rendered(&lines), vec!["0 @N1@ NOTE"]);
    }

    #[test]
    fn test_walk_document_appends_trailer() {
        let document = Document::from_root(section(
            RecordNode::tag("HEAD").with_level_offset(LevelOffset::Transparent),
        ));
        let lines = TreeWalker::default().walk_document(&document).unwrap();
        assert_eq!(rendered(&lines), vec!["0 HEAD", "0 TRLR"]);
    }
}
