//! Property-based tests for value chunking and level assignment.
//!
//! These check the invariants every serialized line must satisfy:
//! - every line fits in 255 bytes including its terminator
//! - continuation lines reassemble to the exact original value
//! - fields bounded at 248 characters never get `CONC` lines
//! - levels never jump by more than one from one line to the next, for the
//!   sample document and for generated trees mixing nested tags with
//!   transparent and flattened groups

mod common;

use gedcom555::chunker::{LineChunker, CONC, CONT};
use gedcom555::field_catalog::lookup;
use gedcom555::{
    GedcomError, Level, LevelOffset, LineTerminator, PointerId, RecordNode, ResolvedLine, TreeWalker,
    WriterConfig,
};
use proptest::prelude::*;

/// Undo chunking: join `CONC` values, restore breaks at `CONT`, unescape `@@`.
fn reassemble(lines: &[ResolvedLine]) -> String {
    let mut text = String::new();
    for (index, line) in lines.iter().enumerate() {
        if index > 0 && line.tag == CONT {
            text.push('\n');
        }
        if let Some(value) = &line.value {
            text.push_str(value);
        }
    }
    text.replace("@@", "@")
}

/// Text mixing ASCII, multi-byte characters, `@` and line breaks.
fn mixed_text(max_pieces: usize) -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        6 => "[a-zA-Z0-9 ,.]{1,40}",
        1 => Just("é".to_string()),
        1 => Just("€".to_string()),
        1 => Just("𝄞".to_string()),
        1 => Just("@".to_string()),
        1 => Just("\n".to_string()),
        1 => Just("\n\n".to_string()),
    ];
    prop::collection::vec(piece, 0..max_pieces).prop_map(|pieces| pieces.concat())
}

fn terminator() -> impl Strategy<Value = LineTerminator> {
    prop_oneof![
        Just(LineTerminator::Lf),
        Just(LineTerminator::CrLf),
        Just(LineTerminator::Cr),
    ]
}

fn with_children(node: RecordNode, children: Vec<RecordNode>) -> RecordNode {
    children.into_iter().fold(node, RecordNode::with_child)
}

/// Subtrees shaped like the grammar: nested tags, transparent groups and
/// flattened groups whose direct children are tags.
fn subtree() -> impl Strategy<Value = RecordNode> {
    let leaf = ("[A-Z]{3,4}", prop::option::of("[a-z ]{1,20}")).prop_map(|(tag, text)| match text {
        Some(text) => RecordNode::tag(tag).with_text(text),
        None => RecordNode::tag(tag),
    });
    leaf.prop_recursive(5, 64, 4, |inner| {
        let children = prop::collection::vec(inner, 1..4);
        prop_oneof![
            ("[A-Z]{3,4}", children.clone())
                .prop_map(|(tag, children)| with_children(RecordNode::tag(tag), children)),
            children
                .clone()
                .prop_map(|children| with_children(RecordNode::group(), children)),
            children.prop_map(|children| {
                let tags = children
                    .into_iter()
                    .map(|child| {
                        if child.is_group() {
                            RecordNode::tag("WRAP").with_child(child)
                        } else {
                            child
                        }
                    })
                    .collect();
                with_children(RecordNode::group().with_level_offset(LevelOffset::Flattened), tags)
            }),
        ]
    })
}

/// A document root: one section per record, each record transparent.
fn document_tree() -> impl Strategy<Value = RecordNode> {
    prop::collection::vec(subtree(), 1..4).prop_map(|subtrees| {
        subtrees.into_iter().fold(RecordNode::group(), |root, subtree| {
            let record = RecordNode::tag("_REC")
                .with_level_offset(LevelOffset::Transparent)
                .with_child(RecordNode::tag("_TOP").with_child(subtree));
            root.with_child(RecordNode::group().with_child(record))
        })
    })
}

fn chunker(terminator: LineTerminator) -> LineChunker {
    LineChunker::new(&WriterConfig::default().with_line_terminator(terminator))
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn chunks_reassemble_to_original(
            text in mixed_text(200),
            level in 0u8..98,
            terminator in terminator(),
        ) {
            let level = Level::new(level).unwrap();
            let lines = chunker(terminator).chunk(level, "NOTE", None, &text, lookup("USER_TEXT")).unwrap();
            prop_assert_eq!(reassemble(&lines), text);
        }

        #[test]
        fn every_line_fits_the_limit(
            text in mixed_text(200),
            level in 0u8..98,
            pointer in "[A-Z0-9]{1,20}",
            terminator in terminator(),
        ) {
            let level = Level::new(level).unwrap();
            let pointer = PointerId::new(pointer);
            let lines = chunker(terminator)
                .chunk(level, "NOTE", Some(&pointer), &text, None)
                .unwrap();
            for line in &lines {
                prop_assert!(line.encoded_len(terminator) <= 255, "{:?}", line);
                prop_assert_eq!(line.render(terminator).len(), line.encoded_len(terminator));
            }
        }

        #[test]
        fn continuations_sit_one_level_below(text in mixed_text(100), level in 0u8..98) {
            let level = Level::new(level).unwrap();
            let lines = LineChunker::default().chunk(level, "TEXT", None, &text, None).unwrap();
            prop_assert_eq!(lines[0].level, level.get());
            for line in &lines[1..] {
                prop_assert_eq!(line.level, level.get() + 1);
                prop_assert!(line.tag == CONT || line.tag == CONC);
                prop_assert!(line.pointer.is_none());
            }
        }

        #[test]
        fn generated_tree_levels_rise_by_at_most_one(root in document_tree()) {
            let lines = TreeWalker::default().walk(&root).unwrap();
            prop_assert_eq!(lines[0].level, 0);
            prop_assert_eq!(lines[0].tag.as_str(), "_REC");
            for pair in lines.windows(2) {
                prop_assert!(
                    pair[1].level <= pair[0].level + 1,
                    "{} then {}",
                    pair[0],
                    pair[1]
                );
                if pair[1].tag == "_REC" {
                    prop_assert_eq!(pair[1].level, 0);
                } else {
                    prop_assert!(pair[1].level >= 1);
                }
            }
        }

        #[test]
        fn bounded_fields_never_concatenate(text in "[a-z ]{0,600}", level in 0u8..20) {
            let level = Level::new(level).unwrap();
            let field = lookup("WHERE_WITHIN_SOURCE");
            match LineChunker::default().chunk(level, "PAGE", None, &text, field) {
                Ok(lines) => prop_assert!(lines.iter().all(|line| line.tag != CONC)),
                Err(err) => prop_assert!(
                    matches!(err, GedcomError::FieldLengthPolicyViolation { .. }),
                    "unexpected error {err}"
                ),
            }
        }
    }
}

#[test]
fn test_reassembles_100k_mixed_characters() {
    let unit = "Genealogy @ Leiden, naïve café €5 𝄞\nline two ";
    let mut text = String::new();
    while text.chars().count() < 100_000 {
        text.push_str(unit);
    }
    let lines = LineChunker::default()
        .chunk(Level::new(1).unwrap(), "NOTE", None, &text, lookup("USER_TEXT"))
        .unwrap();
    assert!(lines.len() > 400);
    assert!(lines.iter().all(|l| l.encoded_len(LineTerminator::Lf) <= 255));
    assert_eq!(reassemble(&lines), text);
}

#[test]
fn test_document_levels_step_by_at_most_one() {
    let lines = gedcom555::to_lines(&common::sample_document(), &WriterConfig::default()).unwrap();
    assert_eq!(lines[0].level, 0);
    for pair in lines.windows(2) {
        assert!(
            pair[1].level <= pair[0].level + 1,
            "{} then {}",
            pair[0],
            pair[1]
        );
    }
}
