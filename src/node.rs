//! The record tree.
//!
//! A [`RecordNode`] is either a tagged node, which emits one GEDCOM line
//! (plus any continuation lines), or a tag-less group, which emits nothing
//! and only organises its children. Children are kept in insertion order
//! and are emitted exactly in that order.
//!
//! Trees are normally built through [`crate::NodeBuilder`], which checks
//! them against the grammar. The plain constructors here build trees
//! directly, for callers that manage structure themselves.

use crate::field_catalog::{self, FieldSpec};
use crate::level::LevelOffset;
use crate::pointer::PointerId;
use serde::{Deserialize, Serialize};

/// Payload of a tagged node's line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Literal text; escaped and chunked on output
    Text(String),
    /// Reference to another record's identity; emitted verbatim as `@id@`
    Pointer(PointerId),
}

impl Value {
    /// Whether this is an empty text value.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Value::Text(text) if text.is_empty())
    }
}

/// What a node contributes to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// No tag: emits nothing itself
    Group,
    /// A tag with neither identity nor value (`0 HEAD`)
    Tag,
    /// A tag declaring an identity (`0 @I1@ INDI`)
    Pointer,
    /// A tag with a value (`1 SEX M`, `1 HUSB @I1@`)
    Value,
}

/// One node of a record tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordNode {
    /// Tag emitted for this node; `None` for a group
    pub tag: Option<String>,
    /// Identity declared by this node (record roots)
    pub pointer: Option<PointerId>,
    /// Line payload
    pub value: Option<Value>,
    /// Field specification governing the value, if known
    #[serde(default, with = "field_catalog::by_name")]
    pub field: Option<&'static FieldSpec>,
    /// Level shift relative to the parent
    pub level_offset: LevelOffset,
    /// Children in output order
    pub children: Vec<RecordNode>,
}

impl RecordNode {
    /// Create a tagged node one level below its parent.
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        RecordNode {
            tag: Some(tag.into()),
            pointer: None,
            value: None,
            field: None,
            level_offset: LevelOffset::Nested,
            children: Vec::new(),
        }
    }

    /// Create a transparent group.
    #[must_use]
    pub fn group() -> Self {
        RecordNode {
            tag: None,
            pointer: None,
            value: None,
            field: None,
            level_offset: LevelOffset::Transparent,
            children: Vec::new(),
        }
    }

    /// Set the identity this node declares.
    #[must_use]
    pub fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = Some(pointer);
        self
    }

    /// Set a literal text value.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.value = Some(Value::Text(text.into()));
        self
    }

    /// Set a reference value.
    #[must_use]
    pub fn with_reference(mut self, target: PointerId) -> Self {
        self.value = Some(Value::Pointer(target));
        self
    }

    /// Bind the field specification that governs the value.
    #[must_use]
    pub fn with_field(mut self, field: &'static FieldSpec) -> Self {
        self.field = Some(field);
        self
    }

    /// Override the level offset.
    #[must_use]
    pub fn with_level_offset(mut self, offset: LevelOffset) -> Self {
        self.level_offset = offset;
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: RecordNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child in place.
    pub fn push_child(&mut self, child: RecordNode) {
        self.children.push(child);
    }

    /// Classify the node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match (&self.tag, &self.pointer, &self.value) {
            (None, _, _) => NodeKind::Group,
            (Some(_), _, Some(value)) if !value.is_empty_text() => NodeKind::Value,
            (Some(_), Some(_), _) => NodeKind::Pointer,
            (Some(_), None, _) => NodeKind::Tag,
        }
    }

    /// Whether this node is a tag-less group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.tag.is_none()
    }

    /// Iterate over the tagged descendants (including `self`) in output order.
    pub fn tagged(&self) -> impl Iterator<Item = &RecordNode> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || loop {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            if !node.is_group() {
                return Some(node);
            }
        })
    }
}
