//! Grammar-checked construction of record trees.
//!
//! A [`NodeBuilder`] wraps one [`NodeDef`] and accepts only the values and
//! children the grammar allows for it. Children are addressed by tag: the
//! builder looks through its direct slots first and then descends into
//! tag-less structures, creating the wrapper groups on the way. Single
//! occurrence wrappers are shared, so `DATE` and `PLAC` under one event end
//! up in the same `EVENT_DETAIL` group; repeatable wrappers get a fresh
//! group per child.
//!
//! Builder methods never fail directly. The first violation is kept and
//! returned by [`NodeBuilder::build`].
//!
//! # Examples
//!
//! ```
//! use gedcom555::NodeBuilder;
//!
//! let person = NodeBuilder::individual("I1")
//!     .with("NAME", |name| name.value("Joe /Williams/").text("GIVN", "Joe"))
//!     .text("SEX", "M")
//!     .with("BIRT", |birth| birth.text("DATE", "11 JUN 1861"))
//!     .pointer("FAMC", "F1")
//!     .build()?;
//!
//! assert_eq!(person.pointer.as_ref().map(|p| p.as_str()), Some("I1"));
//! # Ok::<(), gedcom555::GedcomError>(())
//! ```

use crate::error::{GedcomError, Result};
use crate::field_catalog::FieldSpec;
use crate::grammar::{self, NodeDef, Repetition};
use crate::node::{RecordNode, Value};
use crate::pointer::PointerId;

/// GEDCOM version written into new headers.
pub const GEDCOM_VERSION: &str = "5.5.5";
/// Form written into new headers.
pub const GEDCOM_FORM: &str = "LINEAGE-LINKED";
/// Character encoding written into new headers.
pub const CHARACTER_ENCODING: &str = "UTF-8";

#[derive(Debug)]
struct Child {
    slot: usize,
    node: NodeBuilder,
}

/// Fluent builder for one grammar node and its subtree.
#[derive(Debug)]
pub struct NodeBuilder {
    def: &'static NodeDef,
    identity: Option<PointerId>,
    value: Option<(Value, &'static FieldSpec)>,
    children: Vec<Child>,
    error: Option<GedcomError>,
}

impl NodeBuilder {
    /// Start building a node of the given type.
    #[must_use]
    pub fn new(def: &'static NodeDef) -> Self {
        NodeBuilder {
            def,
            identity: None,
            value: None,
            children: Vec::new(),
            error: None,
        }
    }

    /// An `INDI` record.
    #[must_use]
    pub fn individual(id: impl Into<PointerId>) -> Self {
        NodeBuilder::new(&grammar::INDIVIDUAL_RECORD).identity(id)
    }

    /// A `FAM` record.
    #[must_use]
    pub fn family(id: impl Into<PointerId>) -> Self {
        NodeBuilder::new(&grammar::FAM_RECORD).identity(id)
    }

    /// A `SOUR` record.
    #[must_use]
    pub fn source(id: impl Into<PointerId>) -> Self {
        NodeBuilder::new(&grammar::SOURCE_RECORD).identity(id)
    }

    /// A `REPO` record.
    #[must_use]
    pub fn repository(id: impl Into<PointerId>) -> Self {
        NodeBuilder::new(&grammar::REPOSITORY_RECORD).identity(id)
    }

    /// A `NOTE` record with its text.
    #[must_use]
    pub fn note(id: impl Into<PointerId>, text: impl Into<String>) -> Self {
        NodeBuilder::new(&grammar::NOTE_RECORD).identity(id).value(text)
    }

    /// An `OBJE` record.
    #[must_use]
    pub fn multimedia(id: impl Into<PointerId>) -> Self {
        NodeBuilder::new(&grammar::MULTIMEDIA_RECORD).identity(id)
    }

    /// A `SUBM` record with the submitter's name.
    #[must_use]
    pub fn submitter(id: impl Into<PointerId>, name: impl Into<String>) -> Self {
        NodeBuilder::new(&grammar::SUBMITTER_RECORD)
            .identity(id)
            .text("NAME", name)
    }

    /// A `HEAD` with the mandatory GEDCOM 5.5.5 lines already filled in.
    ///
    /// The header extension still needs at least a `SOUR` system id.
    #[must_use]
    pub fn header() -> Self {
        NodeBuilder::new(&grammar::HEAD)
            .with("GEDC", |gedc| {
                gedc.text("VERS", GEDCOM_VERSION)
                    .with("FORM", |form| form.value(GEDCOM_FORM).text("VERS", GEDCOM_VERSION))
            })
            .text("CHAR", CHARACTER_ENCODING)
    }

    /// The node type being built.
    #[must_use]
    pub fn def(&self) -> &'static NodeDef {
        self.def
    }

    /// Declare the record identity.
    #[must_use]
    pub fn identity(mut self, id: impl Into<PointerId>) -> Self {
        if self.def.identity {
            self.identity = Some(id.into());
            self
        } else {
            let label = self.def.label();
            self.fail(invalid(label, "does not declare an identity"))
        }
    }

    /// Set a literal value, bound to the node's literal field.
    #[must_use]
    pub fn value(mut self, text: impl Into<String>) -> Self {
        match self.def.literal_field() {
            Some(field) => {
                self.value = Some((Value::Text(text.into()), field));
                self
            }
            None => {
                let label = self.def.label();
                self.fail(invalid(label, "takes no literal value"))
            }
        }
    }

    /// Set a cross-reference value, bound to the node's `XREF_*` field.
    #[must_use]
    pub fn reference(mut self, target: impl Into<PointerId>) -> Self {
        match self.def.reference_field() {
            Some(field) => {
                self.value = Some((Value::Pointer(target.into()), field));
                self
            }
            None => {
                let label = self.def.label();
                self.fail(invalid(label, "takes no cross-reference"))
            }
        }
    }

    /// Add a child by tag and configure it with `build`.
    #[must_use]
    pub fn with<F>(self, tag: &str, build: F) -> Self
    where
        F: FnOnce(NodeBuilder) -> NodeBuilder,
    {
        if self.error.is_some() {
            return self;
        }
        match self.def.path_to_tag(tag) {
            Some(path) => {
                let child = build(NodeBuilder::new(self.def_at(&path)));
                self.attach(&path, child)
            }
            None => {
                let parent = self.def.name;
                self.fail(GedcomError::UnknownSubstructure {
                    parent,
                    child: tag.to_string(),
                })
            }
        }
    }

    /// Add a child by tag with a literal value.
    #[must_use]
    pub fn text(self, tag: &str, value: impl Into<String>) -> Self {
        self.with(tag, |child| child.value(value))
    }

    /// Add a child by tag with a cross-reference value.
    #[must_use]
    pub fn pointer(self, tag: &str, target: impl Into<PointerId>) -> Self {
        self.with(tag, |child| child.reference(target))
    }

    /// Add a child that was built separately.
    ///
    /// This also accepts tag-less structures, which forces a new wrapper
    /// group instead of sharing an existing one.
    #[must_use]
    pub fn child(self, child: NodeBuilder) -> Self {
        if self.error.is_some() {
            return self;
        }
        match self.def.path_to_def(child.def) {
            Some(path) => self.attach(&path, child),
            None => {
                let parent = self.def.name;
                let name = child.def.name.to_string();
                self.fail(GedcomError::UnknownSubstructure { parent, child: name })
            }
        }
    }

    /// Check the subtree against the grammar and produce the node.
    ///
    /// # Errors
    ///
    /// Returns the first violation recorded while building, or
    /// [`GedcomError::MissingSubstructure`] / [`GedcomError::InvalidValue`]
    /// when a required child, value or identity is absent.
    pub fn build(self) -> Result<RecordNode> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let def = self.def;
        if def.identity && self.identity.is_none() {
            return Err(invalid(def.label(), "record identity required"));
        }
        if def.value_required && self.value.is_none() {
            return Err(invalid(def.label(), "value required"));
        }
        for (index, slot) in def.slots.iter().enumerate() {
            if slot.repetition == Repetition::Required && !self.children.iter().any(|c| c.slot == index) {
                return Err(GedcomError::MissingSubstructure {
                    parent: def.name,
                    child: slot.def.name,
                });
            }
        }

        let (value, field) = match self.value {
            Some((value, field)) => (Some(value), Some(field)),
            None => (None, None),
        };
        let children = self
            .children
            .into_iter()
            .map(|child| child.node.build())
            .collect::<Result<Vec<_>>>()?;

        Ok(RecordNode {
            tag: def.tag.map(str::to_string),
            pointer: self.identity,
            value,
            field,
            level_offset: def.level_offset,
            children,
        })
    }

    fn def_at(&self, path: &[usize]) -> &'static NodeDef {
        path.iter().fold(self.def, |def, &index| def.slots[index].def)
    }

    fn attach(mut self, path: &[usize], child: NodeBuilder) -> Self {
        if let Err(err) = self.insert(path, child) {
            self.error = Some(err);
        }
        self
    }

    fn insert(&mut self, path: &[usize], node: NodeBuilder) -> Result<()> {
        let Some((&index, rest)) = path.split_first() else {
            return Ok(());
        };
        let slot = &self.def.slots[index];
        let existing = self.children.iter().position(|c| c.slot == index);

        if rest.is_empty() {
            if slot.repetition.is_single() && existing.is_some() {
                return Err(GedcomError::RepeatedSubstructure {
                    parent: self.def.name,
                    child: slot.def.name,
                });
            }
            self.children.push(Child { slot: index, node });
            return Ok(());
        }

        let position = match existing {
            Some(position) if slot.repetition.is_single() => position,
            _ => {
                self.children.push(Child {
                    slot: index,
                    node: NodeBuilder::new(slot.def),
                });
                self.children.len() - 1
            }
        };
        self.children[position].node.insert(rest, node)
    }

    fn fail(mut self, err: GedcomError) -> Self {
        if self.error.is_none() {
            self.error = Some(err);
        }
        self
    }
}

fn invalid(tag: &str, reason: &str) -> GedcomError {
    GedcomError::InvalidValue {
        tag: tag.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelOffset;

    fn tags(node: &RecordNode) -> Vec<&str> {
        node.tagged().filter_map(|n| n.tag.as_deref()).collect()
    }

    #[test]
    fn test_header_prefill() {
        let head = NodeBuilder::header().build().unwrap();
        assert_eq!(tags(&head), vec!["HEAD", "GEDC", "VERS", "FORM", "VERS", "CHAR"]);
        assert_eq!(head.level_offset, LevelOffset::Transparent);
    }

    #[test]
    fn test_shared_wrapper_groups_event_detail() {
        let birth = NodeBuilder::new(&grammar::INDI_BIRT)
            .text("DATE", "2 OCT 1822")
            .text("PLAC", "Weston")
            .build()
            .unwrap();
        // BIRT > INDIVIDUAL_EVENT_DETAIL > EVENT_DETAIL > {DATE, PLACE_STRUCTURE > PLAC}
        assert_eq!(birth.children.len(), 1);
        let detail = &birth.children[0].children[0];
        assert!(detail.is_group());
        assert_eq!(detail.children.len(), 2);
        assert_eq!(tags(&birth), vec!["BIRT", "DATE", "PLAC"]);
    }

    #[test]
    fn test_repeatable_wrapper_per_occurrence() {
        let person = NodeBuilder::individual("I1")
            .pointer("FAMS", "F1")
            .pointer("FAMS", "F2")
            .build()
            .unwrap();
        assert_eq!(person.children.len(), 2);
        assert!(person.children.iter().all(RecordNode::is_group));
    }

    #[test]
    fn test_reference_binds_xref_field() {
        let family = NodeBuilder::family("F1").pointer("HUSB", "I1").build().unwrap();
        let husband = &family.children[0];
        assert_eq!(husband.value, Some(Value::Pointer(PointerId::new("I1"))));
        assert_eq!(husband.field.map(|f| f.name), Some("XREF_INDI"));
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = NodeBuilder::individual("I1").text("FOO", "x").build().unwrap_err();
        assert!(matches!(err, GedcomError::UnknownSubstructure { parent: "INDIVIDUAL_RECORD", .. }));
    }

    #[test]
    fn test_single_slot_cannot_repeat() {
        let err = NodeBuilder::individual("I1")
            .text("SEX", "M")
            .text("SEX", "F")
            .build()
            .unwrap_err();
        assert!(matches!(err, GedcomError::RepeatedSubstructure { child: "SEX", .. }));
    }

    #[test]
    fn test_missing_required_child() {
        let err = NodeBuilder::new(&grammar::REPOSITORY_RECORD)
            .identity("R1")
            .build()
            .unwrap_err();
        assert!(matches!(err, GedcomError::MissingSubstructure { child: "REPOSITORY_NAME", .. }));
    }

    #[test]
    fn test_records_need_identity() {
        let err = NodeBuilder::new(&grammar::FAM_RECORD).build().unwrap_err();
        assert!(matches!(err, GedcomError::InvalidValue { .. }));
    }

    #[test]
    fn test_value_on_valueless_tag() {
        let err = NodeBuilder::header().value("x").build().unwrap_err();
        assert!(matches!(err, GedcomError::InvalidValue { .. }));
    }

    #[test]
    fn test_first_error_wins() {
        let err = NodeBuilder::individual("I1")
            .text("FOO", "x")
            .text("SEX", "M")
            .text("SEX", "F")
            .build()
            .unwrap_err();
        assert!(matches!(err, GedcomError::UnknownSubstructure { .. }));
    }

    #[test]
    fn test_child_accepts_structure() {
        let detail = NodeBuilder::new(&grammar::EVENT_DETAIL).text("DATE", "1900");
        let death = NodeBuilder::new(&grammar::INDI_DEAT).child(detail).build().unwrap();
        assert_eq!(tags(&death), vec!["DEAT", "DATE"]);
    }
}
