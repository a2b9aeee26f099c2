//! Opt-in checks on a record tree.
//!
//! Serialization never runs these by itself. [`ReferenceValidator`] checks
//! that identities are unique and well formed and that every cross-reference
//! value names one of them; [`crate::writer`] runs it first when
//! [`crate::WriterConfig::validate_references`] is set.
//! [`field_bound_issues`] reports values outside their field's length
//! bounds without rejecting anything.

use crate::document::Document;
use crate::error::{GedcomError, Result};
use crate::field_catalog::FieldSpec;
use crate::node::{RecordNode, Value};
use std::collections::HashSet;
use std::fmt;

/// Cross-reference checks for whole documents.
#[derive(Debug)]
pub struct ReferenceValidator;

impl ReferenceValidator {
    /// Check identities and references of a document.
    ///
    /// # Errors
    ///
    /// - [`GedcomError::InvalidValue`] for an identity that is not 1 to 20
    ///   alphanumerics
    /// - [`GedcomError::DuplicatePointer`] for an identity declared twice
    /// - [`GedcomError::UnresolvedPointerReference`] for a reference to an
    ///   undeclared identity
    pub fn validate(document: &Document) -> Result<()> {
        Self::validate_tree(document.root())
    }

    /// Check identities and references of any tree.
    ///
    /// # Errors
    ///
    /// Same as [`ReferenceValidator::validate`].
    pub fn validate_tree(root: &RecordNode) -> Result<()> {
        let mut declared = HashSet::new();
        for node in root.tagged() {
            let Some(id) = &node.pointer else { continue };
            if !id.is_well_formed() {
                return Err(GedcomError::InvalidValue {
                    tag: node.tag.clone().unwrap_or_default(),
                    reason: format!("malformed identity {id}"),
                });
            }
            if !declared.insert(id.as_str()) {
                return Err(GedcomError::DuplicatePointer(id.as_str().to_string()));
            }
        }

        for node in root.tagged() {
            if let Some(Value::Pointer(target)) = &node.value {
                if !declared.contains(target.as_str()) {
                    return Err(GedcomError::UnresolvedPointerReference {
                        tag: node.tag.clone().unwrap_or_default(),
                        pointer: target.as_str().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Whether [`ReferenceValidator::validate`] would succeed.
    #[must_use]
    pub fn is_valid(document: &Document) -> bool {
        Self::validate(document).is_ok()
    }
}

/// Which bound a value falls outside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Shorter than the minimum
    BelowMinimum,
    /// Longer than the maximum
    AboveMaximum,
}

/// A text value outside its field's declared length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Tag of the line carrying the value
    pub tag: String,
    /// Governing field
    pub field: &'static FieldSpec,
    /// Value length in characters
    pub length: usize,
    /// Bound that was crossed
    pub bound: Bound,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (relation, limit) = match self.bound {
            Bound::BelowMinimum => ("under", self.field.min_len),
            Bound::AboveMaximum => ("over", self.field.max_len),
        };
        write!(
            f,
            "{}: {} characters is {relation} the {} limit of {limit}",
            self.tag, self.length, self.field.name
        )
    }
}

/// List every text value whose length is outside its field's bounds.
///
/// Empty values are skipped since they produce no output. Values without a
/// known field are never reported.
#[must_use]
pub fn field_bound_issues(root: &RecordNode) -> Vec<FieldIssue> {
    root.tagged()
        .filter_map(|node| {
            let (Some(Value::Text(text)), Some(field)) = (&node.value, node.field) else {
                return None;
            };
            if text.is_empty() {
                return None;
            }
            let length = text.chars().count();
            let bound = if length < field.min_len {
                Bound::BelowMinimum
            } else if length > field.max_len {
                Bound::AboveMaximum
            } else {
                return None;
            };
            Some(FieldIssue {
                tag: node.tag.clone().unwrap_or_default(),
                field,
                length,
                bound,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NodeBuilder;

    fn document(records: Vec<NodeBuilder>) -> Result<Document> {
        Document::builder()
            .header(|head| head.text("SOUR", "test").pointer("SUBM", "U1"))
            .submitter(NodeBuilder::submitter("U1", "Tester"))
            .records(records)
            .build()
    }

    #[test]
    fn test_resolved_references_pass() {
        let doc = document(vec![
            NodeBuilder::individual("I1").pointer("FAMS", "F1"),
            NodeBuilder::family("F1").pointer("HUSB", "I1"),
        ])
        .unwrap();
        assert!(ReferenceValidator::is_valid(&doc));
    }

    #[test]
    fn test_unresolved_reference() {
        let doc = document(vec![NodeBuilder::family("F1").pointer("CHIL", "I9")]).unwrap();
        let err = ReferenceValidator::validate(&doc).unwrap_err();
        assert!(matches!(
            err,
            GedcomError::UnresolvedPointerReference { ref tag, ref pointer } if tag == "CHIL" && pointer == "I9"
        ));
    }

    #[test]
    fn test_duplicate_identity() {
        let doc = document(vec![NodeBuilder::individual("I1"), NodeBuilder::family("I1")]).unwrap();
        assert!(matches!(
            ReferenceValidator::validate(&doc),
            Err(GedcomError::DuplicatePointer(id)) if id == "I1"
        ));
    }

    #[test]
    fn test_malformed_identity() {
        let doc = document(vec![NodeBuilder::individual("I-1")]).unwrap();
        assert!(matches!(
            ReferenceValidator::validate(&doc),
            Err(GedcomError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_field_bounds_are_descriptive() {
        let person = NodeBuilder::individual("I1")
            .text("SEX", "MALE")
            .text("OCCU", "x".repeat(100))
            .build()
            .unwrap();
        let issues = field_bound_issues(&person);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].tag, "SEX");
        assert_eq!(issues[1].bound, Bound::AboveMaximum);
        assert!(issues[1].to_string().contains("OCCUPATION"));
    }
}
