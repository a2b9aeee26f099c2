//! Whole GEDCOM documents.
//!
//! A [`Document`] owns the root group of a lineage-linked file. The usual
//! way to make one is [`DocumentBuilder`], which starts from a standard
//! 5.5.5 header, takes a submitter and any number of records, and closes
//! the file with a trailer.

use crate::builder::NodeBuilder;
use crate::error::Result;
use crate::grammar;
use crate::node::RecordNode;
use crate::pointer::PointerId;
use serde::{Deserialize, Serialize};

/// One GEDCOM document ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    root: RecordNode,
}

impl Document {
    /// Start assembling a document with a standard header.
    ///
    /// # Examples
    ///
    /// ```
    /// use gedcom555::{Document, NodeBuilder};
    ///
    /// let document = Document::builder()
    ///     .header(|head| head.text("SOUR", "gedcom.org"))
    ///     .submitter(NodeBuilder::submitter("U", "gedcom.org"))
    ///     .build()?;
    ///
    /// let text = gedcom555::to_string(&document, &Default::default())?;
    /// assert!(text.starts_with("0 HEAD\n1 GEDC\n"));
    /// assert!(text.ends_with("0 TRLR\n"));
    /// # Ok::<(), gedcom555::GedcomError>(())
    /// ```
    #[must_use]
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// Wrap a tree built by hand. Its direct children are treated as
    /// document sections.
    #[must_use]
    pub fn from_root(root: RecordNode) -> Self {
        Document { root }
    }

    /// The root of the tree.
    #[must_use]
    pub fn root(&self) -> &RecordNode {
        &self.root
    }

    /// Take ownership of the tree.
    #[must_use]
    pub fn into_root(self) -> RecordNode {
        self.root
    }

    /// Identities declared by record roots, in document order.
    pub fn identities(&self) -> impl Iterator<Item = &PointerId> + '_ {
        self.root.tagged().filter_map(|node| node.pointer.as_ref())
    }
}

/// Assembles a [`Document`] from header, submitter and records.
#[derive(Debug)]
pub struct DocumentBuilder {
    header: NodeBuilder,
    submitter: Option<NodeBuilder>,
    records: Vec<NodeBuilder>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// A builder with the standard 5.5.5 header and nothing else.
    #[must_use]
    pub fn new() -> Self {
        DocumentBuilder {
            header: NodeBuilder::header(),
            submitter: None,
            records: Vec::new(),
        }
    }

    /// Extend the header.
    #[must_use]
    pub fn header<F>(mut self, build: F) -> Self
    where
        F: FnOnce(NodeBuilder) -> NodeBuilder,
    {
        self.header = build(self.header);
        self
    }

    /// Set the submitter record.
    #[must_use]
    pub fn submitter(mut self, submitter: NodeBuilder) -> Self {
        self.submitter = Some(submitter);
        self
    }

    /// Append a record. Records are emitted in the order they are added.
    #[must_use]
    pub fn record(mut self, record: NodeBuilder) -> Self {
        self.records.push(record);
        self
    }

    /// Append several records.
    #[must_use]
    pub fn records<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = NodeBuilder>,
    {
        self.records.extend(records);
        self
    }

    /// Check everything against the grammar and assemble the tree.
    ///
    /// # Errors
    ///
    /// Returns the first grammar violation found, including
    /// [`crate::GedcomError::MissingSubstructure`] when no submitter was set.
    pub fn build(self) -> Result<Document> {
        let mut root = NodeBuilder::new(&grammar::LINEAGE_LINKED_GEDCOM_FILE).child(self.header);
        if let Some(submitter) = self.submitter {
            root = root.child(submitter);
        }
        for record in self.records {
            root = root.child(record);
        }
        let root = root.child(NodeBuilder::new(&grammar::TRLR)).build()?;
        Ok(Document { root })
    }
}
