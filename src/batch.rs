//! Parallel serialization of independent documents using Rayon.
//!
//! Each document is serialized on its own by Rayon's work-stealing pool.
//! Documents share nothing mutable: the field catalog and grammar are
//! read-only statics, so no coordination is needed. Results come back in
//! input order.
//!
//! # Examples
//!
//! ```
//! use gedcom555::batch::serialize_batch;
//! use gedcom555::{Document, NodeBuilder, WriterConfig};
//!
//! let documents: Vec<Document> = (0..4)
//!     .map(|i| {
//!         Document::builder()
//!             .header(|head| head.text("SOUR", "batch"))
//!             .submitter(NodeBuilder::submitter(format!("U{i}"), "Batch"))
//!             .build()
//!     })
//!     .collect::<Result<_, _>>()?;
//!
//! let texts = serialize_batch(&documents, &WriterConfig::default());
//! assert_eq!(texts.len(), 4);
//! assert!(texts[2].as_ref().unwrap().contains("0 @U2@ SUBM"));
//! # Ok::<(), gedcom555::GedcomError>(())
//! ```

use crate::config::WriterConfig;
use crate::document::Document;
use crate::error::Result;
use crate::writer;
use rayon::prelude::*;
use tracing::debug;

/// Serialize documents in parallel, one result per document.
///
/// A failing document does not affect the others.
#[must_use]
pub fn serialize_batch(documents: &[Document], config: &WriterConfig) -> Vec<Result<String>> {
    debug!(documents = documents.len(), "serializing batch");
    documents
        .par_iter()
        .map(|document| writer::to_string(document, config))
        .collect()
}

/// Serialize documents in parallel, failing on the first error.
///
/// # Errors
///
/// Returns the error of the earliest failing document in input order.
pub fn serialize_batch_strict(documents: &[Document], config: &WriterConfig) -> Result<Vec<String>> {
    serialize_batch(documents, config).into_iter().collect()
}
