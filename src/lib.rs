#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # gedcom555: GEDCOM 5.5.5 writer
//!
//! Builds lineage-linked GEDCOM 5.5.5 documents from typed record trees and
//! serializes them to the line format: level numbers, cross-reference
//! pointers, `CONT`/`CONC` continuation lines and the 255-byte line limit.
//!
//! ## Quick Start
//!
//! ### Building a document
//!
//! ```
//! use gedcom555::date::{DatePoint, DateValue};
//! use gedcom555::{Document, NodeBuilder, WriterConfig};
//!
//! let born = DateValue::Date(DatePoint::day(1822, 10, 2)?);
//! let document = Document::builder()
//!     .header(|head| head.text("SOUR", "gedcom.org").pointer("SUBM", "U1"))
//!     .submitter(NodeBuilder::submitter("U1", "Reldon Poulson"))
//!     .record(
//!         NodeBuilder::individual("I1")
//!             .with("NAME", |name| {
//!                 name.value("Robert Eugene /Williams/")
//!                     .text("SURN", "Williams")
//!                     .text("GIVN", "Robert Eugene")
//!             })
//!             .text("SEX", "M")
//!             .with("BIRT", |birth| {
//!                 birth
//!                     .text("DATE", born)
//!                     .text("PLAC", "Weston, Madison, Connecticut")
//!             }),
//!     )
//!     .build()?;
//!
//! let text = gedcom555::to_string(&document, &WriterConfig::default())?;
//! assert!(text.contains("0 @I1@ INDI\n1 NAME Robert Eugene /Williams/\n2 SURN Williams\n"));
//! assert!(text.contains("1 BIRT\n2 DATE 2 OCT 1822\n2 PLAC Weston, Madison, Connecticut\n"));
//! # Ok::<(), gedcom555::GedcomError>(())
//! ```
//!
//! ### Long and multi-line values
//!
//! Values longer than the line budget are split into `CONC` lines, embedded
//! line breaks become `CONT` lines. Both sit one level below their owner.
//!
//! ```
//! use gedcom555::{Document, NodeBuilder, WriterConfig};
//!
//! let document = Document::builder()
//!     .header(|head| head.text("SOUR", "gedcom.org"))
//!     .submitter(NodeBuilder::submitter("U", "gedcom.org"))
//!     .record(NodeBuilder::note("N1", "First line\nSecond line, mail me@home"))
//!     .build()?;
//!
//! let text = gedcom555::to_string(&document, &WriterConfig::default())?;
//! assert!(text.contains("0 @N1@ NOTE First line\n1 CONT Second line, mail me@@home\n"));
//! # Ok::<(), gedcom555::GedcomError>(())
//! ```
//!
//! ### Writing files
//!
//! ```no_run
//! use gedcom555::{write_file, Document, NodeBuilder, WriterConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = Document::builder()
//!     .header(|head| head.text("SOUR", "gedcom.org"))
//!     .submitter(NodeBuilder::submitter("U", "gedcom.org"))
//!     .build()?;
//!
//! // UTF-8 with a byte order mark; the file appears only once fully written.
//! write_file("family.ged", &document, &WriterConfig::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`field_catalog`]: primitive field types and their length bounds
//! - [`grammar`]: the static 5.5.5 node-type table
//! - [`builder`] and [`document`]: grammar-checked tree construction
//! - [`level`], [`chunker`], [`walker`], [`line`]: the serialization pipeline
//! - [`writer`] and [`batch`]: output to strings, streams and files

pub mod batch;
pub mod builder;
pub mod chunker;
pub mod config;
pub mod date;
pub mod document;
pub mod error;
pub mod field_catalog;
pub mod grammar;
pub mod level;
pub mod line;
pub mod node;
pub mod pointer;
pub mod validation;
pub mod walker;
pub mod writer;

pub use batch::serialize_batch;
pub use builder::NodeBuilder;
pub use chunker::LineChunker;
pub use config::WriterConfig;
pub use date::{DatePoint, DateValue};
pub use document::{Document, DocumentBuilder};
pub use error::{GedcomError, Result};
pub use field_catalog::{FieldKind, FieldSpec};
pub use level::{Level, LevelOffset, Position};
pub use line::{LineTerminator, ResolvedLine};
pub use node::{NodeKind, RecordNode, Value};
pub use pointer::PointerId;
pub use validation::{field_bound_issues, FieldIssue, ReferenceValidator};
pub use walker::TreeWalker;
pub use writer::{to_bytes, to_lines, to_string, write_file, GedcomWriter};
