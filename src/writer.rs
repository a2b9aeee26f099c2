//! Serializing documents to text, bytes, streams and files.
//!
//! Every entry point renders the whole document in memory before anything
//! reaches its destination, so a failed serialization never leaves partial
//! output behind.
//!
//! # Examples
//!
//! ```
//! use gedcom555::{Document, GedcomWriter, NodeBuilder, WriterConfig};
//!
//! let document = Document::builder()
//!     .header(|head| head.text("SOUR", "gedcom.org"))
//!     .submitter(NodeBuilder::submitter("U", "gedcom.org"))
//!     .build()?;
//!
//! let mut buffer = Vec::new();
//! let mut writer = GedcomWriter::new(&mut buffer, WriterConfig::default());
//! writer.write_document(&document)?;
//! writer.finish()?;
//! assert_eq!(writer.documents_written(), 1);
//! assert!(buffer.starts_with(&[0xEF, 0xBB, 0xBF, b'0']));
//! # Ok::<(), gedcom555::GedcomError>(())
//! ```

use crate::config::WriterConfig;
use crate::document::Document;
use crate::error::{GedcomError, Result};
use crate::line::{self, ResolvedLine};
use crate::validation::ReferenceValidator;
use crate::walker::TreeWalker;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// UTF-8 byte order mark.
pub const BYTE_ORDER_MARK: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Resolve a document into lines.
///
/// Runs reference validation first when the configuration asks for it.
///
/// # Errors
///
/// Returns the first validation, level or chunking error.
pub fn to_lines(document: &Document, config: &WriterConfig) -> Result<Vec<ResolvedLine>> {
    if config.validate_references {
        ReferenceValidator::validate(document)?;
    }
    TreeWalker::new(config).walk_document(document)
}

/// Render a document as text, without a byte order mark.
///
/// # Errors
///
/// Same as [`to_lines`].
pub fn to_string(document: &Document, config: &WriterConfig) -> Result<String> {
    let lines = to_lines(document, config)?;
    Ok(line::render_all(&lines, config.line_terminator))
}

/// Render a document as UTF-8 bytes, with a byte order mark if configured.
///
/// # Errors
///
/// Same as [`to_lines`].
pub fn to_bytes(document: &Document, config: &WriterConfig) -> Result<Vec<u8>> {
    let text = to_string(document, config)?;
    let mut bytes = Vec::with_capacity(text.len() + BYTE_ORDER_MARK.len());
    if config.byte_order_mark {
        bytes.extend_from_slice(&BYTE_ORDER_MARK);
    }
    bytes.extend_from_slice(text.as_bytes());
    Ok(bytes)
}

/// Write a document to `path`, replacing any existing file.
///
/// The output is rendered fully, written to a temporary file next to the
/// destination and then renamed into place. On any error the destination
/// is left untouched.
///
/// # Errors
///
/// Returns serialization errors before touching the filesystem, and
/// [`GedcomError::IoError`] if the file cannot be written or renamed.
pub fn write_file(path: impl AsRef<Path>, document: &Document, config: &WriterConfig) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(document, config)?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| GedcomError::IoError(err.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote GEDCOM file");
    Ok(())
}

/// Streams documents to any [`std::io::Write`] destination.
///
/// The byte order mark, when configured, is written once before the first
/// document.
#[derive(Debug)]
pub struct GedcomWriter<W: Write> {
    writer: W,
    config: WriterConfig,
    documents_written: usize,
    finished: bool,
}

impl<W: Write> GedcomWriter<W> {
    /// Create a writer over `writer`.
    pub fn new(writer: W, config: WriterConfig) -> Self {
        GedcomWriter {
            writer,
            config,
            documents_written: 0,
            finished: false,
        }
    }

    /// Serialize one document and write it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The writer has been finished
    /// - The document fails to serialize (nothing is written)
    /// - An I/O error occurs during writing
    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        if self.finished {
            return Err(GedcomError::WriterFinished(
                "cannot write to a finished writer".to_string(),
            ));
        }

        let text = to_string(document, &self.config)?;
        if self.config.byte_order_mark && self.documents_written == 0 {
            self.writer.write_all(&BYTE_ORDER_MARK)?;
        }
        self.writer.write_all(text.as_bytes())?;

        self.documents_written += 1;
        Ok(())
    }

    /// Flush the writer and mark it as finished.
    ///
    /// After calling `finish`, no more documents can be written.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing the underlying writer fails.
    pub fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }

    /// Returns the number of documents written so far.
    #[must_use]
    pub fn documents_written(&self) -> usize {
        self.documents_written
    }

    /// Recover the underlying destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NodeBuilder;
    use crate::line::LineTerminator;

    fn minimal() -> Document {
        Document::builder()
            .header(|head| head.text("SOUR", "gedcom.org"))
            .submitter(NodeBuilder::submitter("U", "gedcom.org"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_string_has_no_bom() {
        let text = to_string(&minimal(), &WriterConfig::default()).unwrap();
        assert!(text.starts_with("0 HEAD\n"));
        assert!(text.ends_with("0 TRLR\n"));
    }

    #[test]
    fn test_bytes_bom_follows_config() {
        let with = to_bytes(&minimal(), &WriterConfig::default()).unwrap();
        assert_eq!(&with[..3], &BYTE_ORDER_MARK);
        let without = to_bytes(&minimal(), &WriterConfig::default().with_byte_order_mark(false)).unwrap();
        assert_eq!(without[0], b'0');
    }

    #[test]
    fn test_terminator_applies_to_every_line() {
        let config = WriterConfig::default().with_line_terminator(LineTerminator::CrLf);
        let text = to_string(&minimal(), &config).unwrap();
        assert_eq!(text.matches("\r\n").count(), text.matches('\n').count());
    }

    #[test]
    fn test_reference_validation_is_opt_in() {
        let document = Document::builder()
            .header(|head| head.text("SOUR", "x").pointer("SUBM", "NOBODY"))
            .submitter(NodeBuilder::submitter("U", "x"))
            .build()
            .unwrap();
        assert!(to_string(&document, &WriterConfig::default()).is_ok());
        let strict = WriterConfig::default().with_reference_validation(true);
        assert!(matches!(
            to_string(&document, &strict),
            Err(GedcomError::UnresolvedPointerReference { .. })
        ));
    }

    #[test]
    fn test_stream_writer_counts_and_finishes() {
        let mut writer = GedcomWriter::new(Vec::new(), WriterConfig::default());
        writer.write_document(&minimal()).unwrap();
        writer.write_document(&minimal()).unwrap();
        assert_eq!(writer.documents_written(), 2);
        writer.finish().unwrap();
        assert!(matches!(
            writer.write_document(&minimal()),
            Err(GedcomError::WriterFinished(_))
        ));
        assert_eq!(writer.documents_written(), 2);

        let bytes = writer.into_inner();
        let boms = bytes.windows(3).filter(|w| *w == BYTE_ORDER_MARK).count();
        assert_eq!(boms, 1);
    }

    #[test]
    fn test_failed_document_writes_nothing() {
        let document = Document::builder()
            .header(|head| head.text("SOUR", "x"))
            .submitter(NodeBuilder::submitter("U", "x"))
            .record(NodeBuilder::source("S1").with("REPO", |repo| {
                repo.reference("R1").text("CALN", "c".repeat(300))
            }))
            .build()
            .unwrap();
        let mut writer = GedcomWriter::new(Vec::new(), WriterConfig::default());
        assert!(matches!(
            writer.write_document(&document),
            Err(GedcomError::FieldLengthPolicyViolation { .. })
        ));
        assert_eq!(writer.documents_written(), 0);
        assert!(writer.into_inner().is_empty());
    }
}
