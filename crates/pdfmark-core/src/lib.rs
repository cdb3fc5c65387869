//! PDF annotation and signing engine.
//!
//! Transforms a source PDF plus an accumulated [`SigningJob`] into a new
//! document with checkmarks stroked, a signature raster composited, or a
//! form field set to a checked state. Deterministic, stateless, and
//! all-or-nothing: page validation happens before any mutation, and the
//! source bytes are never touched.

pub mod annotator;
pub mod coords;
pub mod document;
pub mod error;
pub mod image;
pub mod job;

#[cfg(test)]
pub(crate) mod testutil;

pub use annotator::{AnnotatedOutput, PdfAnnotator, Skipped};
pub use document::PdfDocument;
pub use error::PdfMarkError;
pub use image::{ImageError, SignatureImage};
pub use job::{AnnotationRequest, Point, SigningJob};

/// Parse PDF bytes and return the page count.
pub fn page_count(bytes: &[u8]) -> Result<u32, PdfMarkError> {
    Ok(PdfDocument::from_bytes(bytes)?.page_count())
}
