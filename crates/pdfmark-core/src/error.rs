use thiserror::Error;

/// Fatal annotation errors. Non-fatal conditions (missing form field,
/// unusable signature image) are reported as [`crate::Skipped`] outcomes
/// instead of errors, so callers can tell "skipped" apart from "failed".
#[derive(Error, Debug)]
pub enum PdfMarkError {
    #[error("failed to parse source document: {0}")]
    InvalidInput(String),

    #[error("annotation targets page {page} but document has {total} pages")]
    PageOutOfRange { page: u32, total: u32 },

    #[error("serialized output failed validation: {0}")]
    OutputInvalid(String),
}
