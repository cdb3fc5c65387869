//! The annotation engine: validation, form-field, checkmark, and signature
//! passes over an in-memory working copy, serialized only once every pass
//! has succeeded.

use tracing::warn;

use crate::coords::clamp_anchor;
use crate::document::PdfDocument;
use crate::error::PdfMarkError;
use crate::image::SignatureImage;
use crate::job::{AnnotationRequest, Point, SigningJob};

/// Checkmark glyph: a three-point polyline spanning a 40x40 box, stroked
/// with a round cap.
const CHECK_GLYPH_EXTENT: f64 = 40.0;
const CHECK_STROKE_WIDTH: f64 = 4.0;

/// Non-fatal conditions encountered while processing a job. The output is
/// still produced; these tell the caller what was left out and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skipped {
    /// The selected form field does not exist in the document.
    FieldNotFound { field_name: String },
    /// A signature stamp carried an empty or undecodable image.
    UnusableSignatureImage { page: u32, reason: String },
}

/// A successfully annotated document plus any non-fatal skips.
#[derive(Debug)]
pub struct AnnotatedOutput {
    pub bytes: Vec<u8>,
    pub page_count: u32,
    pub skipped: Vec<Skipped>,
}

/// Stateless annotation engine. Every [`execute`](PdfAnnotator::execute)
/// call is independent; the source bytes are never mutated.
pub struct PdfAnnotator;

impl PdfAnnotator {
    /// Apply a signing job to a source document.
    ///
    /// Fails fast with [`PdfMarkError::PageOutOfRange`] before any drawing
    /// when a positional request targets a page outside `[1, total]`; the
    /// whole job is rejected, not just the offending request. Missing form
    /// fields and unusable signature images are skipped, not fatal.
    pub fn execute(source: &[u8], job: &SigningJob) -> Result<AnnotatedOutput, PdfMarkError> {
        let mut doc = PdfDocument::from_bytes(source)?;
        let total = doc.page_count();

        // Page validation precedes any mutation: all-or-nothing.
        for request in &job.requests {
            if let Some(page) = request.page() {
                if page < 1 || page > total {
                    return Err(PdfMarkError::PageOutOfRange { page, total });
                }
            }
        }

        let mut skipped = Vec::new();

        for field_name in job.form_field_names() {
            match doc.check_form_field(field_name)? {
                Some(value) => {
                    tracing::debug!(field_name, value, "checked form field");
                }
                None => {
                    warn!(field_name, "form field not found, skipping");
                    skipped.push(Skipped::FieldNotFound {
                        field_name: field_name.to_string(),
                    });
                }
            }
        }

        // Freehand checkmarks are the fallback for documents without a
        // usable form field; a selected field supersedes them.
        if job.selected_form_field.is_none() {
            for request in &job.requests {
                if let AnnotationRequest::CheckMark { page, position } = request {
                    Self::draw_checkmark(&mut doc, *page, *position)?;
                }
            }
        }

        let mut stamp_index = 0u32;
        for request in &job.requests {
            if let AnnotationRequest::SignatureStamp {
                page,
                position,
                image,
            } = request
            {
                match SignatureImage::from_png_bytes(image) {
                    Ok(decoded) => {
                        Self::draw_signature(&mut doc, *page, *position, &decoded, stamp_index)?;
                        stamp_index += 1;
                    }
                    Err(e) => {
                        warn!(page, error = %e, "unusable signature image, skipping");
                        skipped.push(Skipped::UnusableSignatureImage {
                            page: *page,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        let bytes = doc.save_to_bytes()?;

        // Postcondition: the output must independently re-parse and keep
        // the source's page count.
        let reparsed = PdfDocument::from_bytes(&bytes)
            .map_err(|e| PdfMarkError::OutputInvalid(e.to_string()))?;
        if reparsed.page_count() != total {
            return Err(PdfMarkError::OutputInvalid(format!(
                "page count changed from {total} to {}",
                reparsed.page_count()
            )));
        }

        Ok(AnnotatedOutput {
            bytes,
            page_count: total,
            skipped,
        })
    }

    fn draw_checkmark(
        doc: &mut PdfDocument,
        page: u32,
        position: Point,
    ) -> Result<(), PdfMarkError> {
        let (page_w, page_h) = doc.page_size(page)?;
        let anchor = clamp_anchor(position, page_w, page_h, CHECK_GLYPH_EXTENT, CHECK_GLYPH_EXTENT);

        let ops = format!(
            "q\n\
             0 G\n\
             {w} w\n\
             1 J\n\
             {x0} {y0} m\n\
             {x1} {y1} l\n\
             {x2} {y2} l\n\
             S\n\
             Q",
            w = CHECK_STROKE_WIDTH,
            x0 = anchor.x,
            y0 = anchor.y,
            x1 = anchor.x + 20.0,
            y1 = anchor.y - 20.0,
            x2 = anchor.x + 40.0,
            y2 = anchor.y + 20.0,
        );
        doc.append_content(page, ops.into_bytes())
    }

    fn draw_signature(
        doc: &mut PdfDocument,
        page: u32,
        position: Point,
        image: &SignatureImage,
        index: u32,
    ) -> Result<(), PdfMarkError> {
        let (page_w, page_h) = doc.page_size(page)?;
        let (img_w, img_h) = (image.width as f64, image.height as f64);
        let anchor = clamp_anchor(position, page_w, page_h, img_w, img_h);

        let name = format!("TdSig{index}");
        doc.register_image(page, &name, image)?;

        // Composite at natural size: one image pixel per PDF unit.
        let ops = format!(
            "q\n{img_w} 0 0 {img_h} {x} {y} cm\n/{name} Do\nQ",
            x = anchor.x,
            y = anchor.y,
        );
        doc.append_content(page, ops.into_bytes())
    }
}
