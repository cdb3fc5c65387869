//! Plain data consumed by the annotator.

/// A position in PDF user-space units (origin bottom-left).
///
/// Callers working in UI space convert taps with [`crate::coords::ui_to_pdf`]
/// before building requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One mark to apply to the document. Pages are 1-indexed.
#[derive(Debug, Clone)]
pub enum AnnotationRequest {
    /// A fixed-geometry checkmark glyph stroked at `position`.
    CheckMark { page: u32, position: Point },
    /// A raster signature (PNG bytes) composited at `position`.
    SignatureStamp {
        page: u32,
        position: Point,
        image: Vec<u8>,
    },
    /// Set the named AcroForm field to a checked state.
    FormFieldCheck { field_name: String },
}

impl AnnotationRequest {
    /// Page targeted by a positional request, if any.
    pub fn page(&self) -> Option<u32> {
        match self {
            AnnotationRequest::CheckMark { page, .. }
            | AnnotationRequest::SignatureStamp { page, .. } => Some(*page),
            AnnotationRequest::FormFieldCheck { .. } => None,
        }
    }
}

/// One signing session's worth of accumulated marks.
///
/// Consumed exactly once by [`crate::PdfAnnotator::execute`]; no state is
/// retained between invocations.
#[derive(Debug, Clone, Default)]
pub struct SigningJob {
    pub requests: Vec<AnnotationRequest>,
    /// When set, the named form field is checked instead of drawing
    /// freehand checkmarks.
    pub selected_form_field: Option<String>,
}

impl SigningJob {
    pub fn new(requests: Vec<AnnotationRequest>) -> Self {
        Self {
            requests,
            selected_form_field: None,
        }
    }

    pub fn with_selected_form_field(mut self, field_name: impl Into<String>) -> Self {
        self.selected_form_field = Some(field_name.into());
        self
    }

    /// All form fields this job wants checked: `FormFieldCheck` requests in
    /// order, then the selected field.
    pub(crate) fn form_field_names(&self) -> impl Iterator<Item = &str> {
        self.requests
            .iter()
            .filter_map(|r| match r {
                AnnotationRequest::FormFieldCheck { field_name } => Some(field_name.as_str()),
                _ => None,
            })
            .chain(self.selected_form_field.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_requests_expose_their_page() {
        let check = AnnotationRequest::CheckMark {
            page: 3,
            position: Point::new(10.0, 20.0),
        };
        assert_eq!(check.page(), Some(3));

        let field = AnnotationRequest::FormFieldCheck {
            field_name: "agree".to_string(),
        };
        assert_eq!(field.page(), None);
    }

    #[test]
    fn form_field_names_orders_requests_before_selection() {
        let job = SigningJob::new(vec![
            AnnotationRequest::FormFieldCheck {
                field_name: "first".to_string(),
            },
            AnnotationRequest::CheckMark {
                page: 1,
                position: Point::new(0.0, 0.0),
            },
        ])
        .with_selected_form_field("second");

        let names: Vec<&str> = job.form_field_names().collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
