//! On-disk job format for the `stamp` subcommand.
//!
//! Signature images are referenced by path and loaded here, so the core
//! crate only ever sees raw bytes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use pdfmark_core::{AnnotationRequest, Point, SigningJob};

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JobRequest {
    CheckMark {
        page: u32,
        x: f64,
        y: f64,
    },
    SignatureStamp {
        page: u32,
        x: f64,
        y: f64,
        image_path: PathBuf,
    },
    FormFieldCheck {
        field_name: String,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JobFile {
    #[serde(default)]
    pub requests: Vec<JobRequest>,
    #[serde(default)]
    pub selected_form_field: Option<String>,
}

impl JobFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read job file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse job file {}", path.display()))
    }

    /// Resolve image paths (relative to the job file's directory) and build
    /// the core signing job.
    pub fn into_job(self, base_dir: &Path) -> anyhow::Result<SigningJob> {
        let mut requests = Vec::with_capacity(self.requests.len());
        for request in self.requests {
            requests.push(match request {
                JobRequest::CheckMark { page, x, y } => AnnotationRequest::CheckMark {
                    page,
                    position: Point::new(x, y),
                },
                JobRequest::SignatureStamp {
                    page,
                    x,
                    y,
                    image_path,
                } => {
                    let resolved = if image_path.is_absolute() {
                        image_path
                    } else {
                        base_dir.join(image_path)
                    };
                    let image = fs::read(&resolved).with_context(|| {
                        format!("failed to read signature image {}", resolved.display())
                    })?;
                    AnnotationRequest::SignatureStamp {
                        page,
                        position: Point::new(x, y),
                        image,
                    }
                }
                JobRequest::FormFieldCheck { field_name } => {
                    AnnotationRequest::FormFieldCheck { field_name }
                }
            });
        }
        Ok(SigningJob {
            requests,
            selected_form_field: self.selected_form_field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_file_deserializes_tagged_requests() {
        let json = r#"{
            "requests": [
                {"type": "CheckMark", "page": 1, "x": 100.0, "y": 200.0},
                {"type": "FormFieldCheck", "field_name": "consent"}
            ],
            "selected_form_field": "consent"
        }"#;
        let file: JobFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.requests.len(), 2);
        assert_eq!(file.selected_form_field.as_deref(), Some("consent"));
        assert!(matches!(
            file.requests[0],
            JobRequest::CheckMark { page: 1, .. }
        ));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let file: JobFile = serde_json::from_str("{}").unwrap();
        assert!(file.requests.is_empty());
        assert!(file.selected_form_field.is_none());
    }
}
