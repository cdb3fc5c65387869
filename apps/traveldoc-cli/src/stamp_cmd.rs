use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use pdfmark_core::{PdfAnnotator, Skipped};

use crate::job_file::JobFile;

pub fn run(input: &Path, job_path: &Path, output: &Path) -> anyhow::Result<()> {
    let source = fs::read(input)
        .with_context(|| format!("failed to read source PDF {}", input.display()))?;

    let base_dir = job_path.parent().unwrap_or_else(|| Path::new("."));
    let job = JobFile::load(job_path)?.into_job(base_dir)?;

    let result = PdfAnnotator::execute(&source, &job)
        .with_context(|| format!("failed to annotate {}", input.display()))?;

    fs::write(output, &result.bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        pages = result.page_count,
        skipped = result.skipped.len(),
        output = %output.display(),
        "annotated document written"
    );

    for skip in &result.skipped {
        match skip {
            Skipped::FieldNotFound { field_name } => {
                eprintln!("warning: form field {field_name:?} not found, skipped");
            }
            Skipped::UnusableSignatureImage { page, reason } => {
                eprintln!("warning: signature image for page {page} unusable ({reason}), skipped");
            }
        }
    }

    println!(
        "wrote {} ({} pages, {} skipped)",
        output.display(),
        result.page_count,
        result.skipped.len()
    );
    Ok(())
}
