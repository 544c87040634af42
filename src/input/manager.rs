//! Input manager routing files to the right extractor

use crate::error::{Result, ResumeScorerError};
use crate::input::document::{ResumeDocument, SourceFormat};
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::path::Path;

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    pub async fn load_resume(&self, path: &Path) -> Result<ResumeDocument> {
        let (text, format) = self.extract(path).await?;
        Ok(ResumeDocument::from_text(text, format).with_source(path))
    }

    /// Job descriptions are read with the same extractors as resumes.
    /// Blank text is returned as-is and resolves to an empty job profile.
    pub async fn load_job_description(&self, path: &Path) -> Result<String> {
        let (text, _) = self.extract(path).await?;
        if text.trim().is_empty() {
            log::warn!("Job description {} is empty", path.display());
        }
        Ok(text)
    }

    async fn extract(&self, path: &Path) -> Result<(String, SourceFormat)> {
        if !path.exists() {
            return Err(ResumeScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let format = SourceFormat::from_path(path)?;
        let text = match format {
            SourceFormat::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            SourceFormat::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            SourceFormat::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
        };

        Ok((text, format))
    }
}
