//! Resume documents and their source formats

use crate::error::{Result, ResumeScorerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Pdf,
    Text,
    Markdown,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(SourceFormat::Pdf),
            "txt" | "text" => Some(SourceFormat::Text),
            "md" | "markdown" => Some(SourceFormat::Markdown),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ResumeScorerError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Self::from_extension(extension).ok_or_else(|| {
            ResumeScorerError::UnsupportedFormat(format!(
                "'.{}' files are not supported (use .pdf, .txt or .md): {}",
                extension,
                path.display()
            ))
        })
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Pdf => write!(f, "PDF"),
            SourceFormat::Text => write!(f, "Text"),
            SourceFormat::Markdown => write!(f, "Markdown"),
        }
    }
}

/// Extracted resume text together with where it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub text: String,
    pub format: SourceFormat,
    pub source: Option<PathBuf>,
}

impl ResumeDocument {
    pub fn from_text(text: impl Into<String>, format: SourceFormat) -> Self {
        Self {
            text: text.into(),
            format,
            source: None,
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// File name of the source, or "resume" for in-memory documents
    pub fn display_name(&self) -> String {
        self.source
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "resume".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(SourceFormat::from_path(Path::new("cv.PDF")).unwrap(), SourceFormat::Pdf);
        assert_eq!(SourceFormat::from_path(Path::new("cv.txt")).unwrap(), SourceFormat::Text);
        assert_eq!(SourceFormat::from_path(Path::new("cv.markdown")).unwrap(), SourceFormat::Markdown);

        assert!(matches!(
            SourceFormat::from_path(Path::new("cv.docx")),
            Err(ResumeScorerError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            SourceFormat::from_path(Path::new("resume")),
            Err(ResumeScorerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_display_name() {
        let doc = ResumeDocument::from_text("text", SourceFormat::Text);
        assert_eq!(doc.display_name(), "resume");
        assert_eq!(doc.with_source("/tmp/jane_doe.md").display_name(), "jane_doe.md");
    }
}
