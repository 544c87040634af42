//! Text extraction from resume files

use crate::error::{Result, ResumeScorerError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeScorerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown))
    }
}

/// Render markdown as plain text, one line per heading, paragraph line or list item.
///
/// Headings must stay on their own line so section detection still sees them.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut output = String::with_capacity(markdown.len());

    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => output.push_str(&text),
            Event::SoftBreak | Event::HardBreak => output.push('\n'),
            Event::End(Tag::Heading(..))
            | Event::End(Tag::Paragraph)
            | Event::End(Tag::Item)
            | Event::End(Tag::CodeBlock(_))
            | Event::End(Tag::TableRow)
            | Event::End(Tag::TableHead) => output.push('\n'),
            Event::End(Tag::TableCell) => output.push(' '),
            Event::Rule => output.push('\n'),
            _ => {}
        }
    }

    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text() {
        let markdown = "# Jane Doe\n\n## Experience\n\n- Built **fast** APIs\n- Led `rust` migration\n\nSome\nwrapped text\n";
        let text = markdown_to_text(markdown);
        assert_eq!(
            text,
            "Jane Doe\nExperience\nBuilt fast APIs\nLed rust migration\nSome\nwrapped text"
        );
    }

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "SKILLS\nRust").unwrap();

        let text = PlainTextExtractor.extract(&path).await.unwrap();
        assert_eq!(text, "SKILLS\nRust");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = PlainTextExtractor.extract(Path::new("/nonexistent/resume.txt")).await;
        assert!(matches!(result, Err(ResumeScorerError::Io(_))));
    }
}
