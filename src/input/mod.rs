//! Input processing module
//! Handles format detection and text extraction for resumes and job descriptions

pub mod document;
pub mod manager;
pub mod text_extractor;

pub use document::{ResumeDocument, SourceFormat};
pub use manager::InputManager;
