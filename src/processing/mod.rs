//! Text processing and analysis module

pub mod analyzer;
pub mod job_profile;
pub mod matcher;
pub mod readability;
pub mod resume_facts;
pub mod sections;
pub mod similarity;
pub mod suggestions;
pub mod taxonomy;
pub mod text_processor;
