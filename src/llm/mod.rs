//! Generative text enhancement

pub mod enhancer;
pub mod openai;
pub mod prompts;

pub use enhancer::{all_unavailable, Enhancement, EnhancementLabel, EnhancementRequest, EnhancementService, TextEnhancer};
pub use openai::OpenAiEnhancer;
