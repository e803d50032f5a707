//! Prompt assembly and answer generation

pub mod chat;
pub mod prompt;

pub use chat::{ChatAnswer, ChatPipeline};
pub use prompt::{PromptBuilder, PromptContext, RenderedPrompt};
