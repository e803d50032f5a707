//! Prompt templates for document questions

use crate::types::Document;

/// System instruction for document-grounded questions
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant that answers questions about \
the user's uploaded documents. Base every answer strictly on the document text you are given.";

/// System instruction when there is no document context
pub const GENERAL_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// Sentence the model must reply with when no document answers the question
pub const FALLBACK_ANSWER: &str = "I could not find the answer in the provided documents.";

/// Width of the line closing each document block
pub const SEPARATOR_WIDTH: usize = 50;

/// Messages longer than this are treated as a pasted document in direct chat
pub const DIRECT_SUMMARY_THRESHOLD: usize = 100;

/// One `(title, content)` pair in the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    pub title: String,
    pub content: String,
}

/// Ordered document context for a single chat request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptContext {
    entries: Vec<ContextEntry>,
}

impl PromptContext {
    /// Build from stored documents, preserving their order
    pub fn from_documents(documents: &[Document]) -> Self {
        Self {
            entries: documents
                .iter()
                .map(|d| ContextEntry {
                    title: d.title.clone(),
                    content: d.content.clone(),
                })
                .collect(),
        }
    }

    /// Append a pair
    pub fn push(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.entries.push(ContextEntry {
            title: title.into(),
            content: content.into(),
        });
    }

    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The exact pair of texts sent to the completion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

/// Prompt builder for document chat
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the document section: one block per entry, in order
    pub fn build_context(context: &PromptContext) -> String {
        let separator = "-".repeat(SEPARATOR_WIDTH);
        let mut out = String::new();

        for entry in context.entries() {
            out.push_str(&format!(
                "Document: {}\n{}\n{}\n\n",
                entry.title, entry.content, separator
            ));
        }

        out
    }

    /// Build the grounded prompt for a question over the given documents.
    ///
    /// An empty context yields a question-only prompt with no document section.
    pub fn build_chat_prompt(question: &str, context: &PromptContext) -> RenderedPrompt {
        if context.is_empty() {
            return RenderedPrompt {
                system: GENERAL_SYSTEM_INSTRUCTION.to_string(),
                user: format!("Question: {}", question),
            };
        }

        let user = format!(
            r#"Here are the documents you can use:

{documents}Question: {question}

Answer the question using only the information in the documents above. If your answer uses information from more than one document, name the document each piece of information came from. If none of the documents contain the answer, reply exactly: "{fallback}""#,
            documents = Self::build_context(context),
            question = question,
            fallback = FALLBACK_ANSWER,
        );

        RenderedPrompt {
            system: SYSTEM_INSTRUCTION.to_string(),
            user,
        }
    }

    /// Build a direct chat prompt; long messages are summarized
    pub fn build_direct_prompt(message: &str) -> RenderedPrompt {
        let user = if message.chars().count() > DIRECT_SUMMARY_THRESHOLD {
            Self::build_summary_prompt(message)
        } else {
            message.to_string()
        };

        RenderedPrompt {
            system: GENERAL_SYSTEM_INSTRUCTION.to_string(),
            user,
        }
    }

    /// Build a summarization prompt
    pub fn build_summary_prompt(text: &str) -> String {
        format!("Summarize the following document:\n\n{}", text)
    }
}
