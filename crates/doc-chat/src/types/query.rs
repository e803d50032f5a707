//! Request types

use serde::{Deserialize, Serialize};

/// Question about the caller's documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The question to answer
    #[serde(default)]
    pub question: Option<String>,
}

/// Free-form message sent straight to the completion service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}
