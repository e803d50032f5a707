//! Question answering over stored documents

use std::sync::Arc;

use crate::config::EmptyDocumentPolicy;
use crate::error::{Error, Result};
use crate::providers::{CompletionProvider, DocumentStore};

use super::prompt::{PromptBuilder, PromptContext, RenderedPrompt};

/// Answer returned by the chat pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatAnswer {
    /// Completion text, unmodified
    pub answer: String,
    /// Number of documents in the prompt
    pub documents_used: usize,
}

/// Prompt assembly pipeline: question + documents -> completion
#[derive(Clone)]
pub struct ChatPipeline {
    store: Arc<dyn DocumentStore>,
    completion: Arc<dyn CompletionProvider>,
    empty_documents: EmptyDocumentPolicy,
}

impl ChatPipeline {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        completion: Arc<dyn CompletionProvider>,
        empty_documents: EmptyDocumentPolicy,
    ) -> Self {
        Self {
            store,
            completion,
            empty_documents,
        }
    }

    /// Answer `question` from the documents visible to `owner`
    pub async fn answer(&self, owner: Option<&str>, question: Option<&str>) -> Result<ChatAnswer> {
        let question = match question {
            Some(q) if !q.trim().is_empty() => q,
            _ => return Err(Error::InvalidRequest("question is required".to_string())),
        };

        let documents = self.store.list_documents(owner).await?;
        if documents.is_empty() && self.empty_documents == EmptyDocumentPolicy::Reject {
            return Err(Error::NoDocuments);
        }

        let context = PromptContext::from_documents(&documents);
        let prompt = PromptBuilder::build_chat_prompt(question, &context);
        tracing::debug!(
            "Rendered prompt with {} documents ({} chars)",
            context.len(),
            prompt.user.len()
        );

        let answer = self.submit(&prompt).await?;

        Ok(ChatAnswer {
            answer,
            documents_used: context.len(),
        })
    }

    /// Send a free-form message without document context
    pub async fn direct(&self, message: Option<&str>) -> Result<String> {
        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Err(Error::InvalidRequest("message is required".to_string())),
        };

        let prompt = PromptBuilder::build_direct_prompt(message);
        self.submit(&prompt).await
    }

    async fn submit(&self, prompt: &RenderedPrompt) -> Result<String> {
        self.completion
            .complete(&prompt.system, &prompt.user)
            .await
            .map_err(|e| {
                tracing::warn!("Completion via {} failed: {}", self.completion.name(), e);
                match e {
                    Error::UpstreamFailure(msg) => Error::UpstreamFailure(msg),
                    other => Error::UpstreamFailure(other.to_string()),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::prompt::{GENERAL_SYSTEM_INSTRUCTION, SYSTEM_INSTRUCTION};
    use crate::test_support::{RecordingCompletion, RecordingStore};

    fn pipeline(
        store: &Arc<RecordingStore>,
        completion: &Arc<RecordingCompletion>,
        policy: EmptyDocumentPolicy,
    ) -> ChatPipeline {
        ChatPipeline::new(store.clone(), completion.clone(), policy)
    }

    #[tokio::test]
    async fn test_missing_question_touches_nothing() {
        let store = Arc::new(RecordingStore::default());
        let completion = Arc::new(RecordingCompletion::answering("unused"));
        let chat = pipeline(&store, &completion, EmptyDocumentPolicy::Reject);

        for question in [None, Some(""), Some("   \n")] {
            let err = chat.answer(None, question).await.unwrap_err();
            assert!(matches!(err, Error::InvalidRequest(_)));
        }

        assert_eq!(store.list_calls(), 0);
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_documents_rejected() {
        let store = Arc::new(RecordingStore::default());
        let completion = Arc::new(RecordingCompletion::answering("unused"));
        let chat = pipeline(&store, &completion, EmptyDocumentPolicy::Reject);

        let err = chat.answer(None, Some("anything?")).await.unwrap_err();
        assert!(matches!(err, Error::NoDocuments));
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_documents_question_only() {
        let store = Arc::new(RecordingStore::default());
        let completion = Arc::new(RecordingCompletion::answering("Paris."));
        let chat = pipeline(&store, &completion, EmptyDocumentPolicy::QuestionOnly);

        let answer = chat.answer(None, Some("capital of France?")).await.unwrap();
        assert_eq!(answer.answer, "Paris.");
        assert_eq!(answer.documents_used, 0);

        let (system, user) = completion.last_request().unwrap();
        assert_eq!(system, GENERAL_SYSTEM_INSTRUCTION);
        assert_eq!(user, "Question: capital of France?");
    }

    #[tokio::test]
    async fn test_prompt_lists_documents_before_completion() {
        let store = Arc::new(RecordingStore::default());
        store.seed("Doc1", "alpha", None);
        store.seed("Doc2", "beta", None);
        let completion = Arc::new(RecordingCompletion::answering("Alpha is the first letter. (Doc1)"));
        let chat = pipeline(&store, &completion, EmptyDocumentPolicy::Reject);

        let answer = chat.answer(None, Some("what is alpha?")).await.unwrap();
        assert_eq!(answer.answer, "Alpha is the first letter. (Doc1)");
        assert_eq!(answer.documents_used, 2);
        assert_eq!(completion.calls(), 1);

        let (system, user) = completion.last_request().unwrap();
        assert_eq!(system, SYSTEM_INSTRUCTION);
        let order: Vec<usize> = ["Doc1", "alpha", "Doc2", "beta", "what is alpha?"]
            .iter()
            .map(|s| user.find(s).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_owner_passed_to_store() {
        let store = Arc::new(RecordingStore::default());
        store.seed("mine.txt", "my secret", Some("alice"));
        store.seed("theirs.txt", "their secret", Some("bob"));
        let completion = Arc::new(RecordingCompletion::answering("ok"));
        let chat = pipeline(&store, &completion, EmptyDocumentPolicy::Reject);

        let answer = chat.answer(Some("alice"), Some("what do I have?")).await.unwrap();
        assert_eq!(answer.documents_used, 1);

        let (_, user) = completion.last_request().unwrap();
        assert!(user.contains("my secret"));
        assert!(!user.contains("their secret"));
    }

    #[tokio::test]
    async fn test_upstream_failure_has_no_stale_answer() {
        let store = Arc::new(RecordingStore::default());
        store.seed("Doc1", "alpha", None);
        let completion = Arc::new(RecordingCompletion::answering("first answer"));
        let chat = pipeline(&store, &completion, EmptyDocumentPolicy::Reject);

        let first = chat.answer(None, Some("q1")).await.unwrap();
        assert_eq!(first.answer, "first answer");

        completion.fail_next(Error::upstream("request timed out"));
        let err = chat.answer(None, Some("q2")).await.unwrap_err();
        match err {
            Error::UpstreamFailure(msg) => {
                assert!(msg.contains("request timed out"));
                assert!(!msg.contains("first answer"));
            }
            other => panic!("expected UpstreamFailure, got {:?}", other),
        }
        assert_eq!(completion.calls(), 2);
    }

    #[tokio::test]
    async fn test_non_upstream_provider_error_is_mapped() {
        let store = Arc::new(RecordingStore::default());
        store.seed("Doc1", "alpha", None);
        let completion = Arc::new(RecordingCompletion::answering("unused"));
        completion.fail_next(Error::internal("socket closed"));
        let chat = pipeline(&store, &completion, EmptyDocumentPolicy::Reject);

        let err = chat.answer(None, Some("q")).await.unwrap_err();
        assert!(matches!(err, Error::UpstreamFailure(msg) if msg.contains("socket closed")));
    }

    #[tokio::test]
    async fn test_direct_chat() {
        let store = Arc::new(RecordingStore::default());
        let completion = Arc::new(RecordingCompletion::answering("summary"));
        let chat = pipeline(&store, &completion, EmptyDocumentPolicy::Reject);

        let long = "word ".repeat(40);
        assert_eq!(chat.direct(Some(&long)).await.unwrap(), "summary");
        let (_, user) = completion.last_request().unwrap();
        assert!(user.starts_with("Summarize the following document:\n\n"));

        chat.direct(Some("hi there")).await.unwrap();
        let (_, user) = completion.last_request().unwrap();
        assert_eq!(user, "hi there");

        assert!(matches!(chat.direct(None).await, Err(Error::InvalidRequest(_))));
        assert_eq!(store.list_calls(), 0);
    }
}
