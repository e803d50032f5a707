//! Configuration for the document chat service

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Document table location
    pub storage: StorageConfig,
    /// Upload handling
    pub ingestion: IngestionConfig,
    /// Completion backend
    pub completion: CompletionConfig,
    /// Chat behaviour
    pub chat: ChatConfig,
    /// Principal scoping
    pub access: AccessConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply environment overrides (`OPENAI_API_KEY`, `DOC_CHAT_HOST`, `DOC_CHAT_PORT`,
    /// `DOC_CHAT_DATABASE`)
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a `.env` file. Variables already set in the process
    /// environment take precedence over the file.
    pub fn apply_dotenv<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let entries = dotenvy::from_path_iter(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
            .collect::<std::result::Result<HashMap<String, String>, _>>()
            .map_err(|e| Error::Config(format!("Invalid {}: {}", path.display(), e)))?;

        self.apply_vars(|name| {
            std::env::var(name)
                .ok()
                .or_else(|| entries.get(name).cloned())
        })
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(key) = lookup("OPENAI_API_KEY") {
            if !key.trim().is_empty() {
                self.completion.api_key = Some(key);
            }
        }
        if let Some(host) = lookup("DOC_CHAT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("DOC_CHAT_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("DOC_CHAT_PORT is not a port: {}", port)))?;
        }
        if let Some(db) = lookup("DOC_CHAT_DATABASE") {
            self.storage.database_path = PathBuf::from(db);
        }
        Ok(())
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.max_upload_size == 0 {
            return Err(Error::Config("server.max_upload_size must be > 0".to_string()));
        }
        if self.completion.backend == CompletionBackend::OpenAi
            && self.completion.api_key.as_deref().map_or(true, |k| k.trim().is_empty())
        {
            return Err(Error::Config(
                "completion.api_key (or OPENAI_API_KEY) is required for the openai backend"
                    .to_string(),
            ));
        }
        if self.access.mode == AccessMode::Scoped && self.access.principal_header.trim().is_empty()
        {
            return Err(Error::Config(
                "access.principal_header must be set in scoped mode".to_string(),
            ));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 16MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            enable_cors: true,
            max_upload_size: 16 * 1024 * 1024,
        }
    }
}

/// Document table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        // Use absolute path so the db does not follow the working directory
        let database_path = dirs::data_local_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")))
            .join("doc-chat")
            .join("documents.db");

        Self { database_path }
    }
}

/// Upload handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Directory for the temporary copy of each upload
    pub upload_dir: PathBuf,
    /// Accept `.csv` uploads
    pub allow_csv: bool,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            upload_dir: std::env::temp_dir().join("doc-chat-uploads"),
            allow_csv: true,
        }
    }
}

/// Completion backend selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompletionBackend {
    /// OpenAI-compatible `/chat/completions`
    #[default]
    OpenAi,
    /// Local Ollama `/api/chat`
    Ollama,
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Which backend to talk to
    pub backend: CompletionBackend,
    /// Base URL (e.g. `https://api.openai.com/v1` or `http://localhost:11434`)
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Bearer token (OpenAI only)
    pub api_key: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            backend: CompletionBackend::OpenAi,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            temperature: 0.2,
            timeout_secs: 60,
        }
    }
}

/// What to do when a chat request finds no documents
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDocumentPolicy {
    /// Fail with `NoDocuments`
    #[default]
    Reject,
    /// Send a prompt containing only the question
    QuestionOnly,
}

/// Chat configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Behaviour for an empty document set
    pub empty_documents: EmptyDocumentPolicy,
}

/// Document visibility
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// Every document is visible to every caller
    #[default]
    Public,
    /// Documents are owned by the principal named in a request header
    Scoped,
}

/// Principal scoping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Public or scoped
    pub mode: AccessMode,
    /// Header carrying the authenticated principal id (scoped mode)
    pub principal_header: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            mode: AccessMode::Public,
            principal_header: "x-user-id".to_string(),
        }
    }
}
