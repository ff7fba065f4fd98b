use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Corpus, embedding index or settings are missing or inconsistent. Fatal.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The embedding collaborator failed during a query.
    #[error("Embedding service failed: {0}")]
    Embedding(String),

    /// The answer-generation collaborator failed.
    #[error("Generation service failed: {0}")]
    Generation(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Transient service failures may succeed when the caller tries again;
    /// configuration problems need the corpus or index fixed first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Embedding(_) | Error::Generation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
