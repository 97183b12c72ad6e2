use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitaError {
    /// Transport failure, timeout or a non-success HTTP status from upstream.
    #[error("Network error: {message}")]
    Network {
        status: Option<u16>,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Unreadable bookmark/cache storage. Recovered locally, never returned
    /// from the public store APIs.
    #[error("Corrupt local state: {0}")]
    CorruptLocalState(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl GitaError {
    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Network {
            status,
            message: message.into(),
        }
    }

    /// Whether the caller may reasonably retry the failed operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// HTTP status carried by a network error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// Reinterpret an upstream 404 as a missing entity.
    pub fn or_not_found(self, what: impl Into<String>) -> Self {
        match self.status() {
            Some(404) => Self::NotFound(what.into()),
            _ => self,
        }
    }
}

impl From<reqwest::Error> for GitaError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        Self::Network { status, message }
    }
}

pub type Result<T> = std::result::Result<T, GitaError>;
