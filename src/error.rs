use reqwest::StatusCode;

/// Errors raised by the link pipeline and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{status} returned by remote service: {body}")]
    Status { status: StatusCode, body: String },

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("missing configuration value {0}")]
    MissingConfig(&'static str),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True when the remote service answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Status { status, .. } => *status == StatusCode::NOT_FOUND,
            Error::Http(e) => e.status() == Some(StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
