use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReleasifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spotify API returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Malformed response from {context}: {source}")]
    MalformedResponse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Release date '{date}' does not match precision '{precision}'")]
    InvalidReleaseDate { date: String, precision: String },

    #[error("Missing configuration value {key}")]
    Config { key: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReleasifyError {
    pub fn malformed(context: impl Into<String>, source: serde_json::Error) -> Self {
        ReleasifyError::MalformedResponse {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReleasifyError>;
