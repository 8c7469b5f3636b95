use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrowthError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("Publish credential error: {0}")]
    AuthConfiguration(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GrowthError {
    pub fn decode(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<reqwest::Error> for GrowthError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GrowthError>;
