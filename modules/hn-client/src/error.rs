use thiserror::Error;

pub type Result<T> = std::result::Result<T, HnError>;

#[derive(Debug, Error)]
pub enum HnError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for HnError {
    fn from(err: reqwest::Error) -> Self {
        HnError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for HnError {
    fn from(err: serde_json::Error) -> Self {
        HnError::Parse(err.to_string())
    }
}
