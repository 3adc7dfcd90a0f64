use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
