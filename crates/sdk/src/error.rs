/// Error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Competition rule error.
    #[error("model: {0}")]
    Model(#[from] arena_model::Error),
    /// JSON error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    /// Snapshot schema version not understood by this build.
    #[error("unsupported snapshot version: {0}")]
    UnsupportedVersion(u16),
    /// Invalid configuration.
    #[error("config: {0}")]
    Config(&'static str),
    /// Custom error.
    #[error("custom: {0}")]
    Custom(String),
}

impl Error {
    /// Create a custom error.
    pub fn custom(msg: impl ToString) -> Self {
        Self::Custom(msg.to_string())
    }
}
