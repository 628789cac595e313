#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Video not found: {id}")]
    NotFound { id: String },

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MediaError {
    #[error("Media backend unavailable: {0}")]
    Init(String),

    #[error("Failed to build playback pipeline: {0}")]
    Pipeline(String),

    #[error("Playback was rejected: {0}")]
    PlayRejected(String),

    #[error("Media stream failed: {0}")]
    Stream(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
