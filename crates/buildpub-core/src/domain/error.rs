//! Error taxonomy for buildpub.

/// Why the host could not resolve a run's environment.
///
/// Both variants are recoverable: parameter resolution falls back to the
/// values the parameters contribute themselves.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("environment resolution interrupted")]
    Interrupted,

    #[error("environment resolution failed: {0}")]
    Io(#[from] std::io::Error),
}

/// buildpub errors.
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for buildpub operations.
pub type Result<T> = std::result::Result<T, PublisherError>;
