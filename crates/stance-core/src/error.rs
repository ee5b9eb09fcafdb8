//! Error types for stance

use thiserror::Error;

/// The main error type for stance operations
#[derive(Debug, Error)]
pub enum StanceError {
    #[error("Clip not found: {0}")]
    ClipNotFound(String),

    #[error("Missing required clip '{clip}' in catalog '{archetype}'")]
    MissingClip { archetype: String, clip: String },

    #[error("Duplicate clip name '{0}'")]
    DuplicateClip(String),

    #[error("Invalid clip '{clip}': {reason}")]
    InvalidClip { clip: String, reason: String },

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for stance operations
pub type Result<T> = std::result::Result<T, StanceError>;

impl From<toml::de::Error> for StanceError {
    fn from(err: toml::de::Error) -> Self {
        StanceError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for StanceError {
    fn from(err: toml::ser::Error) -> Self {
        StanceError::TomlSerError(err.to_string())
    }
}
