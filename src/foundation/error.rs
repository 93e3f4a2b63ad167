/// Convenience result type used across bookstroke.
pub type BookstrokeResult<T> = Result<T, BookstrokeError>;

/// Top-level error taxonomy for the fallible outer layers (config, ingestion, rendering).
///
/// The layout core itself never produces these: unusable book data is dropped, not reported.
#[derive(thiserror::Error, Debug)]
pub enum BookstrokeError {
    /// Invalid configuration values.
    #[error("config error: {0}")]
    Config(String),

    /// Errors while reading or decoding the book table.
    #[error("ingest error: {0}")]
    Ingest(String),

    /// Errors while executing a render plan or writing its output.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BookstrokeError {
    /// Build a [`BookstrokeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`BookstrokeError::Ingest`] value.
    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest(msg.into())
    }

    /// Build a [`BookstrokeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BookstrokeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
