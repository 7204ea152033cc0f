/// Crate-wide result alias.
pub type SlipResult<T> = Result<T, SlipError>;

/// Error type returned by every fallible slipmaker operation.
#[derive(thiserror::Error, Debug)]
pub enum SlipError {
    /// Invalid input or configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// The template image could not be loaded or decoded.
    #[error("template error: {0}")]
    Template(String),

    /// Drawing a card failed.
    #[error("render error: {0}")]
    Render(String),

    /// Re-encoding a rendered card failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// A configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Any other error, usually IO with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlipError {
    /// Build a [`SlipError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlipError::Template`].
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Build a [`SlipError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SlipError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SlipError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
