/// Convenience result type used across memeforge.
pub type MemeResult<T> = Result<T, MemeError>;

/// Top-level error taxonomy used by library setup APIs.
///
/// The event flow itself never surfaces these to the user; the session logs them and carries on.
#[derive(thiserror::Error, Debug)]
pub enum MemeError {
    /// Invalid user-provided configuration or dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image bytes could not be decoded into a usable raster.
    #[error("decode error: {0}")]
    Decode(String),

    /// Failures while drawing onto or exporting the canvas surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MemeError {
    /// Build a [`MemeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MemeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`MemeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MemeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
