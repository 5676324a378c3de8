/// Convenience result type used across routeview.
pub type RouteViewResult<T> = Result<T, RouteViewError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Runtime viewport operations (`update_path`, `destroy`, event handling) never return these;
/// they surface only from construction, decoding, payload parsing and raster snapshots.
#[derive(thiserror::Error, Debug)]
pub enum RouteViewError {
    /// Invalid user-provided configuration or path data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A rendering surface could not satisfy a request.
    #[error("surface error: {0}")]
    Surface(String),

    /// Raster data could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A vehicle-path payload was malformed or reported failure.
    #[error("payload error: {0}")]
    Payload(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RouteViewError {
    /// Build a [`RouteViewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RouteViewError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`RouteViewError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`RouteViewError::Payload`] value.
    pub fn payload(msg: impl Into<String>) -> Self {
        Self::Payload(msg.into())
    }

    /// Build a [`RouteViewError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for RouteViewError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
