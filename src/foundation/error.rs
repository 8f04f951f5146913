/// Convenience result type used across the crate.
pub type StyleResult<T> = Result<T, StyleError>;

/// Top-level error type for host access, lookups, and configuration.
///
/// None of these surface through the panel contract: snapshot building degrades per field and
/// dispatcher operations log and discard. The type exists so host bindings and internal steps can
/// use `?` until they reach that boundary.
#[derive(thiserror::Error, Debug)]
pub enum StyleError {
    /// The host rejected a call or could not be reached.
    #[error("host error: {0}")]
    Host(String),

    /// A style, property, or command could not be located in the current document.
    #[error("resolution error: {0}")]
    Resolution(String),

    /// Invalid input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StyleError {
    /// Build a [`StyleError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`StyleError::Resolution`] value.
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Build a [`StyleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StyleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
