use thiserror::Error;

/// Registry error codes that signal call limits or a temporary service
/// condition rather than a problem with the request itself.
pub const TRANSIENT_REGISTRY_CODES: [&str; 4] = ["WL-100", "WL-191", "WL-195", "WL-196"];

/// Errors that can occur while looking up a VAT status.
///
/// Use [`LookupError::is_permanent`] to decide whether repeating the call
/// could succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LookupError {
    /// The NIP failed format or checksum validation.
    #[error("wrong NIP format: '{0}'")]
    InvalidNip(String),

    /// The date argument could not be parsed.
    #[error("wrong date format: {0}")]
    InvalidDate(String),

    /// Network or HTTP failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The registry answered with an error code.
    #[error("{code}: {message}")]
    Registry {
        /// Registry code, e.g. `WL-113`.
        code: String,
        /// Registry message text.
        message: String,
    },

    /// Failure outside the lookup taxonomy, e.g. an unusable client setup.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LookupError {
    /// Build a registry error from its code and message.
    pub fn registry(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Registry {
            code: code.into(),
            message: message.into(),
        }
    }

    /// `true` when repeating the same request cannot succeed.
    pub fn is_permanent(&self) -> bool {
        match self {
            Self::InvalidNip(_) | Self::InvalidDate(_) => true,
            Self::Transport(_) | Self::Decode(_) => false,
            Self::Registry { code, .. } => !TRANSIENT_REGISTRY_CODES.contains(&code.as_str()),
            Self::Internal(_) => true,
        }
    }

    /// `true` for transient lookup failures worth another attempt.
    ///
    /// Internal errors are never retried.
    pub fn is_retryable(&self) -> bool {
        !self.is_permanent() && !matches!(self, Self::Internal(_))
    }
}
