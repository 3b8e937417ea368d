//! Error types for the chat client and widget configuration.
//!
//! ERROR HANDLING
//! ==============
//! Neither type ever reaches the visitor. `ChatError` is folded into the
//! transport-failure outcome by the controller, and `ConfigError` makes the
//! widget fall back to its default configuration.

/// Failure of a single chat exchange at the transport level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// The request could not be built or sent.
    #[error("chat request failed: {0}")]
    Request(String),

    /// The response body was not a chat response.
    #[error("chat response parse failed: {0}")]
    Decode(String),

    /// The call did not settle within the configured timeout.
    #[error("chat request timed out after {ms} ms")]
    Timeout { ms: u32 },

    /// No HTTP transport in this build (native, non-`csr`).
    #[error("chat client not available outside the browser")]
    Unavailable,
}

/// Invalid widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
