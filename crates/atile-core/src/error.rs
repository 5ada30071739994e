//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    // ─────────────────────────────────────────────────────────────
    // Lead Relay Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Lead relay rejected the submission with status {status}")]
    RelayStatus { status: u16 },

    #[error("Lead relay transport error: {message}")]
    RelayTransport { message: String },

    #[error("Invalid lead relay endpoint: {endpoint}")]
    RelayEndpoint { endpoint: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    // ─────────────────────────────────────────────────────────────
    // Interaction Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Document scroll lock is already held by {owner}")]
    ScrollLockHeld { owner: String },

    #[error("Rotation requires at least one item")]
    EmptyCollection,

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn relay_status(status: u16) -> Self {
        Self::RelayStatus { status }
    }

    pub fn relay_transport(message: impl Into<String>) -> Self {
        Self::RelayTransport {
            message: message.into(),
        }
    }

    pub fn relay_endpoint(endpoint: impl Into<String>) -> Self {
        Self::RelayEndpoint {
            endpoint: endpoint.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    pub fn scroll_lock_held(owner: impl Into<String>) -> Self {
        Self::ScrollLockHeld {
            owner: owner.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Submission failures leave the user in an actionable state (edit and
    /// resubmit), so they are always recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::RelayStatus { .. }
                | Error::RelayTransport { .. }
                | Error::ScrollLockHeld { .. }
                | Error::ChannelClosed
        )
    }

    /// Check if this error should abort startup
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::RelayEndpoint { .. } | Error::ConfigInvalid { .. }
        )
    }

    /// Whether this failure happened at the relay boundary
    pub fn is_submission_error(&self) -> bool {
        matches!(
            self,
            Error::RelayStatus { .. } | Error::RelayTransport { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Logging Context
// ─────────────────────────────────────────────────────────────────

/// Log a failing result where it happens, then pass the error on.
///
/// Relay failures and fatal errors log at `error`; everything else is
/// expected often enough to log at `warn`.
pub trait ResultExt<T> {
    fn context(self, context: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            if err.is_submission_error() || err.is_fatal() {
                tracing::error!("{}: {}", context, err);
            } else {
                tracing::warn!("{}: {}", context, err);
            }
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::relay_status(422);
        assert_eq!(
            err.to_string(),
            "Lead relay rejected the submission with status 422"
        );

        let err = Error::scroll_lock_held("mobile-menu");
        assert!(err.to_string().contains("mobile-menu"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_submission_errors_are_recoverable() {
        assert!(Error::relay_status(500).is_recoverable());
        assert!(Error::relay_transport("connection reset").is_recoverable());
        assert!(Error::relay_status(500).is_submission_error());
        assert!(!Error::relay_status(500).is_fatal());
    }

    #[test]
    fn test_context_passes_error_through() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.context("Writing config").unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let ok: Result<u8> = Ok(7);
        assert_eq!(ok.context("unused").unwrap(), 7);
    }

    #[test]
    fn test_scroll_lock_is_not_a_submission_error() {
        let err = Error::scroll_lock_held("lightbox");
        assert!(err.is_recoverable());
        assert!(!err.is_submission_error());
    }

    #[test]
    fn test_config_errors_are_fatal() {
        assert!(Error::relay_endpoint("ftp://nowhere").is_fatal());
        assert!(Error::config_invalid("interval_ms must be positive").is_fatal());
        assert!(!Error::config("read failed").is_fatal());
    }
}
