//! Error types for key resolution.
//!
//! Every variant is fatal: the process prints a diagnostic on stderr and
//! exits non-zero. A disabled account that is skipped by policy is not an
//! error and is modelled by [`crate::pipeline::Resolution::Disabled`].

use thiserror::Error;

/// Errors that can occur while resolving a user's SSH keys.
#[derive(Debug, Error)]
pub enum SshAuthError {
    /// Configuration file unreadable, malformed, or invalid.
    #[error("failed to load config: {0}")]
    Config(String),

    /// Service-account authentication against the identity provider failed.
    #[error("login failed: {0}")]
    Auth(String),

    /// User lookup failed (transport, authorization, or decoding).
    #[error("failed to get user: {0}")]
    Query(String),

    /// The lookup returned no matching user.
    #[error("no such user: {0}")]
    UserNotFound(String),

    /// The resolved user has no attributes container.
    #[error("no attributes found for user {0}")]
    NoAttributes(String),

    /// The configured attribute is not present on the user.
    #[error("attribute {0} not found")]
    AttributeNotFound(String),

    /// The attribute exists but holds no usable key lines.
    #[error("no keys found for user {0}")]
    NoKeys(String),

    /// Writing keys to stdout failed.
    #[error("failed to write keys: {0}")]
    Output(#[from] std::io::Error),
}

impl SshAuthError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Checks if this is an authentication error.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Checks if this error means the user or its keys could not be found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::NoAttributes(_)
                | Self::AttributeNotFound(_)
                | Self::NoKeys(_)
        )
    }
}

/// Result type for key resolution.
pub type SshAuthResult<T> = Result<T, SshAuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_categories() {
        assert!(SshAuthError::auth("401 Unauthorized").is_auth_error());
        assert!(!SshAuthError::query("timeout").is_auth_error());
        assert!(SshAuthError::UserNotFound("alice".into()).is_not_found());
        assert!(SshAuthError::NoKeys("alice".into()).is_not_found());
        assert!(!SshAuthError::config("bad yaml").is_not_found());
    }

    #[test]
    fn messages_name_the_subject() {
        assert_eq!(
            SshAuthError::UserNotFound("alice".into()).to_string(),
            "no such user: alice"
        );
        assert_eq!(
            SshAuthError::AttributeNotFound("sshKeys".into()).to_string(),
            "attribute sshKeys not found"
        );
        assert_eq!(
            SshAuthError::NoKeys("bob".into()).to_string(),
            "no keys found for user bob"
        );
    }
}
