//! Identity provider capabilities consumed by the resolution pipeline.
//!
//! The pipeline only ever needs two things from the identity provider: a
//! bearer token for the service account, and the user records matching a
//! username. Keeping them behind [`IdentityProvider`] lets the pipeline run
//! against an in-memory stub in tests.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::ServiceCredentials;
use crate::error::SshAuthResult;

/// Opaque bearer token for the service account.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

/// A user record as returned by the identity provider.
///
/// Only the fields the pipeline reads are kept; everything else in the
/// provider's representation is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Whether the account is enabled. `None` means unknown, not disabled.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Custom attributes. `None` when the record carries no container.
    #[serde(default)]
    pub attributes: Option<HashMap<String, Vec<String>>>,
}

impl UserRecord {
    /// Returns true only when the provider explicitly reports the account
    /// as disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.enabled == Some(false)
    }
}

/// Capabilities of an identity provider.
///
/// Implementations must not retry: every failure is reported to the caller
/// as-is.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// Obtains an access token for the service account.
    ///
    /// Fails with [`crate::SshAuthError::Auth`].
    async fn authenticate(&self, credentials: ServiceCredentials<'_>)
        -> SshAuthResult<AccessToken>;

    /// Finds users whose username matches exactly.
    ///
    /// Fails with [`crate::SshAuthError::Query`]. An empty vector is not an
    /// error at this level.
    async fn find_users_by_username(
        &self,
        token: &AccessToken,
        realm: &str,
        username: &str,
    ) -> SshAuthResult<Vec<UserRecord>>;
}
