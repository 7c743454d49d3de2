//! Username to SSH key resolution.
//!
//! Steps, each short-circuiting on failure:
//!
//! 1. Authenticate the service account.
//! 2. Look up the user by exact username; the first match wins.
//! 3. Skip disabled accounts when the policy says so.
//! 4. Read the configured attribute and extract its key lines.

use crate::config::SshAuthConfig;
use crate::error::{SshAuthError, SshAuthResult};
use crate::keys::extract_keys;
use crate::provider::IdentityProvider;

/// Successful outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// At least one key was found, in extraction order.
    Keys(Vec<String>),
    /// The account is disabled and the policy ignores disabled accounts.
    /// Nothing is printed and the process exits successfully.
    Disabled,
}

/// Resolves the SSH keys of `username`.
pub async fn resolve<P: IdentityProvider>(
    provider: &P,
    config: &SshAuthConfig,
    username: &str,
) -> SshAuthResult<Resolution> {
    let token = provider.authenticate(config.credentials()).await?;
    tracing::debug!("Access token retrieved");

    let users = provider
        .find_users_by_username(&token, &config.realm, username)
        .await?;
    tracing::debug!(username, matches = users.len(), "User lookup complete");

    let Some(user) = users.into_iter().next() else {
        return Err(SshAuthError::UserNotFound(username.to_string()));
    };

    if config.ignore_disabled && user.is_disabled() {
        tracing::debug!(username, "User is disabled, skipping");
        return Ok(Resolution::Disabled);
    }

    let attributes = user
        .attributes
        .ok_or_else(|| SshAuthError::NoAttributes(username.to_string()))?;

    let values = attributes
        .get(&config.attribute)
        .ok_or_else(|| SshAuthError::AttributeNotFound(config.attribute.clone()))?;

    let keys = extract_keys(values.as_slice());
    if keys.is_empty() {
        return Err(SshAuthError::NoKeys(username.to_string()));
    }

    tracing::debug!(username, count = keys.len(), "Extracted SSH keys");
    Ok(Resolution::Keys(keys))
}
