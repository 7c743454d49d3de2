//! Helper configuration.
//!
//! The configuration is a YAML document at [`DEFAULT_CONFIG_PATH`]. It is
//! loaded once per invocation and treated as read-only afterwards.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{SshAuthError, SshAuthResult};

/// Well-known location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/keycloak-ssh-auth/config.yaml";

/// Default HTTP request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// On-disk shape of the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    url: String,
    #[serde(default)]
    realm: String,
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    client_secret: String,
    #[serde(default)]
    attribute: String,
    #[serde(default)]
    debug: bool,
    ignore_disabled: Option<bool>,
    #[serde(default)]
    honor_explicit_ignore_disabled: bool,
    timeout_secs: Option<u64>,
}

/// Resolved helper configuration.
#[derive(Clone)]
pub struct SshAuthConfig {
    /// Identity provider base URL, without a trailing slash.
    pub url: String,
    /// Realm holding both the service client and the users.
    pub realm: String,
    /// Service-account client ID.
    pub client_id: String,
    /// Service-account client secret.
    pub client_secret: String,
    /// Name of the user attribute carrying SSH public keys.
    pub attribute: String,
    /// Enables debug logging on stderr.
    pub debug: bool,
    /// Silently skip users whose account is disabled.
    pub ignore_disabled: bool,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for SshAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshAuthConfig")
            .field("url", &self.url)
            .field("realm", &self.realm)
            .field("client_id", &self.client_id)
            .field("client_secret", &"****")
            .field("attribute", &self.attribute)
            .field("debug", &self.debug)
            .field("ignore_disabled", &self.ignore_disabled)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Service-account credentials borrowed from the configuration.
#[derive(Clone, Copy)]
pub struct ServiceCredentials<'a> {
    /// Client ID.
    pub client_id: &'a str,
    /// Client secret.
    pub client_secret: &'a str,
    /// Realm to authenticate against.
    pub realm: &'a str,
}

impl std::fmt::Debug for ServiceCredentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"****")
            .field("realm", &self.realm)
            .finish()
    }
}

impl SshAuthConfig {
    /// Loads and validates configuration from a file.
    pub fn load(path: impl AsRef<Path>) -> SshAuthResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SshAuthError::config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&content)
    }

    /// Parses and validates configuration from a YAML document.
    pub fn from_yaml(content: &str) -> SshAuthResult<Self> {
        // An empty document deserializes as unit, not as a mapping.
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| SshAuthError::config(format!("failed to parse config: {e}")))?
        };
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> SshAuthResult<Self> {
        let ignore_disabled = resolve_ignore_disabled(
            raw.ignore_disabled,
            raw.honor_explicit_ignore_disabled,
        );

        let config = Self {
            url: raw.url.trim().trim_end_matches('/').to_string(),
            realm: raw.realm.trim().to_string(),
            client_id: raw.client_id.trim().to_string(),
            client_secret: raw.client_secret,
            attribute: raw.attribute.trim().to_string(),
            debug: raw.debug,
            ignore_disabled,
            timeout: Duration::from_secs(raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that every required field is present and well-formed.
    pub fn validate(&self) -> SshAuthResult<()> {
        let required = [
            ("url", self.url.as_str()),
            ("realm", self.realm.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("attribute", self.attribute.as_str()),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(SshAuthError::config(format!("missing required field '{name}'")));
            }
        }

        let parsed = url::Url::parse(&self.url)
            .map_err(|e| SshAuthError::config(format!("invalid url '{}': {e}", self.url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SshAuthError::config(format!(
                "unsupported url scheme '{}'",
                parsed.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(SshAuthError::config("timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// Returns the service-account credentials.
    #[must_use]
    pub fn credentials(&self) -> ServiceCredentials<'_> {
        ServiceCredentials {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            realm: &self.realm,
        }
    }
}

/// Applies the default rule for `ignore_disabled`.
///
/// Unless `honor_explicit` is set, both "unset" and an explicit `false`
/// resolve to `true`.
fn resolve_ignore_disabled(value: Option<bool>, honor_explicit: bool) -> bool {
    if honor_explicit {
        value.unwrap_or(true)
    } else {
        // Legacy rule: false is indistinguishable from unset.
        true
    }
}
