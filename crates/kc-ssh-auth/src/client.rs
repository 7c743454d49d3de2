//! Keycloak implementation of [`IdentityProvider`].
//!
//! Uses the OAuth 2.0 client credentials grant against the realm's token
//! endpoint, then queries the Admin REST API users collection.

use serde::Deserialize;

use crate::config::{ServiceCredentials, SshAuthConfig};
use crate::error::{SshAuthError, SshAuthResult};
use crate::provider::{AccessToken, IdentityProvider, UserRecord};

/// Token endpoint response. Only the access token is used.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// HTTP client for a Keycloak server.
pub struct KeycloakClient {
    client: reqwest::Client,
    base_url: String,
}

impl KeycloakClient {
    /// Creates a client using the configured URL and timeout.
    pub fn new(config: &SshAuthConfig) -> SshAuthResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("kc-ssh-auth/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SshAuthError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_http_client(config.url.clone(), client))
    }

    /// Creates a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Gets the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token_url(&self, realm: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.base_url,
            urlencoding::encode(realm)
        )
    }

    fn users_url(&self, realm: &str, username: &str) -> String {
        format!(
            "{}/admin/realms/{}/users?username={}&exact=true",
            self.base_url,
            urlencoding::encode(realm),
            urlencoding::encode(username)
        )
    }
}

impl IdentityProvider for KeycloakClient {
    async fn authenticate(
        &self,
        credentials: ServiceCredentials<'_>,
    ) -> SshAuthResult<AccessToken> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id),
            ("client_secret", credentials.client_secret),
        ];

        let response = self
            .client
            .post(self.token_url(credentials.realm))
            .form(&form)
            .send()
            .await
            .map_err(|e| SshAuthError::auth(e.to_string()))?;

        let body: TokenResponse = handle_response(response)
            .await
            .map_err(|e| SshAuthError::auth(e.to_string()))?;

        body.access_token
            .filter(|t| !t.is_empty())
            .map(AccessToken::new)
            .ok_or_else(|| SshAuthError::auth("token response did not contain an access_token"))
    }

    async fn find_users_by_username(
        &self,
        token: &AccessToken,
        realm: &str,
        username: &str,
    ) -> SshAuthResult<Vec<UserRecord>> {
        let response = self
            .client
            .get(self.users_url(realm, username))
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(|e| SshAuthError::query(e.to_string()))?;

        handle_response(response)
            .await
            .map_err(|e| SshAuthError::query(e.to_string()))
    }
}

/// Failure while turning an HTTP response into a typed body.
#[derive(Debug, thiserror::Error)]
enum ResponseError {
    #[error("{status} - {message}")]
    Status { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Body(#[from] reqwest::Error),
}

/// Handles a response with a JSON body.
async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ResponseError> {
    let status = response.status();

    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ResponseError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
