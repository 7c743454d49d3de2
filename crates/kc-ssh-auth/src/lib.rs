//! # kc-ssh-auth
//!
//! SSH `AuthorizedKeysCommand` helper backed by Keycloak.
//!
//! Given a login username, the helper authenticates to Keycloak with a
//! service account, looks the user up, and prints the SSH public keys
//! stored in a configurable user attribute, one per line.
//!
//! ```text
//! AuthorizedKeysCommand /usr/local/bin/keycloak-ssh-auth %u
//! AuthorizedKeysCommandUser nobody
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod keys;
pub mod output;
pub mod pipeline;
pub mod provider;

pub use cli::Cli;
pub use client::KeycloakClient;
pub use config::{ServiceCredentials, SshAuthConfig};
pub use error::{SshAuthError, SshAuthResult};
pub use pipeline::{resolve, Resolution};
pub use provider::{AccessToken, IdentityProvider, UserRecord};
