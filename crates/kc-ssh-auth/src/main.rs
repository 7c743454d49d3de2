//! # keycloak-ssh-auth
//!
//! `AuthorizedKeysCommand` entry point.

#![forbid(unsafe_code)]

use std::process::ExitCode;

use kc_ssh_auth::{
    cli::Cli,
    config::DEFAULT_CONFIG_PATH,
    output::{self, EXIT_FAILURE},
    resolve, KeycloakClient, SshAuthConfig,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code),
    };

    // Load configuration
    let config = match SshAuthConfig::load(DEFAULT_CONFIG_PATH) {
        Ok(c) => c,
        Err(e) => {
            output::error(&e.to_string());
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    init_tracing(config.debug);

    let client = match KeycloakClient::new(&config) {
        Ok(c) => c,
        Err(e) => {
            output::error(&e.to_string());
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let result = resolve(&client, &config, &cli.username).await;
    let code = output::report(result, &mut std::io::stdout().lock(), &mut std::io::stderr());
    ExitCode::from(code)
}

/// Initializes logging on stderr; stdout is reserved for keys.
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug { "kc_ssh_auth=debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}
