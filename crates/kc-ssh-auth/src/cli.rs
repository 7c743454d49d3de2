//! CLI argument parsing.
//!
//! sshd passes the login username as the only argument and reads stdout as
//! key material, so there are no flags: `--help` and `-x` style arguments
//! are taken as usernames, and any extra arguments are ignored.

use clap::Parser;

use crate::output::EXIT_FAILURE;

/// Prints the SSH public keys stored on a Keycloak user.
///
/// Intended for use as sshd's `AuthorizedKeysCommand`.
#[derive(Debug, Parser)]
#[command(name = "keycloak-ssh-auth")]
#[command(about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Login username to resolve.
    #[arg(allow_hyphen_values = true)]
    pub username: String,

    /// Extra arguments after the username, ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub ignored: Vec<String>,
}

impl Cli {
    /// Parses the process arguments.
    ///
    /// On failure the usage message has already been printed on stderr and
    /// the exit status to terminate with is returned.
    pub fn parse_args() -> Result<Self, u8> {
        Self::try_parse_from_args(std::env::args_os())
    }

    /// Parses an explicit argument list, see [`Cli::parse_args`].
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, u8>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| {
            let _ = e.print();
            EXIT_FAILURE
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_username() {
        let cli = Cli::try_parse_from_args(["keycloak-ssh-auth", "alice"]).unwrap();
        assert_eq!(cli.username, "alice");
    }

    #[test]
    fn missing_username_fails() {
        let code = Cli::try_parse_from_args(["keycloak-ssh-auth"]).unwrap_err();
        assert_eq!(code, EXIT_FAILURE);
    }

    #[test]
    fn help_and_version_are_usernames() {
        let cli = Cli::try_parse_from_args(["keycloak-ssh-auth", "--help"]).unwrap();
        assert_eq!(cli.username, "--help");

        let cli = Cli::try_parse_from_args(["keycloak-ssh-auth", "-V"]).unwrap();
        assert_eq!(cli.username, "-V");
    }

    #[test]
    fn hyphenated_username_is_accepted() {
        let cli = Cli::try_parse_from_args(["keycloak-ssh-auth", "-svc"]).unwrap();
        assert_eq!(cli.username, "-svc");
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let cli =
            Cli::try_parse_from_args(["keycloak-ssh-auth", "alice", "ssh-ed25519", "-x"]).unwrap();
        assert_eq!(cli.username, "alice");
        assert_eq!(cli.ignored, vec!["ssh-ed25519", "-x"]);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
