//! Output and exit status for the SSH daemon.
//!
//! stdout carries key lines and nothing else. Diagnostics go to stderr.

use std::io::Write;

use crate::error::{SshAuthError, SshAuthResult};
use crate::pipeline::Resolution;

/// Exit status for success, including a skipped disabled account.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for every fatal condition.
pub const EXIT_FAILURE: u8 = 1;

/// Prints an error message.
pub fn error(message: &str) {
    let _ = writeln!(std::io::stderr().lock(), "error: {message}");
}

/// Writes each key on its own line and flushes.
pub fn write_keys<W: Write>(out: &mut W, keys: &[String]) -> SshAuthResult<()> {
    for key in keys {
        writeln!(out, "{key}")?;
    }
    out.flush()?;
    Ok(())
}

/// Maps a resolution outcome to process output and an exit status.
///
/// Keys are only written once the whole resolution has succeeded, so a
/// failure never leaves a partial list on `out`.
pub fn report<W: Write, E: Write>(
    result: SshAuthResult<Resolution>,
    out: &mut W,
    err: &mut E,
) -> u8 {
    let failure = match result {
        Ok(Resolution::Keys(keys)) => match write_keys(out, &keys) {
            Ok(()) => return EXIT_SUCCESS,
            Err(e) => e,
        },
        Ok(Resolution::Disabled) => return EXIT_SUCCESS,
        Err(e) => e,
    };

    report_error(&failure, err);
    EXIT_FAILURE
}

fn report_error<E: Write>(failure: &SshAuthError, err: &mut E) {
    tracing::debug!(error = ?failure, "Key resolution failed");
    let _ = writeln!(err, "error: {failure}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(result: SshAuthResult<Resolution>) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = report(result, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn keys_go_to_stdout() {
        let (code, out, err) = run(Ok(Resolution::Keys(vec![
            "ssh-ed25519 AAAA... a@b".to_string(),
            "ssh-rsa BBBB... c@d".to_string(),
        ])));

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "ssh-ed25519 AAAA... a@b\nssh-rsa BBBB... c@d\n");
        assert!(err.is_empty());
    }

    #[test]
    fn disabled_is_silent_success() {
        let (code, out, err) = run(Ok(Resolution::Disabled));

        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn fatal_errors_go_to_stderr_only() {
        let failures = [
            SshAuthError::auth("401 - invalid_client"),
            SshAuthError::query("connection refused"),
            SshAuthError::UserNotFound("alice".into()),
            SshAuthError::NoAttributes("alice".into()),
            SshAuthError::AttributeNotFound("sshKeys".into()),
            SshAuthError::NoKeys("alice".into()),
        ];

        for failure in failures {
            let expected = failure.to_string();
            let (code, out, err) = run(Err(failure));

            assert_eq!(code, EXIT_FAILURE);
            assert!(out.is_empty());
            assert_eq!(err, format!("error: {expected}\n"));
        }
    }

    #[test]
    fn write_failure_is_reported() {
        struct ClosedPipe;

        impl Write for ClosedPipe {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut err = Vec::new();
        let code = report(
            Ok(Resolution::Keys(vec!["keyA".to_string()])),
            &mut ClosedPipe,
            &mut err,
        );

        assert_eq!(code, EXIT_FAILURE);
        assert!(String::from_utf8(err).unwrap().starts_with("error: failed to write keys"));
    }
}
