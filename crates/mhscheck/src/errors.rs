//! Error handling and exit codes.

use mhscheck_core::constants::exit_codes;
use mhscheck_core::error::HarnessError;

/// Map a run error to the appropriate exit code.
pub fn handle_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<HarnessError>() {
        Some(HarnessError::Config(_)) => exit_codes::ERROR_CONFIG,
        Some(HarnessError::Cancelled) => exit_codes::ERROR_CANCELED,
        Some(HarnessError::MalformedResponse { .. } | HarnessError::Transport { .. }) => {
            exit_codes::ERROR_PROTOCOL
        }
        Some(HarnessError::Provisioning(_)) | None => exit_codes::ERROR_GENERIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: HarnessError) -> i32 {
        handle_error(&anyhow::Error::new(err))
    }

    #[test]
    fn error_codes() {
        assert_eq!(code(HarnessError::Config("bad".into())), 4);
        assert_eq!(code(HarnessError::Cancelled), 130);
        assert_eq!(
            code(HarnessError::MalformedResponse {
                key: "a-t1".into(),
                payload: "x".into()
            }),
            2
        );
        assert_eq!(
            code(HarnessError::Transport {
                key: "a-t1".into(),
                message: "refused".into()
            }),
            2
        );
        assert_eq!(code(HarnessError::Provisioning("down".into())), 1);
    }

    #[test]
    fn foreign_errors_are_generic() {
        let err = anyhow::anyhow!("disk full");
        assert_eq!(handle_error(&err), exit_codes::ERROR_GENERIC);
    }
}
