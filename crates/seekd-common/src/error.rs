//! Error types and exit codes for Seekd
//!
//! This module defines:
//! - `SeekdError`: Application-specific error enum
//! - Process exit-code mapping for each error class

/// Convenience result alias used throughout the workspace
pub type Result<T> = std::result::Result<T, SeekdError>;

/// Application-specific error types
///
/// Every fatal error surfaces to the operator as a single message on
/// stderr followed by process termination with the mapped exit code.
#[derive(thiserror::Error, Debug)]
pub enum SeekdError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0} is only available in cluster mode")]
    IllegalMode(String),

    #[error("no nodes added to the cluster")]
    EmptyClusterMembership,

    #[error("backing store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("invalid node: {0}")]
    InvalidNode(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Exit code for successful invocations
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for fatal errors (configuration, store, mode violations)
pub const EXIT_FATAL: i32 = 1;

/// Exit code for bad or missing CLI arguments (emitted by the parser)
pub const EXIT_USAGE: i32 = 2;

/// Exit code for starting a cluster with zero registered nodes
pub const EXIT_EMPTY_MEMBERSHIP: i32 = 3;

impl SeekdError {
    /// Map the error to its process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            SeekdError::EmptyClusterMembership => EXIT_EMPTY_MEMBERSHIP,
            _ => EXIT_FATAL,
        }
    }
}

impl From<anyhow::Error> for SeekdError {
    fn from(value: anyhow::Error) -> Self {
        SeekdError::Internal(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SeekdError::Config("data dir </tmp/missing> does not exist".to_string());
        assert_eq!(
            format!("{}", err),
            "configuration error: data dir </tmp/missing> does not exist"
        );

        let err = SeekdError::IllegalMode("add node".to_string());
        assert_eq!(format!("{}", err), "add node is only available in cluster mode");

        let err = SeekdError::EmptyClusterMembership;
        assert_eq!(format!("{}", err), "no nodes added to the cluster");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SeekdError::EmptyClusterMembership.exit_code(), EXIT_EMPTY_MEMBERSHIP);
        assert_eq!(SeekdError::Config("x".to_string()).exit_code(), EXIT_FATAL);
        assert_eq!(SeekdError::IllegalMode("add node".to_string()).exit_code(), EXIT_FATAL);
        assert_eq!(
            SeekdError::StoreUnavailable("connection refused".to_string()).exit_code(),
            EXIT_FATAL
        );
    }

    #[test]
    fn test_exit_codes_fit_a_process_exit_status() {
        // main returns these through std::process::ExitCode (u8)
        for code in [EXIT_SUCCESS, EXIT_FATAL, EXIT_USAGE, EXIT_EMPTY_MEMBERSHIP] {
            assert!(u8::try_from(code).is_ok());
        }
    }

    #[test]
    fn test_from_anyhow() {
        let err: SeekdError = anyhow::anyhow!("boom").into();
        assert_eq!(format!("{}", err), "internal error: boom");
    }
}
