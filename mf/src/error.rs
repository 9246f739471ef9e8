//! Game plan synthesis error types
//!
//! Every pipeline stage maps its own failure onto exactly one [`ErrorKind`],
//! and the orchestrator passes it through untouched.

use std::fmt;
use thiserror::Error;

use crate::decode::DecodeError;
use crate::llm::LlmError;
use mindstore::StoreError;

/// Errors surfaced by the synthesis pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Corpus or result store unreachable/failed
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),

    /// No generation credential configured
    #[error("Generation credential missing: set the {env_var} environment variable")]
    CredentialMissing { env_var: String },

    /// Generation service could not be reached
    #[error("Generation service unavailable: {0}")]
    ServiceUnavailable(#[source] LlmError),

    /// Generation service answered with an error or an empty answer
    #[error("Generation service error: {0}")]
    UpstreamError(#[source] LlmError),

    /// Generation service answer does not match the game plan contract
    #[error("Malformed generation response: {0}")]
    MalformedResponse(#[from] DecodeError),
}

/// Discriminant of [`Error`], for matching without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    StorageUnavailable,
    CredentialMissing,
    ServiceUnavailable,
    UpstreamError,
    MalformedResponse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::StorageUnavailable => "storage_unavailable",
            ErrorKind::CredentialMissing => "credential_missing",
            ErrorKind::ServiceUnavailable => "service_unavailable",
            ErrorKind::UpstreamError => "upstream_error",
            ErrorKind::MalformedResponse => "malformed_response",
        };
        f.write_str(name)
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            Error::CredentialMissing { .. } => ErrorKind::CredentialMissing,
            Error::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            Error::UpstreamError(_) => ErrorKind::UpstreamError,
            Error::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    /// Whether a client should simply try again later
    ///
    /// A missing credential is a deployment fault and never clears by itself.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UpstreamError | ErrorKind::MalformedResponse | ErrorKind::ServiceUnavailable
        )
    }

    /// HTTP status reported at the API boundary; distinct per kind
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::StorageUnavailable => 503,
            ErrorKind::CredentialMissing => 500,
            ErrorKind::ServiceUnavailable => 504,
            ErrorKind::UpstreamError => 502,
            ErrorKind::MalformedResponse => 422,
        }
    }
}

impl From<LlmError> for Error {
    fn from(err: LlmError) -> Self {
        if err.is_transport() {
            Error::ServiceUnavailable(err)
        } else {
            Error::UpstreamError(err)
        }
    }
}
