//! Error type shared by the NAV client, the PDF poller and the HTTP layer.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// The company has no endpoint in the registry. Raised before any remote call.
    #[error("Company '{0}' not found in configuration")]
    UnknownCompany(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Anything that went wrong talking to NAV: transport, auth, SOAP faults.
    #[error("{0}")]
    RemoteInvocation(String),

    #[error("PDF for job '{0}' not found")]
    ArtifactNotFound(String),

    #[error("PDF for job '{0}' is still being generated")]
    ArtifactLocked(String),

    #[error("IO error: {0}")]
    Io(String),

    /// The proxy itself is set up wrong, e.g. the greeting company has no endpoint.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type NavResult<T> = Result<T, NavError>;

impl From<std::io::Error> for NavError {
    fn from(err: std::io::Error) -> Self {
        NavError::Io(err.to_string())
    }
}
