//! Source error types.

use thiserror::Error;

/// Errors that can occur while fetching a question bank.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The server has no bank at this URL.
    #[error("question bank not found at {0}")]
    NotFound(String),

    /// The server answered with an error status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// A local file could not be read.
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
}

impl SourceError {
    /// Returns `true` if retrying cannot help.
    pub fn is_permanent(&self) -> bool {
        match self {
            SourceError::NotFound(_) | SourceError::Read { .. } => true,
            SourceError::Status { status, .. } => *status < 500,
            SourceError::Timeout(_) | SourceError::NetworkError(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanence() {
        assert!(SourceError::NotFound("u".into()).is_permanent());
        assert!(SourceError::Status {
            status: 403,
            url: "u".into()
        }
        .is_permanent());
        assert!(!SourceError::Status {
            status: 503,
            url: "u".into()
        }
        .is_permanent());
        assert!(!SourceError::Timeout(10).is_permanent());
        assert!(!SourceError::NetworkError("reset".into()).is_permanent());
    }
}
