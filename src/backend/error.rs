use std::time::Duration;

use thiserror::Error;

/// Why a single backend call failed. Recorded per task, never fatal to a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("cancelled by a newer request")]
    Cancelled,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("rejected: {0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            BackendError::Timeout(Duration::from_secs(120)).to_string(),
            "timed out after 120s"
        );
        assert_eq!(
            BackendError::Rejected("quota exceeded".into()).to_string(),
            "rejected: quota exceeded"
        );
    }
}
