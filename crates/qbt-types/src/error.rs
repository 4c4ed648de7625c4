//! Error type shared by every qBittorrent Web API operation.

use thiserror::Error;

/// Error type for qBittorrent Web API operations.
#[derive(Error, Debug)]
pub enum QbtError {
    /// The request could not be built (bad base URL, bad endpoint, unusable file name).
    #[error("failed to build request: {0}")]
    Request(String),

    /// Network-related errors (connection failures, timeouts, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// A local file could not be opened or read for upload.
    #[error("file system error: {0}")]
    FileSystem(String),

    /// The daemon refused the login.
    #[error("authentication rejected ({reason}, status {status})")]
    AuthenticationRejected {
        /// Why the daemon refused the credentials.
        reason: AuthRejection,
        /// HTTP status returned by the login endpoint.
        status: u16,
    },

    /// A call expecting `200 OK` received another status.
    #[error("received bad response: status {status}: {message}")]
    BadResponse {
        /// Literal HTTP status code.
        status: u16,
        /// Endpoint-specific meaning of the status, or its canonical reason.
        message: String,
    },

    /// The daemon rejected the torrent payload (file or links).
    #[error("invalid torrent: {0}")]
    InvalidTorrent(String),

    /// A caller-supplied value breaks a daemon rule checked before sending.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl QbtError {
    /// Returns the HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationRejected { status, .. } | Self::BadResponse { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Reason the daemon gave for refusing a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// Username or password is wrong.
    InvalidCredentials,
    /// The client IP is banned after too many failed attempts.
    IpBanned,
}

impl std::fmt::Display for AuthRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => f.write_str("invalid credentials"),
            Self::IpBanned => f.write_str("IP banned for too many failed login attempts"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_for_http_level_errors() {
        let err = QbtError::BadResponse {
            status: 404,
            message: "torrent hash was not found".into(),
        };
        assert_eq!(err.status(), Some(404));

        let err = QbtError::AuthenticationRejected {
            reason: AuthRejection::IpBanned,
            status: 403,
        };
        assert_eq!(err.status(), Some(403));

        assert_eq!(QbtError::Network("refused".into()).status(), None);
    }

    #[test]
    fn messages_name_the_failing_stage() {
        let err = QbtError::AuthenticationRejected {
            reason: AuthRejection::IpBanned,
            status: 403,
        };
        assert_eq!(
            err.to_string(),
            "authentication rejected (IP banned for too many failed login attempts, status 403)"
        );
        assert_eq!(
            QbtError::Decode("expected value".into()).to_string(),
            "failed to decode response: expected value"
        );
    }
}
