use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single API call.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection refused, reset, DNS failure and the like
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },

    #[error("GET {url} failed with status {status}")]
    Status { url: String, status: StatusCode },

    /// Body arrived but does not have the expected shape
    #[error("GET {url} returned an unexpected body: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The two failure classes a caller is expected to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    TransportOrServer,
    Decode,
}

impl Error {
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Transport { .. } | Error::Timeout { .. } | Error::Status { .. } => {
                FailureKind::TransportOrServer
            }
            Error::Decode { .. } => FailureKind::Decode,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Error::Transport { url, .. }
            | Error::Timeout { url, .. }
            | Error::Status { url, .. }
            | Error::Decode { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_timeout_are_transport_failures() {
        let status = Error::Status {
            url: "http://localhost/posts".into(),
            status: StatusCode::BAD_GATEWAY,
        };
        let timeout = Error::Timeout {
            url: "http://localhost/posts".into(),
            after: Duration::from_secs(3),
        };
        assert_eq!(status.kind(), FailureKind::TransportOrServer);
        assert_eq!(timeout.kind(), FailureKind::TransportOrServer);
        assert_eq!(
            status.to_string(),
            "GET http://localhost/posts failed with status 502 Bad Gateway"
        );
    }

    #[test]
    fn decode_is_its_own_kind() {
        let source = serde_json::from_str::<Vec<u64>>("{").unwrap_err();
        let err = Error::Decode {
            url: "http://localhost/posts/1/comments".into(),
            source,
        };
        assert_eq!(err.kind(), FailureKind::Decode);
        assert_eq!(err.url(), "http://localhost/posts/1/comments");
    }
}
