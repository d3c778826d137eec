//! Error types raised by the HTTP tracker service client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::remote::RemoteError;
use crate::dto::response::MalformedResponse;

/// Convenient result alias returning [`HttpServiceError`] failures.
pub type HttpResult<T> = Result<T, HttpServiceError>;

/// Failures that can occur while talking to the tracker endpoints.
#[derive(Debug, Error)]
pub enum HttpServiceError {
    /// Required environment variable is missing.
    #[error("missing tracker environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    /// Base URL is not an absolute http(s) URL.
    #[error("invalid tracker base URL `{url}`")]
    InvalidBaseUrl { url: String },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build tracker HTTP client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or its body could not be read.
    #[error("failed to send tracker request to `{path}`")]
    RequestSend {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with an error status and no JSON body.
    #[error("unexpected tracker response status {status} for `{path}`")]
    RequestStatus { path: String, status: StatusCode },
    /// Response payload could not be parsed into the expected JSON shape.
    #[error("failed to decode tracker response for `{path}`")]
    DecodeResponse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// The service answered `success: false` where no refusal reply exists.
    #[error("tracker refused the request to `{path}`")]
    Refused {
        path: String,
        message: Option<String>,
    },
    /// The body reported success but lacked the fields success implies.
    #[error("malformed tracker response for `{path}`")]
    Malformed {
        path: String,
        #[source]
        source: MalformedResponse,
    },
}

impl From<HttpServiceError> for RemoteError {
    fn from(err: HttpServiceError) -> Self {
        match err {
            HttpServiceError::RequestSend { path, source } => RemoteError::Transport {
                endpoint: path,
                source: Box::new(source),
            },
            HttpServiceError::RequestStatus { path, status } => RemoteError::Status {
                endpoint: path,
                status: status.as_u16(),
            },
            HttpServiceError::DecodeResponse { path, source } => RemoteError::Decode {
                endpoint: path,
                source: Box::new(source),
            },
            HttpServiceError::Malformed { path, source } => RemoteError::Decode {
                endpoint: path,
                source: Box::new(source),
            },
            HttpServiceError::Refused { path, message } => RemoteError::Refused {
                endpoint: path,
                message,
            },
            // Setup failures are raised by `connect`, before any endpoint is called.
            setup @ (HttpServiceError::MissingEnvVar { .. }
            | HttpServiceError::InvalidBaseUrl { .. }
            | HttpServiceError::ClientBuilder { .. }) => RemoteError::Transport {
                endpoint: String::new(),
                source: Box::new(setup),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_failures_keep_their_endpoint() {
        let remote = RemoteError::from(HttpServiceError::RequestStatus {
            path: "undo".into(),
            status: StatusCode::BAD_GATEWAY,
        });
        assert!(matches!(
            &remote,
            RemoteError::Status { endpoint, status: 502 } if endpoint == "undo"
        ));

        let decode = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let remote = RemoteError::from(HttpServiceError::DecodeResponse {
            path: "run".into(),
            source: decode,
        });
        assert!(matches!(remote, RemoteError::Decode { .. }));
        assert_eq!(remote.endpoint(), "run");

        let remote = RemoteError::from(HttpServiceError::Refused {
            path: "plays".into(),
            message: Some("game is closed".into()),
        });
        assert!(remote.is_refusal());
        assert_eq!(remote.endpoint(), "plays");
    }
}
