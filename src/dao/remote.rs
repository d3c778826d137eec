//! Backend-agnostic failures of calls to the tracker service.

use std::error::Error;
use thiserror::Error;

/// Result alias for calls to the remote tracker service.
pub type RemoteResult<T> = Result<T, RemoteError>;

type BoxedSource = Box<dyn Error + Send + Sync>;

/// Why a call to the tracker service produced no usable reply.
///
/// A well-formed refusal of a play, an undo or a score update is not an error; it arrives as
/// a `Rejected` reply. Only the recent plays listing, which has no such reply, reports
/// [`RemoteError::Refused`].
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never produced a response.
    #[error("could not reach tracker endpoint `{endpoint}`")]
    Transport {
        endpoint: String,
        #[source]
        source: BoxedSource,
    },
    /// Error status with a body that is not the expected JSON.
    #[error("tracker endpoint `{endpoint}` answered with status {status}")]
    Status { endpoint: String, status: u16 },
    /// The body could not be read as the expected reply.
    #[error("unreadable reply from tracker endpoint `{endpoint}`")]
    Decode {
        endpoint: String,
        #[source]
        source: BoxedSource,
    },
    /// The service answered `success: false`.
    #[error(
        "tracker endpoint `{endpoint}` refused the request: {}",
        .message.as_deref().unwrap_or("no reason given")
    )]
    Refused {
        endpoint: String,
        message: Option<String>,
    },
}

impl RemoteError {
    /// Endpoint path the failed call targeted.
    pub fn endpoint(&self) -> &str {
        match self {
            RemoteError::Transport { endpoint, .. }
            | RemoteError::Status { endpoint, .. }
            | RemoteError::Decode { endpoint, .. }
            | RemoteError::Refused { endpoint, .. } => endpoint,
        }
    }

    /// Whether the service itself answered and declined, as opposed to a broken exchange.
    pub fn is_refusal(&self) -> bool {
        matches!(self, RemoteError::Refused { .. })
    }
}
