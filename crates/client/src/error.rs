use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures raised by the client.
///
/// `Network` covers everything that never produced an HTTP response (DNS,
/// connection reset, body decode); `Timeout` is the client-enforced request
/// deadline; `Http` carries whatever the server said; `SessionExpired` means
/// a 401 could not be recovered by a token refresh and the stored session
/// was wiped.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("{status}: {message}")]
    Http {
        status: StatusCode,
        message: String,
        details: Option<serde_json::Value>,
    },
    #[error("session expired, please log in again")]
    SessionExpired,
    #[error("token refresh failed")]
    RefreshFailed(#[source] Box<ClientError>),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status semantics of this error, when it has any.
    ///
    /// Client-enforced timeouts read as 408, an expired session as 401.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Timeout => Some(StatusCode::REQUEST_TIMEOUT),
            Self::SessionExpired => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }
}
