use reqwest::StatusCode;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Failure taxonomy for every call the client issues.
///
/// Transport failures leave store state untouched; `Unauthorized` is handled
/// centrally by the request authenticator before it reaches the caller; the
/// stores attach no business meaning to `Api` failures.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("cannot reach server: {0}")]
    Transport(String),
    #[error("authorization failed")]
    Unauthorized,
    #[error("request rejected with status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn from_status(status: StatusCode, message: String) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            Self::Unauthorized
        } else {
            Self::Api {
                status: status.as_u16(),
                message,
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}
