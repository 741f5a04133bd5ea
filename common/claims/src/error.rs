use thiserror::Error;

pub type ClaimsResult<T> = Result<T, ClaimsError>;

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("token does not have three segments")]
    SegmentCount,
    #[error("claims payload is not valid base64url: {0}")]
    InvalidBase64(String),
    #[error("malformed claim payload: {0}")]
    InvalidJson(String),
    #[error("invalid claim '{0}' with value '{1}'")]
    InvalidClaim(&'static str, String),
}
