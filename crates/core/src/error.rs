//! Errors raised while decoding a survey payload.

use thiserror::Error;

use crate::model::QuestionSetError;

/// Why a fragment could not be turned into a question set.
///
/// These never reach the UI: `decode_fragment` logs them and substitutes the
/// error question.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PayloadError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("malformed percent escape at byte {position}")]
    PercentEscape { position: usize },
    #[error("payload is empty")]
    EmptySource,
    #[error("invalid question payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Questions(#[from] QuestionSetError),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}
