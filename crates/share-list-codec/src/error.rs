use thiserror::Error;

/// Why a token could not be turned back into a list.
///
/// Every variant means the same thing to a user: the link is invalid or has expired.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token is not a valid compressed stream")]
    Decompress,
    #[error("decompressed payload is not valid UTF-16: {0}")]
    Utf16(#[from] std::string::FromUtf16Error),
    #[error("payload is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("payload matches neither the compact nor the legacy share format")]
    UnrecognizedShape,
    #[error("payload has the right shape but malformed fields: {0}")]
    Schema(#[source] serde_json::Error),
}
