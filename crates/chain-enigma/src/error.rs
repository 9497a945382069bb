use thiserror::Error;

/// Wire-level Enigma chain errors.
#[derive(Debug, Error)]
pub enum EnigmaError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("unsupported pubkey type: {0}")]
    UnsupportedPubkeyType(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("encoding error: {0}")]
    EncodingError(String),
}

impl From<serde_json::Error> for EnigmaError {
    fn from(e: serde_json::Error) -> Self {
        EnigmaError::EncodingError(format!("json: {e}"))
    }
}

impl From<base64::DecodeError> for EnigmaError {
    fn from(e: base64::DecodeError) -> Self {
        EnigmaError::EncodingError(format!("base64: {e}"))
    }
}
