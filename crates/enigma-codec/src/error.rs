use chain_enigma::EnigmaError;
use thiserror::Error;

/// Codec errors, grouped by the contract that was violated.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed input such as a bad address, key or chain id.
    #[error("validation error: {0}")]
    Validation(String),

    /// A transaction kind, message tag or pubkey algorithm the codec does
    /// not handle.
    #[error("unsupported kind: {0}")]
    UnsupportedKind(String),

    /// The input disagrees with the token configuration.
    #[error("configuration mismatch: {0}")]
    ConfigMismatch(String),

    /// Wrong cardinality, missing nonce, or a non CAIP-5 chain id.
    #[error("format error: {0}")]
    Format(String),

    #[error("hashed chain IDs cannot be decoded: {0}")]
    HashedChainId(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    /// The token configuration itself is unusable.
    #[error("invalid token configuration: {0}")]
    Config(String),
}

impl From<EnigmaError> for CodecError {
    fn from(e: EnigmaError) -> Self {
        match e {
            EnigmaError::UnsupportedPubkeyType(_) => CodecError::UnsupportedKind(e.to_string()),
            EnigmaError::InvalidAddress(_)
            | EnigmaError::InvalidPublicKey(_)
            | EnigmaError::InvalidSignature(_) => CodecError::Validation(e.to_string()),
            EnigmaError::SigningError(_) | EnigmaError::EncodingError(_) => {
                CodecError::Encoding(e.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError::Encoding(format!("json: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_validation() {
        let err = CodecError::Validation("input must not be empty".into());
        assert_eq!(err.to_string(), "validation error: input must not be empty");
    }

    #[test]
    fn display_unsupported_kind() {
        let err = CodecError::UnsupportedKind("bns/return_escrow".into());
        assert_eq!(err.to_string(), "unsupported kind: bns/return_escrow");
    }

    #[test]
    fn display_config_mismatch() {
        let err = CodecError::ConfigMismatch("ticker mismatch".into());
        assert_eq!(err.to_string(), "configuration mismatch: ticker mismatch");
    }

    #[test]
    fn display_hashed_chain_id() {
        let err = CodecError::HashedChainId("enigma:hashed-abab".into());
        assert_eq!(
            err.to_string(),
            "hashed chain IDs cannot be decoded: enigma:hashed-abab"
        );
    }

    #[test]
    fn unsupported_pubkey_maps_to_unsupported_kind() {
        let err: CodecError =
            EnigmaError::UnsupportedPubkeyType("tendermint/PubKeySr25519".into()).into();
        assert!(matches!(err, CodecError::UnsupportedKind(_)));
        assert!(err.to_string().contains("unsupported pubkey type"));
    }

    #[test]
    fn invalid_signature_maps_to_validation() {
        let err: CodecError = EnigmaError::InvalidSignature("short".into()).into();
        assert!(matches!(err, CodecError::Validation(_)));
    }

    #[test]
    fn debug_format_works() {
        let err = CodecError::Format("expected exactly one message".into());
        let debug = format!("{:?}", err);
        assert!(debug.contains("Format"));
    }
}
