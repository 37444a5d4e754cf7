use std::io;
use josekit::JoseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefreshTokenDecoderError {
    #[error("cryptographic operation failed: {0}")]
    Crypto(#[from] JoseError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid subject in the payload: {0}")]
    PayloadSubject(uuid::Error),

    #[error("missing {part} in the payload")]
    PayloadMissing {
        part: &'static str,
    },
}
