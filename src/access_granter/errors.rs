use thiserror::Error;
use crate::access_token::AccessTokenGeneratorError;
use crate::lib_constants::MIN_PASSWORD_LEN;
use crate::refresh_token::RefreshTokenGeneratorError;
use crate::session_storage::SessionStorageError;
use crate::user_db::{ConflictKind, UserDbError};

/// The first six variants describe caller mistakes and map to 4xx
/// responses; the rest wrap internal failures and must surface as an
/// opaque server error.
#[derive(Debug, Error)]
pub enum AccessGranterError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0} already exists")]
    Duplicate(ConflictKind),

    #[error("password must be at least {MIN_PASSWORD_LEN} characters long")]
    PasswordTooShort,

    #[error("refresh token is missing")]
    MissingToken,

    #[error("malformed authorization header")]
    HeaderFormat,

    #[error("invalid token")]
    TokenInvalid,

    #[error("expired token")]
    TokenExpired,

    #[error("revoked token")]
    RevokedToken,

    #[error("user database error: {0}")]
    UserDb(#[from] UserDbError),

    #[error("session storage error: {0}")]
    SessionStorage(#[from] SessionStorageError),

    #[error("error generating access token: {0}")]
    AccessTokenGenerator(#[from] AccessTokenGeneratorError),

    #[error("error generating refresh token: {0}")]
    RefreshTokenGenerator(#[from] RefreshTokenGeneratorError),
}
