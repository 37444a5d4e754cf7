use std::fmt;
use std::io::Error as IoError;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConflictKind {
    Username,
    Email,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            match self {
                ConflictKind::Username => "username",
                ConflictKind::Email => "email",
            }
        )
    }
}

#[derive(Debug, Error)]
pub enum UserDbError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    LockingFailed(std::fs::TryLockError),

    #[error("invalid user db contents: {0}")]
    Parsing(#[from] toml::de::Error),

    #[error("serializing the user db failed: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("{0} already taken")]
    Duplicate(ConflictKind),

    #[error("password hashing failed: {0}")]
    Hashing(argon2::password_hash::Error),
}

impl From<std::fs::TryLockError> for UserDbError {
    fn from(e: std::fs::TryLockError) -> Self {
        match e {
            std::fs::TryLockError::WouldBlock => UserDbError::LockingFailed(e),
            std::fs::TryLockError::Error(e) => UserDbError::Io(e),
        }
    }
}
