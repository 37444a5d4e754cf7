mod errors;
mod internal;

use async_trait::async_trait;
use crate::email_string::EmailString;
use crate::username_string::UsernameString;

pub use errors::{ConflictKind, UserDbError};
pub use internal::{ProductionUserDb, UserDbImpl};
pub use internal::user::User;

/// The principal store. Uniqueness of usernames and emails is
/// enforced here, under the store's own lock, so callers never race a
/// separate existence check against an insert.
#[async_trait]
pub trait UserDb: Send + Sync {
    async fn create_user(
        &self,
        username: &UsernameString,
        email: &EmailString,
        password: &str,
    ) -> Result<User, UserDbError>;

    /// Look a user up by email and verify the password. A missing
    /// account and a wrong password both come back as `None`; the
    /// caller must not be able to tell them apart.
    async fn check_user_credentials(
        &self,
        email: &EmailString,
        password: &str,
    ) -> Result<Option<User>, UserDbError>;

    async fn list_users(&self) -> Result<Vec<User>, UserDbError>;
}
