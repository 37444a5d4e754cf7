mod errors;
mod internal;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

pub use errors::SessionStorageError;
pub use internal::{
    ProductionSessionStorage, SessionStorageConfig, SessionStorageImpl,
};
pub use internal::session::Session;

/// The set of currently valid refresh tokens. A token is a member
/// exactly between its issuance and its revocation; everything else
/// about refresh token validity (signature, embedded expiry) lives in
/// the token itself.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Record an issued token. Idempotent.
    async fn add_session(
        &self,
        refresh_token: &str,
        user_id: Uuid,
        issued_at: OffsetDateTime,
    ) -> Result<(), SessionStorageError>;

    /// Membership test. Entries past the maximum session age count
    /// as absent.
    async fn contains_session(
        &self,
        refresh_token: &str,
    ) -> Result<bool, SessionStorageError>;

    /// Revoke a token. Idempotent; returns whether it was present.
    async fn remove_session(
        &self,
        refresh_token: &str,
    ) -> Result<bool, SessionStorageError>;
}
