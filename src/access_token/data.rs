use time::OffsetDateTime;
use uuid::Uuid;

/// Verified claims of an access token. The decoder only checks the
/// signature and payload shape; comparing the instants against the
/// current time is the caller's decision.
#[derive(Debug)]
pub struct AccessTokenData {
    pub user_id: Uuid,
    pub not_before: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}
