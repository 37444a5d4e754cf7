use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug)]
pub struct RefreshTokenData {
    pub user_id: Uuid,
    pub issued_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}
