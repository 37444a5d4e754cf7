use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    pub refresh_token: String,
    pub user_id: Uuid,
    pub issued_at: OffsetDateTime,
}
