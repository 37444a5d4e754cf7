use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use crate::session_storage::internal::session::Session;

#[derive(Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct SessionsData {
    #[serde(rename = "session", default)]
    pub sessions: Vec<SessionData>,
}

#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct SessionData {
    pub refresh_token: String,
    pub user_id: Uuid,

    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
}

impl From<SessionData> for Session {
    fn from(value: SessionData) -> Self {
        Session {
            refresh_token: value.refresh_token,
            user_id: value.user_id,
            issued_at: value.issued_at,
        }
    }
}

impl From<&Session> for SessionData {
    fn from(value: &Session) -> Self {
        SessionData {
            refresh_token: value.refresh_token.clone(),
            user_id: value.user_id,
            issued_at: value.issued_at,
        }
    }
}
