use connectverse::access_granter::{GrantedTokens, RenewedTokens, UserInfo};
use connectverse::email_string::EmailString;
use connectverse::username_string::UsernameString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// username and email arrive as plain strings; the handlers validate
// them so a malformed value is a 400 with a message instead of a
// failure inside the body guard
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// the snake_case alias keeps pre-camelCase clients working
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenewRequest {
    #[serde(alias = "refresh_token")]
    pub refresh_token: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(alias = "refresh_token")]
    pub refresh_token: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_expiry_in: i64,
}

impl From<GrantedTokens> for TokenPairResponse {
    fn from(value: GrantedTokens) -> Self {
        TokenPairResponse {
            access_token: value.access_token,
            refresh_token: value.refresh_token,
            access_token_expiry_in: value.access_token_ttl.whole_seconds(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<RenewedTokens> for RenewResponse {
    fn from(value: RenewedTokens) -> Self {
        RenewResponse {
            access_token: value.access_token,
            refresh_token: value.refresh_token,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: UsernameString,
    pub email: EmailString,
}

impl From<UserInfo> for UserResponse {
    fn from(value: UserInfo) -> Self {
        UserResponse {
            id: value.id,
            username: value.username,
            email: value.email,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
