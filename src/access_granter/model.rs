use time::Duration;
use uuid::Uuid;
use crate::email_string::EmailString;
use crate::username_string::UsernameString;

/// A freshly issued token pair, handed out on signup and login.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_ttl: Duration,
}

/// Result of a renewal: a new access token plus the rotated-in
/// replacement refresh token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenewedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// A principal as exposed to other authenticated principals. No
/// password hash, by construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: UsernameString,
    pub email: EmailString,
}
