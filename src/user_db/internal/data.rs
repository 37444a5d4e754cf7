use argon2::password_hash::PasswordHashString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::email_string::EmailString;
use crate::user_db::internal::user::User;
use crate::username_string::UsernameString;

#[derive(Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct UsersData {
    #[serde(rename = "user", default)]
    pub users: Vec<UserData>,
}

#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct UserData {
    pub id: Uuid,
    pub username: UsernameString,
    pub email: EmailString,

    #[serde(with = "crate::serde::password_hash_string")]
    pub password_hash: PasswordHashString,
}

impl From<UserData> for User {
    fn from(value: UserData) -> Self {
        User {
            id: value.id,
            username: value.username,
            email: value.email,
            hash: value.password_hash,
        }
    }
}

impl From<&User> for UserData {
    fn from(value: &User) -> Self {
        UserData {
            id: value.id,
            username: value.username.clone(),
            email: value.email.clone(),
            password_hash: value.hash.clone(),
        }
    }
}
