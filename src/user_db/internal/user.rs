use argon2::password_hash::PasswordHashString;
use uuid::Uuid;
use crate::email_string::EmailString;
use crate::username_string::UsernameString;

/// A stored principal. The hash never leaves the user db; wire models
/// carry only the identity fields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: UsernameString,
    pub email: EmailString,
    pub hash: PasswordHashString,
}
