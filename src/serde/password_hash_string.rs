//! Serde helpers for storing [PasswordHashString] values in the
//! user db as their PHC string representation.

use argon2::password_hash::PasswordHashString;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(
    value: &PasswordHashString,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_str())
}

pub fn deserialize<'de, D>(
    deserializer: D,
) -> Result<PasswordHashString, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    PasswordHashString::new(&value)
        .map_err(serde::de::Error::custom)
}
