use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use time::Duration;
use crate::bin_constants::{
    DEFAULT_ACCESS_TOKEN_KEY, DEFAULT_DATA_DIR, DEFAULT_REFRESH_TOKEN_KEY,
    DEFAULT_USER_DB,
};
use crate::config::hasher_config::ProductionHasherConfigData;
use crate::lib_constants::{DEFAULT_ACCESS_TOKEN_TTL, DEFAULT_REFRESH_TOKEN_TTL};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    /// Path of the TOML user database.
    #[serde(default = "app_config_default_user_db")]
    pub user_db: PathBuf,

    /// Directory holding mutable state, currently only the session file.
    #[serde(default = "app_config_default_data_directory")]
    pub data_directory: PathBuf,

    /// JWK file with the HMAC key signing access tokens.
    #[serde(default = "app_config_default_access_token_key")]
    pub access_token_key: PathBuf,

    /// JWK file with the HMAC key signing refresh tokens. Must be a
    /// different key than [Self::access_token_key].
    #[serde(default = "app_config_default_refresh_token_key")]
    pub refresh_token_key: PathBuf,

    #[serde(default = "app_config_default_access_token_ttl_seconds")]
    pub access_token_ttl_seconds: u32,

    #[serde(default = "app_config_default_refresh_token_ttl_seconds")]
    pub refresh_token_ttl_seconds: u32,

    /// Cap on concurrently valid refresh tokens per user. `None`
    /// means multi-device use is unlimited.
    #[serde(default)]
    pub max_sessions_per_user: Option<u32>,

    #[serde(default)]
    pub hasher_config: ProductionHasherConfigData,
}

impl AppConfig {
    pub fn access_token_ttl(&self) -> Duration {
        Duration::seconds(self.access_token_ttl_seconds.into())
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::seconds(self.refresh_token_ttl_seconds.into())
    }
}

pub fn app_config_default_user_db() -> PathBuf {
    DEFAULT_USER_DB.into()
}

pub fn app_config_default_data_directory() -> PathBuf {
    DEFAULT_DATA_DIR.into()
}

pub fn app_config_default_access_token_key() -> PathBuf {
    DEFAULT_ACCESS_TOKEN_KEY.into()
}

pub fn app_config_default_refresh_token_key() -> PathBuf {
    DEFAULT_REFRESH_TOKEN_KEY.into()
}

pub fn app_config_default_access_token_ttl_seconds() -> u32 {
    DEFAULT_ACCESS_TOKEN_TTL.whole_seconds() as u32
}

pub fn app_config_default_refresh_token_ttl_seconds() -> u32 {
    DEFAULT_REFRESH_TOKEN_TTL.whole_seconds() as u32
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            user_db: app_config_default_user_db(),
            data_directory: app_config_default_data_directory(),
            access_token_key: app_config_default_access_token_key(),
            refresh_token_key: app_config_default_refresh_token_key(),
            access_token_ttl_seconds:
                app_config_default_access_token_ttl_seconds(),
            refresh_token_ttl_seconds:
                app_config_default_refresh_token_ttl_seconds(),
            max_sessions_per_user: None,
            hasher_config: ProductionHasherConfigData::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_defaults_match() {
        assert_eq!(
            AppConfig::default(),
            serde_json::de::from_str("{}").unwrap(),
        )
    }

    #[test]
    fn default_access_ttl_is_one_hour() {
        assert_eq!(AppConfig::default().access_token_ttl().whole_seconds(), 3600);
    }
}
