pub const DEFAULT_CONFIG_FILE: &str = "/etc/connectverse/config.toml";
pub const DEFAULT_USER_DB: &str = "/etc/connectverse/users.toml";
pub const DEFAULT_DATA_DIR: &str = "/var/connectverse";
pub const DEFAULT_ACCESS_TOKEN_KEY: &str = "/etc/connectverse/access_token.jwk";
pub const DEFAULT_REFRESH_TOKEN_KEY: &str = "/etc/connectverse/refresh_token.jwk";

pub const APP_CONFIG_ENV_PREFIX: &str = "CONNECTVERSE_";
