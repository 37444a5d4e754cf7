use time::Duration;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::seconds(3600);
pub const DEFAULT_REFRESH_TOKEN_TTL: Duration = Duration::days(30);

pub const DEFAULT_ARGON2_M_COST: u32 = 19 * 1024;
pub const DEFAULT_ARGON2_T_COST: u32 = 2;
pub const DEFAULT_ARGON2_P_COST: u32 = 1;
pub const DEFAULT_ARGON2_OUTPUT_LEN: Option<usize> = None;

pub const HMAC_KEY_SIZE: usize = 64;
