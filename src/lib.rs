pub mod access_granter;
pub mod access_token;
pub mod bin_constants;
pub mod config;
pub mod email_string;
pub mod hasher;
pub mod hmac_key_generator;
mod lib_constants;
pub mod logging;
pub mod refresh_token;
pub mod rng;
pub mod serde;
pub mod session_storage;
pub mod user_db;
pub mod username_string;
pub mod util;

pub use lib_constants::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
