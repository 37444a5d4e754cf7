pub mod app_config;
pub mod figment;
pub mod hasher_config;
