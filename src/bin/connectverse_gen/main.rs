mod cli;

use clap::Parser;
use connectverse::config::app_config::AppConfig;
use connectverse::config::figment::FigmentExt;
use connectverse::error_exit;
use connectverse::hmac_key_generator::make_hmac_key;
use log::{error, info};
use rocket::figment::Figment;
use std::process::exit;
use crate::cli::CliConfig;

fn main() {
    env_logger::init();

    let cli_config = CliConfig::parse();

    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }

    let app_config: AppConfig = Figment::new()
        .setup_app_config(&cli_config.config_file)
        .extract()
        .unwrap_or_else(|e| {
            for e in e {
                error!("{e}");
            }
            info!("finishing due to a configuration error");
            exit(1)
        });

    let mut rng = rand::thread_rng();
    make_hmac_key(&app_config.access_token_key, &mut rng)
        .unwrap_or_else(|e|
            error_exit!("could not generate the access token key: {e}")
        );
    make_hmac_key(&app_config.refresh_token_key, &mut rng)
        .unwrap_or_else(|e|
            error_exit!("could not generate the refresh token key: {e}")
        );
    info!(
        "wrote fresh signing keys to {} and {}",
        app_config.access_token_key.display(),
        app_config.refresh_token_key.display(),
    );
}
