mod app_setup;
mod cli;
mod routes;
#[cfg(test)] mod tests;

use clap::{crate_name, Parser};
use connectverse::config::figment::FigmentExt;
use connectverse::error_exit;
use connectverse::logging::init_logging;
use log::info;
use rocket::figment::Figment;
use crate::app_setup::AppSetupFairing;
use crate::cli::CliConfig;

fn main() {
    init_logging();

    info!("{} starting up", crate_name!());

    let cli_config = CliConfig::parse();
    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }
    let figment = Figment::from(rocket::Config::default())
        .setup_app_config(cli_config.config_file);

    let result = rocket::execute(
        rocket
            ::custom(figment)
            .attach(AppSetupFairing)
            .launch()
    );
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {}", e);
    }
}
