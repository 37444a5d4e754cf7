use async_trait::async_trait;
use connectverse::access_granter::AccessGranter;
use connectverse::access_token::{AccessTokenDecoder, AccessTokenGenerator};
use connectverse::config::app_config::AppConfig;
use connectverse::hasher::{ProductionHasher, ProductionHasherConfig};
use connectverse::refresh_token::{RefreshTokenDecoder, RefreshTokenGenerator};
use connectverse::rng::SyncRng;
use connectverse::session_storage::ProductionSessionStorage;
use connectverse::user_db::ProductionUserDb;
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rocket::fairing::{Fairing, Info};
use rocket::{Build, Rocket};
use crate::routes::ApiRocketBuildExt;

pub struct AppSetupFairing;

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        use rocket::fairing::Kind;
        Info {
            name: "app setup",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        let config: AppConfig = ok_or_bail!(
            rocket,
            rocket.figment().extract(),
            |e| {
                for e in e {
                    error!("{e}");
                }
                info!("finishing due to a config parse error");
            }
        );

        let argon2_params = ok_or_bail!(
            rocket,
            config.hasher_config.clone().try_into(),
            |e| error!("hasher config is invalid: {e}")
        );
        let hasher = ProductionHasher::new(
            ProductionHasherConfig::new(argon2_params),
            SyncRng::new(StdRng::from_entropy()),
        );

        let user_db = ok_or_bail!(
            rocket,
            ProductionUserDb::new(&config, hasher).await,
            |e| error!("user db initialization failed: {e}")
        );
        let session_storage = ok_or_bail!(
            rocket,
            ProductionSessionStorage::new(&config).await,
            |e| error!("session storage initialization failed: {e}")
        );

        let access_token_generator = ok_or_bail!(
            rocket,
            AccessTokenGenerator::from_file(&config.access_token_key),
            |e| error!("could not initialize access token generator: {e}")
        );
        let access_token_decoder = ok_or_bail!(
            rocket,
            AccessTokenDecoder::from_file(&config.access_token_key),
            |e| error!("could not initialize access token decoder: {e}")
        );
        let refresh_token_generator = ok_or_bail!(
            rocket,
            RefreshTokenGenerator::from_file(&config.refresh_token_key),
            |e| error!("could not initialize refresh token generator: {e}")
        );
        let refresh_token_decoder = ok_or_bail!(
            rocket,
            RefreshTokenDecoder::from_file(&config.refresh_token_key),
            |e| error!("could not initialize refresh token decoder: {e}")
        );

        let access_granter = AccessGranter::new(
            Box::new(user_db),
            Box::new(session_storage),
            access_token_generator,
            access_token_decoder,
            refresh_token_generator,
            refresh_token_decoder,
            config.access_token_ttl(),
            config.refresh_token_ttl(),
        );

        Ok(
            rocket
                .manage(config)
                .manage(access_granter)
                .install_connectverse_api()
        )
    }
}
