//! The orchestrator tying credential verification, the token codecs
//! and the session store together. Everything a transport needs for
//! signup, login, renewal, revocation and the authorization gate is
//! behind this one type.

mod errors;
mod model;

use std::time::SystemTime;
use log::{debug, info, trace, warn};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;
use crate::access_token::{AccessTokenDecoder, AccessTokenGenerator};
use crate::email_string::EmailString;
use crate::lib_constants::MIN_PASSWORD_LEN;
use crate::refresh_token::{RefreshTokenDecoder, RefreshTokenGenerator};
use crate::session_storage::SessionStorage;
use crate::user_db::{UserDb, UserDbError};
use crate::username_string::UsernameString;

pub use errors::AccessGranterError;
pub use model::{GrantedTokens, RenewedTokens, UserInfo};

pub struct AccessGranter {
    user_db: Box<dyn UserDb>,
    session_storage: Box<dyn SessionStorage>,
    access_token_generator: AccessTokenGenerator,
    access_token_decoder: AccessTokenDecoder,
    refresh_token_generator: RefreshTokenGenerator,
    refresh_token_decoder: RefreshTokenDecoder,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl AccessGranter {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_db: Box<dyn UserDb>,
        session_storage: Box<dyn SessionStorage>,
        access_token_generator: AccessTokenGenerator,
        access_token_decoder: AccessTokenDecoder,
        refresh_token_generator: RefreshTokenGenerator,
        refresh_token_decoder: RefreshTokenDecoder,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Self {
        AccessGranter {
            user_db,
            session_storage,
            access_token_generator,
            access_token_decoder,
            refresh_token_generator,
            refresh_token_decoder,
            access_token_ttl,
            refresh_token_ttl,
        }
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    pub async fn signup_user(
        &self,
        username: &UsernameString,
        email: &EmailString,
        password: &str,
    ) -> Result<GrantedTokens, AccessGranterError> {
        debug!("signing user \"{username}\" up");
        if password.chars().count() < MIN_PASSWORD_LEN {
            warn!("rejecting signup of \"{username}\": password too short");
            return Err(AccessGranterError::PasswordTooShort);
        }
        let user = self.user_db
            .create_user(username, email, password)
            .await
            .map_err(|e| match e {
                UserDbError::Duplicate(kind) => {
                    warn!("rejecting signup of \"{username}\": {kind} taken");
                    AccessGranterError::Duplicate(kind)
                },
                e => e.into(),
            })?;
        let granted = self.issue_tokens(user.id).await?;
        info!("signed user \"{username}\" up with id {}", user.id);
        Ok(granted)
    }

    pub async fn login_user(
        &self,
        email: &EmailString,
        password: &str,
    ) -> Result<GrantedTokens, AccessGranterError> {
        debug!("logging a user in");
        match self.user_db.check_user_credentials(email, password).await? {
            Some(user) => {
                let granted = self.issue_tokens(user.id).await?;
                info!(
                    "logged user \"{}\" in with id {}",
                    user.username,
                    user.id,
                );
                Ok(granted)
            },
            None => {
                // same error whether the account exists or not
                warn!("invalid credentials on login");
                Err(AccessGranterError::InvalidCredentials)
            },
        }
    }

    /// Exchange a refresh token for a fresh pair. The old refresh
    /// token stops being valid the moment this succeeds; handing the
    /// caller a replacement keeps revocation granular.
    pub async fn renew_access_token(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<RenewedTokens, AccessGranterError> {
        let refresh_token = match refresh_token {
            Some(token) => token,
            None => {
                warn!("renewal request without a refresh token");
                return Err(AccessGranterError::MissingToken);
            },
        };
        trace!("renewing an access token");
        let data = self.refresh_token_decoder
            .decode_token(refresh_token)
            .map_err(|e| {
                warn!("failed to decode refresh token: {e}");
                AccessGranterError::TokenInvalid
            })?;
        if OffsetDateTime::now_utc() >= data.expires_at {
            warn!("expired refresh token for user {}", data.user_id);
            // no longer renewable, drop it from the valid set as well
            self.session_storage.remove_session(refresh_token).await?;
            return Err(AccessGranterError::TokenExpired);
        }
        // removal doubles as the membership check; of two concurrent
        // renewals of one token only one can win
        if !self.session_storage.remove_session(refresh_token).await? {
            warn!("revoked or unknown refresh token for user {}", data.user_id);
            return Err(AccessGranterError::RevokedToken);
        }
        let renewed = self.issue_tokens(data.user_id).await?;
        info!("renewed access token for user {}", data.user_id);
        Ok(
            RenewedTokens {
                access_token: renewed.access_token,
                refresh_token: renewed.refresh_token,
            }
        )
    }

    /// Revoke a refresh token. Succeeds no matter whether the token
    /// was valid, revoked already or never issued.
    pub async fn logout_user(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<(), AccessGranterError> {
        let refresh_token = match refresh_token {
            Some(token) => token,
            None => {
                debug!("logout request without a refresh token");
                return Ok(());
            },
        };
        let was_present = self.session_storage
            .remove_session(refresh_token)
            .await?;
        if was_present {
            info!("revoked a refresh token on logout");
        } else {
            debug!("logout of an unknown refresh token");
        }
        Ok(())
    }

    /// The authorization gate for protected operations: checks the
    /// `Authorization` header value and returns the authenticated
    /// user's id.
    pub fn check_user_access(
        &self,
        auth_header_value: &str,
    ) -> Result<Uuid, AccessGranterError> {
        trace!("authenticating a user by the authorization header");
        let token = auth_header_value.strip_prefix("Bearer ")
            .ok_or(AccessGranterError::HeaderFormat)?;
        let data = self.access_token_decoder
            .decode_token(token)
            .map_err(|e| {
                warn!("failed to decode access token: {e}");
                AccessGranterError::TokenInvalid
            })?;
        let now = OffsetDateTime::now_utc();
        if data.not_before > now || now >= data.expires_at {
            trace!("expired access token for user {}", data.user_id);
            return Err(AccessGranterError::TokenExpired);
        }
        Ok(data.user_id)
    }

    /// All principals, identity fields only.
    pub async fn list_users(&self) -> Result<Vec<UserInfo>, AccessGranterError> {
        Ok(
            self.user_db
                .list_users()
                .await?
                .into_iter()
                .map(|user| {
                    UserInfo {
                        id: user.id,
                        username: user.username,
                        email: user.email,
                    }
                })
                .collect()
        )
    }

    async fn issue_tokens(
        &self,
        user_id: Uuid,
    ) -> Result<GrantedTokens, AccessGranterError> {
        let now = OffsetDateTime::now_utc();
        let system_now = SystemTime::from(now);
        let access_token = self.access_token_generator
            .generate_token(
                user_id,
                &system_now,
                &SystemTime::from(now + self.access_token_ttl),
            )?;
        let refresh_token = self.refresh_token_generator
            .generate_token(
                user_id,
                &system_now,
                &SystemTime::from(now + self.refresh_token_ttl),
            )?;
        self.session_storage
            .add_session(&refresh_token, user_id, now)
            .await?;
        Ok(
            GrantedTokens {
                access_token,
                refresh_token,
                access_token_ttl: self.access_token_ttl,
            }
        )
    }
}
