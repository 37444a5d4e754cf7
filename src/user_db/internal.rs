use std::collections::HashMap;
use std::sync::Arc;
use argon2::PasswordHash;
use async_trait::async_trait;
use log::warn;
use tokio::sync::RwLock;
use crate::config::app_config::AppConfig;
use crate::email_string::EmailString;
use crate::hasher::{Hasher, ProductionHasher};
use crate::user_db::errors::ConflictKind;
use crate::user_db::internal::data::{UserData, UsersData};
use crate::user_db::internal::io_trait::{ProductionUserDbIo, UserDbIo};
use crate::user_db::internal::user::User;
use crate::user_db::{UserDb, UserDbError};
use crate::username_string::UsernameString;

mod data;
mod io_trait;
pub mod user;
#[cfg(test)] mod tests;

/// A well-formed argon2id hash of no password anyone knows. Verified
/// against when the email lookup misses, so a miss and a mismatch
/// spend the same time hashing.
const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1\
     $QUFBQUFBQUFBQUFBQUFBQQ\
     $AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

#[allow(private_bounds)]
pub struct UserDbImpl<H: Hasher, Io: UserDbIo> {
    hasher: H,
    state: RwLock<State>,
    io: Io,
}

struct State {
    by_username: HashMap<UsernameString, Arc<User>>,
    by_email: HashMap<EmailString, Arc<User>>,
}

impl From<UsersData> for State {
    fn from(value: UsersData) -> Self {
        let mut by_username = HashMap::new();
        let mut by_email = HashMap::new();
        value.users
            .into_iter()
            .map(User::from)
            .map(Arc::new)
            .for_each(|user| {
                by_username.insert(user.username.clone(), user.clone());
                by_email.insert(user.email.clone(), user);
            });
        State {
            by_username,
            by_email,
        }
    }
}

#[allow(private_bounds)]
impl<H: Hasher, Io: UserDbIo> UserDbImpl<H, Io> {
    async fn write_state(
        &self,
        state: &State,
    ) -> Result<(), UserDbError> {
        let mut users: Vec<_> = state.by_username.values().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        let mapped = UsersData {
            users: users
                .into_iter()
                .map(|user| UserData::from(user.as_ref()))
                .collect(),
        };
        self.io.write_user_file(&mapped).await
    }
}

#[async_trait]
impl<H: Hasher, Io: UserDbIo> UserDb for UserDbImpl<H, Io> {
    async fn create_user(
        &self,
        username: &UsernameString,
        email: &EmailString,
        password: &str,
    ) -> Result<User, UserDbError> {
        // hash outside the lock, it is the slow part
        let hash = self.hasher
            .generate_hash(password)
            .map_err(UserDbError::Hashing)?;

        let mut state = self.state.write().await;
        if state.by_username.contains_key(username) {
            return Err(UserDbError::Duplicate(ConflictKind::Username));
        }
        if state.by_email.contains_key(email) {
            return Err(UserDbError::Duplicate(ConflictKind::Email));
        }
        let user = User {
            id: self.io.generate_uuid(),
            username: username.clone(),
            email: email.clone(),
            hash,
        };
        let user_arc = Arc::new(user.clone());
        state.by_username.insert(username.clone(), user_arc.clone());
        state.by_email.insert(email.clone(), user_arc);
        self.write_state(&state).await?;
        Ok(user)
    }

    async fn check_user_credentials(
        &self,
        email: &EmailString,
        password: &str,
    ) -> Result<Option<User>, UserDbError> {
        let state = self.state.read().await;
        match state.by_email.get(email) {
            Some(user) => {
                Ok(
                    Some(user.as_ref().clone())
                        .filter(|user| {
                            self.hasher
                                .check_hash(user.hash.password_hash(), password)
                        })
                )
            },
            None => {
                match PasswordHash::new(UNKNOWN_USER_HASH) {
                    Ok(hash) => {
                        self.hasher.check_hash(hash, password);
                    },
                    Err(e) => warn!("unknown-user hash is malformed: {e}"),
                }
                Ok(None)
            },
        }
    }

    async fn list_users(&self) -> Result<Vec<User>, UserDbError> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.by_username
            .values()
            .map(|user| user.as_ref().clone())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

pub type ProductionUserDb = UserDbImpl<ProductionHasher, ProductionUserDbIo>;

impl ProductionUserDb {
    pub async fn new(
        app_config: &AppConfig,
        hasher: ProductionHasher,
    ) -> Result<ProductionUserDb, UserDbError> {
        let io = ProductionUserDbIo::new(&app_config.user_db).await?;
        let state = State::from(io.read_user_file().await?);
        Ok(
            UserDbImpl {
                hasher,
                state: RwLock::new(state),
                io,
            }
        )
    }
}
