use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use log::debug;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::config::app_config::AppConfig;
use crate::session_storage::internal::data::{SessionData, SessionsData};
use crate::session_storage::internal::io_trait::{
    ProductionSessionStorageIo, SessionStorageIo,
};
use crate::session_storage::internal::session::Session;
use crate::session_storage::{SessionStorage, SessionStorageError};

mod data;
mod io_trait;
pub mod session;
#[cfg(test)] mod tests;

// relative to the data directory
const SESSION_STORAGE_PATH: &str = "sessions.toml";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionStorageConfig {
    /// Hard bound on how long a recorded token stays a member, even
    /// if its own expiry claim were tampered longer.
    pub max_session_age: Duration,

    /// Per-user cap on concurrent sessions; the oldest one is evicted
    /// when a new login goes over. `None` disables the cap.
    pub max_sessions_per_user: Option<u32>,
}

#[allow(private_bounds)]
pub struct SessionStorageImpl<Io: SessionStorageIo> {
    config: SessionStorageConfig,
    state: RwLock<State>,
    io: Io,
}

struct State {
    token_to_session: HashMap<String, Arc<Session>>,
    user_to_sessions: HashMap<Uuid, Vec<Arc<Session>>>,
}

impl From<SessionsData> for State {
    fn from(value: SessionsData) -> Self {
        let mut token_to_session = HashMap::new();
        let mut user_to_sessions: HashMap<_, Vec<Arc<Session>>> = HashMap::new();
        value.sessions
            .into_iter()
            .map(Session::from)
            .map(Arc::new)
            .for_each(|session| {
                token_to_session
                    .insert(session.refresh_token.clone(), session.clone());
                user_to_sessions
                    .entry(session.user_id)
                    .or_default()
                    .push(session);
            });
        State {
            token_to_session,
            user_to_sessions,
        }
    }
}

impl State {
    fn remove(&mut self, refresh_token: &str) -> Option<Arc<Session>> {
        let session = self.token_to_session.remove(refresh_token)?;
        if let Some(sessions) = self.user_to_sessions.get_mut(&session.user_id) {
            sessions.retain(|s| s.refresh_token != session.refresh_token);
            if sessions.is_empty() {
                self.user_to_sessions.remove(&session.user_id);
            }
        }
        Some(session)
    }
}

#[allow(private_bounds)]
impl<Io: SessionStorageIo> SessionStorageImpl<Io> {
    fn is_live(&self, session: &Session, now: OffsetDateTime) -> bool {
        session.issued_at + self.config.max_session_age > now
    }

    /// Drop aged-out entries from the in-memory maps. The file is
    /// already filtered on write; without this the maps would keep
    /// every dead session until the process restarts.
    fn prune_dead_sessions(&self, state: &mut State) {
        let now = self.io.get_time();
        let dead: Vec<String> = state.token_to_session
            .values()
            .filter(|session| !self.is_live(session, now))
            .map(|session| session.refresh_token.clone())
            .collect();
        for token in dead {
            state.remove(&token);
        }
    }

    async fn write_state(
        &self,
        state: &State,
    ) -> Result<(), SessionStorageError> {
        let now = self.io.get_time();
        let mut sessions: Vec<_> = state.token_to_session
            .values()
            .filter(|session| self.is_live(session, now))
            .collect();
        sessions.sort_by(|a, b| {
            (a.issued_at, &a.refresh_token).cmp(&(b.issued_at, &b.refresh_token))
        });
        let mapped = SessionsData {
            sessions: sessions
                .into_iter()
                .map(|session| SessionData::from(session.as_ref()))
                .collect(),
        };
        self.io.write_session_file(&mapped).await
    }
}

#[async_trait]
impl<Io: SessionStorageIo> SessionStorage for SessionStorageImpl<Io> {
    async fn add_session(
        &self,
        refresh_token: &str,
        user_id: Uuid,
        issued_at: OffsetDateTime,
    ) -> Result<(), SessionStorageError> {
        let mut state = self.state.write().await;
        self.prune_dead_sessions(&mut state);
        if state.token_to_session.contains_key(refresh_token) {
            return Ok(());
        }
        let session = Arc::new(
            Session {
                refresh_token: refresh_token.to_string(),
                user_id,
                issued_at,
            }
        );
        state.token_to_session
            .insert(session.refresh_token.clone(), session.clone());
        state.user_to_sessions
            .entry(user_id)
            .or_default()
            .push(session);

        if let Some(cap) = self.config.max_sessions_per_user {
            loop {
                let oldest = state.user_to_sessions
                    .get(&user_id)
                    .filter(|sessions| sessions.len() > cap as usize)
                    .and_then(|sessions| {
                        sessions
                            .iter()
                            .min_by_key(|s| (s.issued_at, s.refresh_token.clone()))
                            .map(|s| s.refresh_token.clone())
                    });
                match oldest {
                    Some(token) => {
                        debug!(
                            "evicting oldest session of user {user_id} \
                                over the per-user cap",
                        );
                        state.remove(&token);
                    },
                    None => break,
                }
            }
        }
        self.write_state(&state).await
    }

    async fn contains_session(
        &self,
        refresh_token: &str,
    ) -> Result<bool, SessionStorageError> {
        let now = self.io.get_time();
        Ok(
            self.state
                .read()
                .await
                .token_to_session
                .get(refresh_token)
                .is_some_and(|session| self.is_live(session, now))
        )
    }

    async fn remove_session(
        &self,
        refresh_token: &str,
    ) -> Result<bool, SessionStorageError> {
        let mut state = self.state.write().await;
        match state.remove(refresh_token) {
            Some(_) => {
                self.write_state(&state).await?;
                Ok(true)
            },
            None => Ok(false),
        }
    }
}

pub type ProductionSessionStorage = SessionStorageImpl<ProductionSessionStorageIo>;

impl ProductionSessionStorage {
    pub async fn new(
        app_config: &AppConfig,
    ) -> Result<ProductionSessionStorage, SessionStorageError> {
        let mut path = app_config.data_directory.to_path_buf();
        path.push(SESSION_STORAGE_PATH);
        let io = ProductionSessionStorageIo::new(path).await?;
        let state = State::from(io.read_session_file().await?);
        Ok(
            SessionStorageImpl {
                config: SessionStorageConfig {
                    max_session_age: app_config.refresh_token_ttl(),
                    max_sessions_per_user: app_config.max_sessions_per_user,
                },
                state: RwLock::new(state),
                io,
            }
        )
    }
}
