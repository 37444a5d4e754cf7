use std::sync::Mutex;
use time::macros::datetime;
use super::*;

struct TestSessionStorageIo {
    contents: Mutex<String>,
    now: Mutex<OffsetDateTime>,
}

impl TestSessionStorageIo {
    fn new() -> Self {
        TestSessionStorageIo {
            contents: Mutex::new(String::new()),
            now: Mutex::new(datetime!(2026-01-01 00:00 UTC)),
        }
    }

    fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }

    fn dump(&self) -> String {
        self.contents.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStorageIo for TestSessionStorageIo {
    async fn read_session_file(
        &self,
    ) -> Result<SessionsData, SessionStorageError> {
        Ok(toml::de::from_str(&self.contents.lock().unwrap())?)
    }

    async fn write_session_file(
        &self,
        sessions_data: &SessionsData,
    ) -> Result<(), SessionStorageError> {
        *self.contents.lock().unwrap() = toml::to_string(sessions_data)?;
        Ok(())
    }

    fn get_time(&self) -> OffsetDateTime {
        *self.now.lock().unwrap()
    }
}

fn make_storage(
    io: TestSessionStorageIo,
    max_sessions_per_user: Option<u32>,
) -> SessionStorageImpl<TestSessionStorageIo> {
    SessionStorageImpl {
        config: SessionStorageConfig {
            max_session_age: Duration::days(30),
            max_sessions_per_user,
        },
        state: RwLock::new(State::from(SessionsData::default())),
        io,
    }
}

fn user() -> Uuid {
    Uuid::from_u128(42)
}

#[tokio::test]
async fn added_session_is_a_member() {
    let storage = make_storage(TestSessionStorageIo::new(), None);
    let now = storage.io.get_time();
    storage.add_session("token-a", user(), now).await.unwrap();

    assert!(storage.contains_session("token-a").await.unwrap());
    assert!(!storage.contains_session("token-b").await.unwrap());
}

#[tokio::test]
async fn add_is_idempotent() {
    let storage = make_storage(TestSessionStorageIo::new(), None);
    let now = storage.io.get_time();
    storage.add_session("token-a", user(), now).await.unwrap();
    storage.add_session("token-a", user(), now).await.unwrap();

    assert!(storage.remove_session("token-a").await.unwrap());
    assert!(!storage.contains_session("token-a").await.unwrap());
}

#[tokio::test]
async fn remove_is_idempotent() {
    let storage = make_storage(TestSessionStorageIo::new(), None);
    let now = storage.io.get_time();
    storage.add_session("token-a", user(), now).await.unwrap();

    assert!(storage.remove_session("token-a").await.unwrap());
    assert!(!storage.remove_session("token-a").await.unwrap());
    assert!(!storage.remove_session("never-issued").await.unwrap());
}

#[tokio::test]
async fn old_sessions_stop_counting_as_members() {
    let storage = make_storage(TestSessionStorageIo::new(), None);
    let now = storage.io.get_time();
    storage.add_session("token-a", user(), now).await.unwrap();

    storage.io.advance(Duration::days(29));
    assert!(storage.contains_session("token-a").await.unwrap());

    storage.io.advance(Duration::days(2));
    assert!(!storage.contains_session("token-a").await.unwrap());
}

#[tokio::test]
async fn expired_sessions_are_pruned_from_the_file() {
    let storage = make_storage(TestSessionStorageIo::new(), None);
    let now = storage.io.get_time();
    storage.add_session("token-a", user(), now).await.unwrap();
    storage.io.advance(Duration::days(31));
    storage.add_session("token-b", user(), storage.io.get_time())
        .await.unwrap();

    let dumped = storage.io.dump();
    assert!(dumped.contains("token-b"));
    assert!(!dumped.contains("token-a"));
}

#[tokio::test]
async fn aged_out_sessions_leave_the_in_memory_state() {
    let storage = make_storage(TestSessionStorageIo::new(), None);
    let now = storage.io.get_time();
    storage.add_session("token-a", user(), now).await.unwrap();
    storage.io.advance(Duration::days(31));
    storage.add_session("token-b", user(), storage.io.get_time())
        .await.unwrap();

    let state = storage.state.read().await;
    assert!(!state.token_to_session.contains_key("token-a"));
    assert_eq!(state.user_to_sessions[&user()].len(), 1);
}

#[tokio::test]
async fn per_user_cap_evicts_the_oldest() {
    let storage = make_storage(TestSessionStorageIo::new(), Some(2));
    let base = storage.io.get_time();
    storage.add_session("token-a", user(), base).await.unwrap();
    storage.add_session("token-b", user(), base + Duration::minutes(1))
        .await.unwrap();
    storage.add_session("token-c", user(), base + Duration::minutes(2))
        .await.unwrap();

    assert!(!storage.contains_session("token-a").await.unwrap());
    assert!(storage.contains_session("token-b").await.unwrap());
    assert!(storage.contains_session("token-c").await.unwrap());
}

#[tokio::test]
async fn cap_is_per_user() {
    let storage = make_storage(TestSessionStorageIo::new(), Some(1));
    let now = storage.io.get_time();
    let other = Uuid::from_u128(43);
    storage.add_session("token-a", user(), now).await.unwrap();
    storage.add_session("token-b", other, now).await.unwrap();

    assert!(storage.contains_session("token-a").await.unwrap());
    assert!(storage.contains_session("token-b").await.unwrap());
}

#[tokio::test]
async fn membership_survives_a_reload() {
    let storage = make_storage(TestSessionStorageIo::new(), None);
    let now = storage.io.get_time();
    storage.add_session("token-a", user(), now).await.unwrap();
    let dumped = storage.io.dump();

    let io = TestSessionStorageIo::new();
    *io.contents.lock().unwrap() = dumped;
    let reloaded = make_storage(io, None);
    let state = State::from(reloaded.io.read_session_file().await.unwrap());
    *reloaded.state.write().await = state;

    assert!(reloaded.contains_session("token-a").await.unwrap());
}
