use std::str::FromStr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;
use crate::hasher::ProductionHasherConfig;
use crate::rng::SyncRng;
use super::*;

/// Keeps the "file" as its TOML text so the serde round through
/// [UsersData] is exercised the same way the production io does it.
struct TestUserDbIo {
    contents: Mutex<String>,
    next_id: AtomicU64,
}

impl TestUserDbIo {
    fn new() -> Self {
        TestUserDbIo {
            contents: Mutex::new(String::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn dump(&self) -> String {
        self.contents.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserDbIo for TestUserDbIo {
    async fn read_user_file(&self) -> Result<UsersData, UserDbError> {
        Ok(toml::de::from_str(&self.contents.lock().unwrap())?)
    }

    async fn write_user_file(
        &self,
        users_data: &UsersData,
    ) -> Result<(), UserDbError> {
        *self.contents.lock().unwrap() = toml::to_string(users_data)?;
        Ok(())
    }

    fn generate_uuid(&self) -> Uuid {
        Uuid::from_u128(self.next_id.fetch_add(1, Ordering::Relaxed).into())
    }
}

fn make_user_db(io: TestUserDbIo) -> UserDbImpl<ProductionHasher, TestUserDbIo> {
    UserDbImpl {
        hasher: ProductionHasher::new(
            ProductionHasherConfig::new(
                argon2::Params::new(32, 1, 1, None).unwrap(),
            ),
            SyncRng::new(StdRng::seed_from_u64(17)),
        ),
        state: RwLock::new(State::from(UsersData::default())),
        io,
    }
}

fn username(s: &str) -> UsernameString {
    UsernameString::from_str(s).unwrap()
}

fn email(s: &str) -> EmailString {
    EmailString::from_str(s).unwrap()
}

#[tokio::test]
async fn create_user_then_verify_credentials() {
    let db = make_user_db(TestUserDbIo::new());
    let created = db
        .create_user(&username("alice"), &email("a@x.com"), "secret1")
        .await
        .expect("user creation failed");

    let found = db.check_user_credentials(&email("a@x.com"), "secret1")
        .await.unwrap()
        .expect("credentials should verify");
    assert_eq!(found.id, created.id);
    assert_eq!(found.username, username("alice"));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let db = make_user_db(TestUserDbIo::new());
    db.create_user(&username("alice"), &email("a@x.com"), "secret1")
        .await.unwrap();

    let wrong_password = db
        .check_user_credentials(&email("a@x.com"), "not-it")
        .await.unwrap();
    let unknown_email = db
        .check_user_credentials(&email("b@x.com"), "secret1")
        .await.unwrap();
    assert!(wrong_password.is_none());
    assert!(unknown_email.is_none());
}

#[tokio::test]
async fn duplicate_username_is_a_structured_conflict() {
    let db = make_user_db(TestUserDbIo::new());
    db.create_user(&username("alice"), &email("a@x.com"), "secret1")
        .await.unwrap();

    let err = db
        .create_user(&username("alice"), &email("b@x.com"), "secret2")
        .await
        .expect_err("should conflict");
    assert!(
        matches!(err, UserDbError::Duplicate(ConflictKind::Username)),
        "wrong error type: {err:#?}",
    );
}

#[tokio::test]
async fn duplicate_email_is_a_structured_conflict() {
    let db = make_user_db(TestUserDbIo::new());
    db.create_user(&username("alice"), &email("a@x.com"), "secret1")
        .await.unwrap();

    let err = db
        .create_user(&username("bob"), &email("a@x.com"), "secret2")
        .await
        .expect_err("should conflict");
    assert!(
        matches!(err, UserDbError::Duplicate(ConflictKind::Email)),
        "wrong error type: {err:#?}",
    );
}

#[tokio::test]
async fn failed_creation_leaves_no_trace() {
    let db = make_user_db(TestUserDbIo::new());
    db.create_user(&username("alice"), &email("a@x.com"), "secret1")
        .await.unwrap();
    db.create_user(&username("alice"), &email("b@x.com"), "secret2")
        .await.expect_err("should conflict");

    // the conflicting email must still be free
    assert!(
        db.check_user_credentials(&email("b@x.com"), "secret2")
            .await.unwrap()
            .is_none()
    );
    db.create_user(&username("bob"), &email("b@x.com"), "secret2")
        .await
        .expect("email should not have been claimed");
}

#[tokio::test]
async fn list_users_is_sorted_by_username() {
    let db = make_user_db(TestUserDbIo::new());
    db.create_user(&username("carol"), &email("c@x.com"), "secret3")
        .await.unwrap();
    db.create_user(&username("alice"), &email("a@x.com"), "secret1")
        .await.unwrap();
    db.create_user(&username("bob"), &email("b@x.com"), "secret2")
        .await.unwrap();

    let users = db.list_users().await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.username.to_string()).collect();
    assert_eq!(names, ["alice", "bob", "carol"]);
}

#[tokio::test]
async fn state_survives_a_reload() {
    let db = make_user_db(TestUserDbIo::new());
    let created = db
        .create_user(&username("alice"), &email("a@x.com"), "secret1")
        .await.unwrap();
    let dumped = db.io.dump();

    // a new instance reading the same file sees the same principal
    let io = TestUserDbIo::new();
    *io.contents.lock().unwrap() = dumped;
    let reloaded = make_user_db(io);
    let state = State::from(reloaded.io.read_user_file().await.unwrap());
    *reloaded.state.write().await = state;

    let found = reloaded
        .check_user_credentials(&email("a@x.com"), "secret1")
        .await.unwrap()
        .expect("credentials should verify after reload");
    assert_eq!(found.id, created.id);
}
