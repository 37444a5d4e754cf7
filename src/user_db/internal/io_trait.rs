use std::path::Path;
use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::rng::make_uuid;
use crate::user_db::internal::data::UsersData;
use crate::user_db::UserDbError;

const USER_DB_READ_BUF_SIZE: usize = 1024 * 128;

#[async_trait]
pub(super) trait UserDbIo: Send + Sync {
    async fn read_user_file(&self) -> Result<UsersData, UserDbError>;

    async fn write_user_file(
        &self,
        users_data: &UsersData,
    ) -> Result<(), UserDbError>;

    fn generate_uuid(&self) -> Uuid;
}

pub struct ProductionUserDbIo {
    db_file: Mutex<File>, // holds a file lock
}

impl ProductionUserDbIo {
    pub async fn new(
        user_db_path: impl AsRef<Path> + Send,
    ) -> Result<Self, UserDbError> {
        let std_file = std::fs::File::options()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(user_db_path)?;
        std_file.try_lock()?;
        Ok(
            ProductionUserDbIo {
                db_file: Mutex::new(File::from_std(std_file)),
            }
        )
    }
}

#[async_trait]
impl UserDbIo for ProductionUserDbIo {
    async fn read_user_file(&self) -> Result<UsersData, UserDbError> {
        let mut db_file = self.db_file.lock().await;
        db_file.rewind().await?;
        let mut read_buf = String::with_capacity(USER_DB_READ_BUF_SIZE);
        db_file.read_to_string(&mut read_buf).await?;
        Ok(toml::de::from_str(&read_buf)?)
    }

    async fn write_user_file(
        &self,
        users_data: &UsersData,
    ) -> Result<(), UserDbError> {
        let mut db_file = self.db_file.lock().await;
        db_file.set_len(0).await?;
        db_file.rewind().await?;
        db_file.write_all(
            toml::to_string(&users_data)?.as_bytes(),
        ).await?;
        Ok(())
    }

    fn generate_uuid(&self) -> Uuid {
        make_uuid(&mut rand::thread_rng())
    }
}
