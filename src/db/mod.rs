use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::entry::LogEntry;
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn entry_repo(&self) -> repositories::entry::EntryRepository {
        repositories::entry::EntryRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn create_user(&self, username: &str, password: &str) -> Result<User> {
        self.user_repo().create(username, password).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    /// Seed an identity on first start so the app is usable out of the box.
    /// No-op when any user already exists.
    pub async fn ensure_seed_user(&self, username: &str, password: &str) -> Result<()> {
        if self.user_repo().count().await? > 0 {
            return Ok(());
        }

        self.user_repo().create(username, password).await?;
        info!("Seed user created - username: {username}");

        Ok(())
    }

    // ========================================================================
    // Log entries
    // ========================================================================

    pub async fn list_entries_for_user(&self, user_id: i32) -> Result<Vec<LogEntry>> {
        self.entry_repo().list_for_user(user_id).await
    }

    pub async fn get_entry(&self, id: i32) -> Result<Option<LogEntry>> {
        self.entry_repo().get(id).await
    }

    pub async fn insert_entry(
        &self,
        user_id: i32,
        image_file: Option<String>,
        description: Option<String>,
    ) -> Result<LogEntry> {
        self.entry_repo()
            .insert(user_id, image_file, description)
            .await
    }

    pub async fn update_entry(
        &self,
        id: i32,
        image_file: Option<String>,
        description: Option<String>,
    ) -> Result<bool> {
        self.entry_repo().update(id, image_file, description).await
    }

    pub async fn delete_entry(&self, id: i32) -> Result<bool> {
        self.entry_repo().delete(id).await
    }
}
