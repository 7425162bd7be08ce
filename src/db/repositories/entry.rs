use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::log_entries;

/// A logbook entry as seen by the rest of the application.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i32,
    pub image_file: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: i32,
}

impl From<log_entries::Model> for LogEntry {
    fn from(model: log_entries::Model) -> Self {
        Self {
            id: model.id,
            image_file: model.image_file,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
            user_id: model.user_id,
        }
    }
}

pub struct EntryRepository {
    conn: DatabaseConnection,
}

impl EntryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Entries owned by `user_id`, newest first. Id breaks creation-time ties.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<LogEntry>> {
        let rows = log_entries::Entity::find()
            .filter(log_entries::Column::UserId.eq(user_id))
            .order_by_desc(log_entries::Column::CreatedAt)
            .order_by_desc(log_entries::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list log entries")?;

        Ok(rows.into_iter().map(LogEntry::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<LogEntry>> {
        let row = log_entries::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query log entry by ID")?;

        Ok(row.map(LogEntry::from))
    }

    pub async fn insert(
        &self,
        user_id: i32,
        image_file: Option<String>,
        description: Option<String>,
    ) -> Result<LogEntry> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = log_entries::ActiveModel {
            image_file: Set(image_file),
            description: Set(description),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            user_id: Set(user_id),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert log entry")?;

        Ok(LogEntry::from(model))
    }

    /// Update an entry. `image_file` replaces the image reference only when
    /// `Some`; the description is always overwritten with the submitted value
    /// and `updated_at` is touched.
    pub async fn update(
        &self,
        id: i32,
        image_file: Option<String>,
        description: Option<String>,
    ) -> Result<bool> {
        let Some(model) = log_entries::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query log entry for update")?
        else {
            return Ok(false);
        };

        let now = chrono::Utc::now().to_rfc3339();

        let mut active: log_entries::ActiveModel = model.into();
        if let Some(name) = image_file {
            active.image_file = Set(Some(name));
        }
        active.description = Set(description);
        active.updated_at = Set(now);
        active
            .update(&self.conn)
            .await
            .context("Failed to update log entry")?;

        Ok(true)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = log_entries::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete log entry")?;

        Ok(result.rows_affected > 0)
    }
}
