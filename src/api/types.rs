use serde::Serialize;

use crate::db::LogEntry;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntryDto {
    pub id: i32,
    pub image: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<LogEntry> for EntryDto {
    fn from(entry: LogEntry) -> Self {
        Self {
            id: entry.id,
            image: entry.image_file,
            description: entry.description,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Payload for the list view: the caller's entries newest-first plus any
/// pending flash notice. Rendering stays client-side.
#[derive(Debug, Serialize)]
pub struct EntryListView {
    pub username: String,
    pub entries: Vec<EntryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EntryFormView {
    pub entry: EntryDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}
