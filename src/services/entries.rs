use anyhow::Result;
use tracing::info;

use crate::db::{LogEntry, Store};
use crate::services::assets::{AssetError, AssetStore, sanitize_filename};

/// Typed mutation payload, validated at the HTTP boundary before it reaches
/// the lifecycle logic.
#[derive(Debug, Default)]
pub struct EntryForm {
    pub description: Option<String>,
    pub image: Option<UploadedImage>,
}

#[derive(Debug)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub enum CreateOutcome {
    Created(LogEntry),
    /// No usable file in the request; nothing was written.
    MissingImage,
    /// Name collision in the upload directory; nothing was written.
    DuplicateName,
}

#[derive(Debug)]
pub enum EditOutcome {
    NotFound,
    /// Authenticated caller does not own the entry. Surfaced to the client
    /// exactly like success so non-owners learn nothing.
    NotOwner,
    /// New image name collided. The old file was already removed at this
    /// point but the row keeps its stale reference; see DESIGN.md.
    DuplicateName,
    Updated,
}

#[derive(Debug)]
pub enum FetchOutcome {
    NotFound,
    NotOwner,
    Found(LogEntry),
}

#[derive(Debug)]
pub enum DeleteOutcome {
    NotFound,
    /// Row and file removed for the owner, or silent no-op for a non-owner.
    Done,
}

/// Orchestrates entry mutations across the entry store and the asset store
/// under the ownership invariant.
#[derive(Clone)]
pub struct EntryService {
    store: Store,
    assets: AssetStore,
}

impl EntryService {
    #[must_use]
    pub const fn new(store: Store, assets: AssetStore) -> Self {
        Self { store, assets }
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<LogEntry>> {
        self.store.list_entries_for_user(user_id).await
    }

    /// Load an entry for its owner. Non-owners get `NotOwner` without any
    /// hint whether the id exists.
    pub async fn fetch(&self, user_id: i32, id: i32) -> Result<FetchOutcome> {
        let Some(entry) = self.store.get_entry(id).await? else {
            return Ok(FetchOutcome::NotFound);
        };

        if entry.user_id != user_id {
            return Ok(FetchOutcome::NotOwner);
        }

        Ok(FetchOutcome::Found(entry))
    }

    /// Create a new entry. The file is written before the row is inserted;
    /// a crash in between can orphan the file (accepted, see DESIGN.md).
    pub async fn create(&self, user_id: i32, form: EntryForm) -> Result<CreateOutcome> {
        let Some(image) = form.image else {
            return Ok(CreateOutcome::MissingImage);
        };

        let Some(name) = sanitize_filename(&image.filename) else {
            // Unusable names are rejected the same way collisions are
            return Ok(CreateOutcome::DuplicateName);
        };

        match self.assets.store(&name, &image.bytes).await {
            Ok(()) => {}
            Err(AssetError::DuplicateName(_)) => return Ok(CreateOutcome::DuplicateName),
            Err(AssetError::Io(e)) => return Err(e.into()),
        }

        let entry = self
            .store
            .insert_entry(user_id, Some(name.clone()), form.description)
            .await?;

        info!(entry_id = entry.id, user_id, image = %name, "Created log entry");
        Ok(CreateOutcome::Created(entry))
    }

    /// Edit an owned entry. When a new image is supplied the old asset is
    /// removed before the new name is collision-checked; a collision then
    /// leaves the row referencing the already-deleted file. That ordering is
    /// part of the observable contract and is kept as-is.
    pub async fn edit(&self, user_id: i32, id: i32, form: EntryForm) -> Result<EditOutcome> {
        let Some(entry) = self.store.get_entry(id).await? else {
            return Ok(EditOutcome::NotFound);
        };

        if entry.user_id != user_id {
            return Ok(EditOutcome::NotOwner);
        }

        let mut new_image = None;
        if let Some(image) = form.image {
            if let Some(old) = &entry.image_file {
                self.assets.remove(old).await;
            }

            let Some(name) = sanitize_filename(&image.filename) else {
                return Ok(EditOutcome::DuplicateName);
            };

            match self.assets.store(&name, &image.bytes).await {
                Ok(()) => new_image = Some(name),
                Err(AssetError::DuplicateName(_)) => return Ok(EditOutcome::DuplicateName),
                Err(AssetError::Io(e)) => return Err(e.into()),
            }
        }

        self.store
            .update_entry(entry.id, new_image, form.description)
            .await?;

        info!(entry_id = entry.id, user_id, "Updated log entry");
        Ok(EditOutcome::Updated)
    }

    /// Delete an owned entry and its asset. File removal is best-effort and
    /// never blocks the row delete. Non-owner calls change nothing but are
    /// reported as `Done` so the response is indistinguishable from success.
    pub async fn delete(&self, user_id: i32, id: i32) -> Result<DeleteOutcome> {
        let Some(entry) = self.store.get_entry(id).await? else {
            return Ok(DeleteOutcome::NotFound);
        };

        if entry.user_id == user_id {
            if let Some(image) = &entry.image_file {
                self.assets.remove(image).await;
            }
            self.store.delete_entry(entry.id).await?;
            info!(entry_id = entry.id, user_id, "Deleted log entry");
        }

        Ok(DeleteOutcome::Done)
    }
}
