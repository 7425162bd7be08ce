use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("an asset named '{0}' already exists")]
    DuplicateName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Flat on-disk store for uploaded images. Filenames are sanitized by the
/// caller via [`sanitize_filename`]; names collide globally across users.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create the upload directory if it is missing.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    pub async fn exists(&self, name: &str) -> bool {
        fs::try_exists(self.path_of(name)).await.unwrap_or(false)
    }

    /// Write a new asset. Fails with [`AssetError::DuplicateName`] when a file
    /// with the same name is already present; nothing is written in that case.
    pub async fn store(&self, name: &str, bytes: &[u8]) -> Result<(), AssetError> {
        self.ensure_root().await?;

        let path = self.path_of(name);
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(AssetError::DuplicateName(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(bytes).await?;
        file.flush().await?;

        debug!(name = %name, size = bytes.len(), "Stored asset");
        Ok(())
    }

    /// Best-effort delete. A missing file is a silent no-op; other failures
    /// are logged and swallowed so callers never stall on cleanup.
    pub async fn remove(&self, name: &str) {
        let path = self.path_of(name);
        match fs::remove_file(&path).await {
            Ok(()) => debug!(name = %name, "Removed asset"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(name = %name, "Failed to remove asset: {e}"),
        }
    }
}

/// Reduce an uploaded filename to a safe on-disk name: the final path
/// component with everything outside `[A-Za-z0-9._-]` mapped to `_` and
/// leading dots trimmed. `None` means the name is unusable.
#[must_use]
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let last = raw
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())?;

    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("cat.png"), Some("cat.png".to_string()));
        assert_eq!(
            sanitize_filename("photo_2026-03-01.jpg"),
            Some("photo_2026-03-01.jpg".to_string())
        );
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(
            sanitize_filename("../../etc/passwd"),
            Some("passwd".to_string())
        );
        assert_eq!(
            sanitize_filename("..\\..\\boot.ini"),
            Some("boot.ini".to_string())
        );
        assert_eq!(
            sanitize_filename("uploads/dog.png"),
            Some("dog.png".to_string())
        );
    }

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(
            sanitize_filename("my photo (1).png"),
            Some("my_photo__1_.png".to_string())
        );
        assert_eq!(sanitize_filename("übung.png"), Some("_bung.png".to_string()));
    }

    #[test]
    fn sanitize_rejects_unusable_names() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("..."), None);
        assert_eq!(sanitize_filename("///"), None);
    }

    #[test]
    fn sanitize_trims_leading_dots() {
        assert_eq!(sanitize_filename(".hidden"), Some("hidden".to_string()));
    }

    #[tokio::test]
    async fn store_rejects_duplicates_and_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetStore::new(dir.path());

        assets.store("cat.png", b"first").await.unwrap();
        assert!(assets.exists("cat.png").await);

        let err = assets.store("cat.png", b"second").await.unwrap_err();
        assert!(matches!(err, AssetError::DuplicateName(name) if name == "cat.png"));

        // Original content must be untouched after the rejected write
        let content = tokio::fs::read(assets.path_of("cat.png")).await.unwrap();
        assert_eq!(content, b"first");

        assets.remove("cat.png").await;
        assert!(!assets.exists("cat.png").await);

        // Removing an already-missing file is a no-op
        assets.remove("cat.png").await;
    }

    #[tokio::test]
    async fn store_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetStore::new(dir.path().join("uploads"));

        assets.store("dog.png", b"woof").await.unwrap();
        assert!(assets.exists("dog.png").await);
    }
}
