//! Uploaded-file persistence and default avatars.
//!
//! Uploads land under a configured root directory, one subfolder per
//! entity kind, with UUID file names so uploads never collide or
//! overwrite. The stored path always uses `/` separators.

use std::path::{Path, PathBuf};

use rand::prelude::IndexedRandom;
use uuid::Uuid;

use atelier_core::images::{DEFAULT_AVATARS, PLACEHOLDER_MEMBER};

/// Extensions accepted for image uploads.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The uploaded file name has no extension or one outside
    /// [`ALLOWED_EXTENSIONS`].
    #[error("File type not allowed: {0}")]
    UnsupportedExtension(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writes uploaded files below a root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory uploads are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist an uploaded file under `subfolder`.
    ///
    /// The original name only contributes its extension; the stored file
    /// gets a fresh UUID name. Returns the public path to store on the
    /// entity, e.g. `/uploads/clients/3f2a….png`.
    pub async fn save_file(
        &self,
        bytes: &[u8],
        original_name: &str,
        subfolder: &str,
    ) -> Result<String, StorageError> {
        let extension = allowed_extension(original_name)
            .ok_or_else(|| StorageError::UnsupportedExtension(original_name.to_string()))?;
        let file_name = format!("{}.{extension}", Uuid::new_v4());

        let dir = self.root.join(subfolder);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        Ok(format!("/uploads/{subfolder}/{file_name}"))
    }
}

/// The lowercased extension of `name` when it is on the allow list.
fn allowed_extension(name: &str) -> Option<String> {
    let extension = Path::new(name).extension()?.to_str()?.to_lowercase();
    ALLOWED_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// Pick one of the bundled default avatars for a member created without
/// an upload.
pub fn random_avatar() -> &'static str {
    DEFAULT_AVATARS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(PLACEHOLDER_MEMBER)
}
