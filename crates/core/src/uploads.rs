//! Per-owner image upload store.
//!
//! Owners can attach a handful of PNG images to use in their games; the
//! generated HTML references them as `uploads/{owner}/{filename}`. The store
//! shares the owner directory with the publish pipeline but never touches
//! the published `game.html` artifact.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::CoreError;
use crate::owner::validate_owner_key;
use crate::publish::{validate_filename, ARTIFACT_FILENAME};

/// Maximum number of PNG files an owner may keep.
pub const MAX_FILES_PER_OWNER: usize = 5;

/// Maximum size of a single uploaded file (5 MB).
pub const MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// An uploaded file as reported to clients.
///
/// `id` doubles as the on-disk filename; `path` is the public URL path the
/// generated HTML can reference.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub path: String,
    pub size: u64,
}

/// Filesystem-backed blob store for owner images.
pub struct UploadStore {
    uploads_dir: PathBuf,
}

impl UploadStore {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }

    fn owner_dir(&self, owner_key: &str) -> PathBuf {
        self.uploads_dir.join(owner_key)
    }

    /// List the owner's PNG files. An owner with no directory has no files.
    pub async fn list(&self, owner_key: &str) -> Result<Vec<UploadedFile>, CoreError> {
        validate_owner_key(owner_key)?;

        let dir = self.owner_dir(owner_key);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CoreError::Storage(format!(
                    "uploads: failed to read directory for {owner_key}: {e}"
                )))
            }
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            CoreError::Storage(format!("uploads: failed to read entry for {owner_key}: {e}"))
        })? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_png_filename(&name) {
                continue;
            }
            let size = entry
                .metadata()
                .await
                .map_err(|e| {
                    CoreError::Storage(format!("uploads: failed to stat {name}: {e}"))
                })?
                .len();
            files.push(UploadedFile {
                id: name.clone(),
                path: format!("/uploads/{owner_key}/{name}"),
                name,
                size,
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Store an uploaded PNG for the owner.
    ///
    /// Enforces the per-owner file cap, the size limit, and the PNG format
    /// (content-sniffed, not just the extension). Re-uploading an existing
    /// filename overwrites it without counting against the cap.
    pub async fn put(
        &self,
        owner_key: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<UploadedFile, CoreError> {
        validate_owner_key(owner_key)?;
        validate_filename(filename)?;

        if !is_png_filename(filename) {
            return Err(CoreError::Validation(
                "only PNG files are allowed".to_string(),
            ));
        }
        if bytes.len() > MAX_FILE_SIZE_BYTES {
            return Err(CoreError::Validation(
                "file size exceeds the 5MB limit".to_string(),
            ));
        }
        if image::guess_format(bytes).ok() != Some(image::ImageFormat::Png) {
            return Err(CoreError::Validation(
                "file content is not a valid PNG image".to_string(),
            ));
        }

        let existing = self.list(owner_key).await?;
        let replacing = existing.iter().any(|f| f.id == filename);
        if !replacing && existing.len() >= MAX_FILES_PER_OWNER {
            return Err(CoreError::Validation(format!(
                "maximum of {MAX_FILES_PER_OWNER} PNG files allowed"
            )));
        }

        let dir = self.owner_dir(owner_key);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            CoreError::Storage(format!(
                "uploads: failed to create directory for {owner_key}: {e}"
            ))
        })?;
        tokio::fs::write(dir.join(filename), bytes)
            .await
            .map_err(|e| {
                CoreError::Storage(format!("uploads: failed to write {filename}: {e}"))
            })?;

        tracing::info!(owner_key, filename, size = bytes.len(), "Stored uploaded image");

        Ok(UploadedFile {
            id: filename.to_string(),
            name: filename.to_string(),
            path: format!("/uploads/{owner_key}/{filename}"),
            size: bytes.len() as u64,
        })
    }

    /// Delete an owner's file by id. Returns `false` when no such PNG exists.
    pub async fn delete(&self, owner_key: &str, file_id: &str) -> Result<bool, CoreError> {
        validate_owner_key(owner_key)?;
        validate_filename(file_id)?;
        if !is_png_filename(file_id) {
            return Ok(false);
        }

        match tokio::fs::remove_file(self.owner_dir(owner_key).join(file_id)).await {
            Ok(()) => {
                tracing::info!(owner_key, file_id, "Deleted uploaded image");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CoreError::Storage(format!(
                "uploads: failed to delete {file_id} for {owner_key}: {e}"
            ))),
        }
    }
}

/// PNG by extension; also excludes the published artifact from listings.
fn is_png_filename(name: &str) -> bool {
    name != ARTIFACT_FILENAME
        && Path::new(name)
            .extension()
            .map(|e| e.eq_ignore_ascii_case("png"))
            .unwrap_or(false)
}
