//! Publish pipeline: materializes a game version as a public static page.
//!
//! Each owner has exactly one publish slot, `{uploads_dir}/{owner}/game.html`,
//! served at `{public_base_url}/uploads/{owner}/game.html`. Launching any
//! version overwrites whatever the owner had published before.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::CoreError;
use crate::owner::validate_owner_key;

/// Filename of the published artifact inside the owner's directory.
pub const ARTIFACT_FILENAME: &str = "game.html";

/// Writes and removes published game artifacts on the local filesystem.
pub struct Publisher {
    uploads_dir: PathBuf,
    public_base_url: String,
}

impl Publisher {
    /// Create a publisher rooted at `uploads_dir`, generating URLs under
    /// `public_base_url` (trailing slashes are stripped).
    pub fn new(uploads_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            uploads_dir: uploads_dir.into(),
            public_base_url,
        }
    }

    /// Directory holding the given owner's published artifact and uploads.
    pub fn owner_dir(&self, owner_key: &str) -> PathBuf {
        self.uploads_dir.join(owner_key)
    }

    /// Public URL of the owner's publish slot.
    pub fn public_url(&self, owner_key: &str) -> String {
        format!(
            "{}/uploads/{owner_key}/{ARTIFACT_FILENAME}",
            self.public_base_url
        )
    }

    /// Write `html` to the owner's publish slot and return its public URL.
    ///
    /// Creates missing intermediate directories and overwrites any existing
    /// artifact. The content lands via a temp file renamed into place, so a
    /// concurrent reader never observes a partially written page.
    pub async fn publish(&self, owner_key: &str, html: &str) -> Result<String, CoreError> {
        validate_owner_key(owner_key)?;

        let dir = self.owner_dir(owner_key);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            CoreError::Storage(format!(
                "publish: failed to create directory for owner {owner_key}: {e}"
            ))
        })?;

        let target = dir.join(ARTIFACT_FILENAME);
        let tmp = dir.join(format!(".{ARTIFACT_FILENAME}.{}.tmp", unique_suffix()));

        tokio::fs::write(&tmp, html).await.map_err(|e| {
            CoreError::Storage(format!("publish: failed to write artifact for {owner_key}: {e}"))
        })?;

        if let Err(e) = tokio::fs::rename(&tmp, &target).await {
            // Leave no stray temp file behind on a failed rename.
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(CoreError::Storage(format!(
                "publish: failed to move artifact into place for {owner_key}: {e}"
            )));
        }

        tracing::info!(owner_key, path = %target.display(), "Published game artifact");
        Ok(self.public_url(owner_key))
    }

    /// Remove the owner's published artifact. A missing artifact is success.
    pub async fn unpublish(&self, owner_key: &str) -> Result<(), CoreError> {
        validate_owner_key(owner_key)?;

        let target = self.owner_dir(owner_key).join(ARTIFACT_FILENAME);
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                tracing::info!(owner_key, "Removed published game artifact");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Storage(format!(
                "unpublish: failed to remove artifact for {owner_key}: {e}"
            ))),
        }
    }

    /// Absolute path of a file inside an owner's directory, for serving.
    ///
    /// Rejects filenames that are not a plain path component.
    pub fn resolve_file(&self, owner_key: &str, filename: &str) -> Result<PathBuf, CoreError> {
        validate_owner_key(owner_key)?;
        validate_filename(filename)?;
        Ok(self.owner_dir(owner_key).join(filename))
    }
}

/// Validate that a filename is a single, plain path component.
pub fn validate_filename(filename: &str) -> Result<(), CoreError> {
    let is_plain = Path::new(filename)
        .file_name()
        .map(|n| n == Path::new(filename).as_os_str())
        .unwrap_or(false);
    if filename.is_empty() || !is_plain || filename.contains("..") {
        return Err(CoreError::Validation(format!(
            "invalid filename '{filename}'"
        )));
    }
    Ok(())
}

fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}
