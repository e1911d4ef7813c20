//! Disk-backed storage for case attachments.
//!
//! Files live under `<base>/cases/` with randomized, collision-resistant
//! names derived from the original file's extension (`<uuid>.<ext>`), so
//! a stored name never leaks the uploader's filename and can be served
//! directly as a public URL path.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;

/// Namespace directory for case attachments.
const CASES_NAMESPACE: &str = "cases";

/// Longest extension kept on a stored file.
const MAX_EXT_LEN: usize = 10;

#[derive(Debug)]
pub struct AttachmentStore {
    base_path: PathBuf,
    max_size: usize,
}

impl AttachmentStore {
    pub async fn new(base_path: PathBuf, max_size: usize) -> Result<Self, ApiError> {
        let cases_dir = base_path.join(CASES_NAMESPACE);
        fs::create_dir_all(&cases_dir).await.map_err(|e| {
            ApiError::Internal(format!(
                "Failed to create attachment directory '{}': {}",
                cases_dir.display(),
                e
            ))
        })?;

        info!(path = %base_path.display(), "Attachment store initialized");

        Ok(Self { base_path, max_size })
    }

    /// Store one uploaded file, returning the randomized stored name.
    pub async fn save_case_file(
        &self,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, ApiError> {
        if data.is_empty() {
            return Err(ApiError::BadRequest("Empty attachment".to_string()));
        }
        if data.len() > self.max_size {
            return Err(ApiError::AttachmentTooLarge {
                size: data.len(),
                max: self.max_size,
            });
        }

        let name = match sanitize_extension(original_name) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let path = self.safe_case_path(&name)?;

        fs::write(&path, data).await.map_err(|e| {
            ApiError::Internal(format!("Failed to write attachment {}: {}", name, e))
        })?;

        debug!(name = %name, size = data.len(), "Stored attachment");
        Ok(name)
    }

    /// Read a stored attachment back.
    pub async fn read_case_file(&self, name: &str) -> Result<Vec<u8>, ApiError> {
        let path = self.safe_case_path(name)?;

        if !path.exists() {
            return Err(ApiError::NotFound(format!("attachment {name}")));
        }

        let data = fs::read(&path).await.map_err(|e| {
            ApiError::Internal(format!("Failed to read attachment {}: {}", name, e))
        })?;

        debug!(name = %name, size = data.len(), "Retrieved attachment");
        Ok(data)
    }

    /// Remove a stored attachment. Missing files are not an error, so a
    /// failed submission can clean up whatever subset was written.
    pub async fn delete_case_file(&self, name: &str) -> Result<(), ApiError> {
        let path = self.safe_case_path(name)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(name = %name, "Deleted attachment");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Internal(format!(
                "Failed to delete attachment {}: {}",
                name, e
            ))),
        }
    }

    /// The URL path a stored name is served under.
    pub fn public_url(&self, base_url: &str, name: &str) -> String {
        format!("{base_url}/files/{CASES_NAMESPACE}/{name}")
    }

    /// Resolve a stored name inside the `cases/` namespace, rejecting
    /// anything that could escape it.
    fn safe_case_path(&self, name: &str) -> Result<PathBuf, ApiError> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
        {
            return Err(ApiError::BadRequest("Path traversal detected".to_string()));
        }
        let target = self.base_path.join(CASES_NAMESPACE).join(name);
        ensure_within(&self.base_path, &target)
    }
}

/// Verify that a resolved path stays within the expected base directory.
fn ensure_within(base: &Path, target: &Path) -> Result<PathBuf, ApiError> {
    let canonical_base = base.canonicalize().unwrap_or_else(|_| base.to_path_buf());
    let mut resolved = canonical_base.clone();
    for component in target
        .strip_prefix(&canonical_base)
        .unwrap_or(target)
        .components()
    {
        match component {
            std::path::Component::Normal(c) => resolved.push(c),
            std::path::Component::ParentDir => {
                return Err(ApiError::BadRequest("Path traversal detected".to_string()));
            }
            _ => {} // RootDir, CurDir, Prefix — skip
        }
    }
    if !resolved.starts_with(&canonical_base) {
        return Err(ApiError::BadRequest("Path traversal detected".to_string()));
    }
    Ok(resolved)
}

/// Keep only a short, lowercase, alphanumeric extension from the
/// uploader's filename.
fn sanitize_extension(original_name: &str) -> Option<String> {
    let ext = original_name.rsplit_once('.')?.1;
    if ext.is_empty()
        || ext.len() > MAX_EXT_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_store() -> (AttachmentStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = AttachmentStore::new(dir.path().to_path_buf(), 1024 * 1024)
            .await
            .unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_store_and_read() {
        let (store, _dir) = test_store().await;

        let name = store.save_case_file("laudo.PDF", b"conteudo").await.unwrap();
        assert!(name.ends_with(".pdf"));

        let data = store.read_case_file(&name).await.unwrap();
        assert_eq!(data, b"conteudo");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (store, _dir) = test_store().await;
        let name = store.save_case_file("foto.jpg", b"bytes").await.unwrap();

        store.delete_case_file(&name).await.unwrap();
        store.delete_case_file(&name).await.unwrap();
        assert!(store.read_case_file(&name).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_and_oversize_rejected() {
        let dir = TempDir::new().unwrap();
        let store = AttachmentStore::new(dir.path().to_path_buf(), 8).await.unwrap();

        assert!(store.save_case_file("a.txt", b"").await.is_err());
        assert!(matches!(
            store.save_case_file("a.txt", b"123456789").await,
            Err(ApiError::AttachmentTooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let (store, _dir) = test_store().await;
        assert!(store.read_case_file("../escape.txt").await.is_err());
        assert!(store.read_case_file("sub/dir.txt").await.is_err());
    }

    #[test]
    fn test_sanitize_extension() {
        assert_eq!(sanitize_extension("laudo.pdf"), Some("pdf".to_string()));
        assert_eq!(sanitize_extension("FOTO.JPG"), Some("jpg".to_string()));
        assert_eq!(sanitize_extension("sem-extensao"), None);
        assert_eq!(sanitize_extension("estranho.p/d"), None);
    }
}
