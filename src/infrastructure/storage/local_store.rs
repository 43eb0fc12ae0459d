use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::TryStreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ArtifactMeta, ArtifactStore, ArtifactStoreError};
use crate::domain::ArtifactName;

/// Artifact directory on the local filesystem.
pub struct LocalArtifactStore {
    inner: Arc<LocalFileSystem>,
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, ArtifactStoreError> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;
        let root = std::fs::canonicalize(&base_path)?;
        let fs = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            root,
        })
    }
}

fn store_path(name: &ArtifactName) -> StorePath {
    StorePath::from(name.as_str())
}

fn not_found_or(
    name: &ArtifactName,
    err: object_store::Error,
    other: fn(String) -> ArtifactStoreError,
) -> ArtifactStoreError {
    match err {
        object_store::Error::NotFound { .. } => ArtifactStoreError::NotFound(name.to_string()),
        e => other(e.to_string()),
    }
}

#[async_trait::async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn put(&self, name: &ArtifactName, data: Bytes) -> Result<u64, ArtifactStoreError> {
        let size = data.len() as u64;
        self.inner
            .put(&store_path(name), PutPayload::from(data))
            .await
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        Ok(size)
    }

    async fn fetch(&self, name: &ArtifactName) -> Result<Vec<u8>, ArtifactStoreError> {
        let result = self
            .inner
            .get(&store_path(name))
            .await
            .map_err(|e| not_found_or(name, e, ArtifactStoreError::ReadFailed))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| ArtifactStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, name: &ArtifactName) -> Result<(), ArtifactStoreError> {
        self.inner
            .delete(&store_path(name))
            .await
            .map_err(|e| not_found_or(name, e, ArtifactStoreError::DeleteFailed))
    }

    async fn head(&self, name: &ArtifactName) -> Result<u64, ArtifactStoreError> {
        let meta = self
            .inner
            .head(&store_path(name))
            .await
            .map_err(|e| not_found_or(name, e, ArtifactStoreError::ReadFailed))?;
        Ok(meta.size as u64)
    }

    async fn list(&self) -> Result<Vec<ArtifactMeta>, ArtifactStoreError> {
        let objects: Vec<_> = self
            .inner
            .list(None)
            .try_collect()
            .await
            .map_err(|e| ArtifactStoreError::ListFailed(e.to_string()))?;

        Ok(objects
            .into_iter()
            .filter_map(|meta| match ArtifactName::parse(meta.location.as_ref()) {
                Ok(name) => Some(ArtifactMeta {
                    name,
                    size: meta.size as u64,
                    last_modified: meta.last_modified,
                }),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping foreign file in artifact directory");
                    None
                }
            })
            .collect())
    }

    fn local_path(&self, name: &ArtifactName) -> PathBuf {
        self.root.join(name.as_str())
    }
}
