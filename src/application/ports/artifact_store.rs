use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::domain::ArtifactName;

#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactMeta {
    pub name: ArtifactName,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(&self, name: &ArtifactName, data: Bytes) -> Result<u64, ArtifactStoreError>;

    async fn fetch(&self, name: &ArtifactName) -> Result<Vec<u8>, ArtifactStoreError>;

    async fn delete(&self, name: &ArtifactName) -> Result<(), ArtifactStoreError>;

    async fn head(&self, name: &ArtifactName) -> Result<u64, ArtifactStoreError>;

    async fn list(&self) -> Result<Vec<ArtifactMeta>, ArtifactStoreError>;

    /// Filesystem location handed to external transcoders.
    fn local_path(&self, name: &ArtifactName) -> PathBuf;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("list failed: {0}")]
    ListFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
