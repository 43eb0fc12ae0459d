use std::sync::Arc;

/// Blocking constructor for a pretrained model.
pub type ModelLoader<T> = Arc<dyn Fn() -> Result<Arc<T>, ModelLoadError> + Send + Sync>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model loading failed: {0}")]
    Failed(String),
    #[error("model loader aborted: {0}")]
    Aborted(String),
}
