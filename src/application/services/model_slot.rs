use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::OnceCell;

use crate::application::ports::{ModelLoadError, ModelLoader};

type LoadAttempt<T> = Shared<BoxFuture<'static, Result<Arc<T>, ModelLoadError>>>;

/// Holds a pretrained model that is loaded at most once.
///
/// Every load runs on its own spawned task, so callers that give up waiting
/// do not cancel it. Concurrent callers share that single attempt and all
/// see its result. A failed attempt leaves the slot empty so the next call
/// retries.
pub struct ModelSlot<T: ?Sized + Send + Sync + 'static> {
    name: Arc<str>,
    cell: Arc<OnceCell<Arc<T>>>,
    in_flight: Arc<Mutex<Option<LoadAttempt<T>>>>,
    loader: ModelLoader<T>,
}

impl<T: ?Sized + Send + Sync + 'static> ModelSlot<T> {
    pub fn new(name: impl Into<String>, loader: ModelLoader<T>) -> Self {
        Self {
            name: Arc::from(name.into()),
            cell: Arc::new(OnceCell::new()),
            in_flight: Arc::new(Mutex::new(None)),
            loader,
        }
    }

    pub fn preloaded(name: impl Into<String>, model: Arc<T>) -> Self {
        let loaded = Arc::clone(&model);
        Self {
            name: Arc::from(name.into()),
            cell: Arc::new(OnceCell::new_with(Some(model))),
            in_flight: Arc::new(Mutex::new(None)),
            loader: Arc::new(move || Ok(Arc::clone(&loaded))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.in_flight).is_some()
    }

    pub fn loaded(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    /// Returns the model, joining or starting a load when it is missing.
    pub async fn load(&self) -> Result<Arc<T>, ModelLoadError> {
        if let Some(model) = self.loaded() {
            return Ok(model);
        }
        self.attempt().await
    }

    /// Starts a load in the background unless one is loaded or running.
    pub fn spawn_load(&self) {
        if !self.is_loaded() {
            drop(self.attempt());
        }
    }

    fn attempt(&self) -> LoadAttempt<T> {
        let mut in_flight = lock(&self.in_flight);
        if let Some(attempt) = in_flight.as_ref() {
            return attempt.clone();
        }
        // the previous attempt may have finished after the caller checked
        if let Some(model) = self.loaded() {
            return futures::future::ready(Ok(model)).boxed().shared();
        }

        let task = tokio::spawn(run_load(
            Arc::clone(&self.name),
            Arc::clone(&self.loader),
            Arc::clone(&self.cell),
            Arc::clone(&self.in_flight),
        ));
        let attempt = async move {
            task.await
                .map_err(|e| ModelLoadError::Aborted(e.to_string()))
                .and_then(|result| result)
        }
        .boxed()
        .shared();

        *in_flight = Some(attempt.clone());
        attempt
    }
}

async fn run_load<T: ?Sized + Send + Sync + 'static>(
    name: Arc<str>,
    loader: ModelLoader<T>,
    cell: Arc<OnceCell<Arc<T>>>,
    in_flight: Arc<Mutex<Option<LoadAttempt<T>>>>,
) -> Result<Arc<T>, ModelLoadError> {
    tracing::info!(model = %name, "Loading model");

    let result = tokio::task::spawn_blocking(move || loader())
        .await
        .map_err(|e| ModelLoadError::Aborted(e.to_string()))
        .and_then(|result| result);

    match &result {
        Ok(model) => {
            // set before clearing in_flight so later callers find the model
            let _ = cell.set(Arc::clone(model));
            tracing::info!(model = %name, "Model loaded successfully");
        }
        Err(e) => tracing::error!(model = %name, error = %e, "Failed to load model"),
    }

    lock(&in_flight).take();
    result
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
