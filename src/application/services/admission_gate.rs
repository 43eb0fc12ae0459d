use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Fixed-size admission control. Requests beyond the limit are rejected,
/// never queued.
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

/// Slot held for the lifetime of one admitted request.
#[derive(Debug)]
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("too many concurrent requests (limit {limit})")]
    Saturated { limit: usize },
}

impl AdmissionGate {
    pub fn new(limit: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    pub fn try_admit(&self) -> Result<AdmissionPermit, AdmissionError> {
        Arc::clone(&self.semaphore)
            .try_acquire_owned()
            .map(|permit| AdmissionPermit { _permit: permit })
            .map_err(|_| AdmissionError::Saturated { limit: self.limit })
    }

    pub fn in_flight(&self) -> usize {
        self.limit - self.semaphore.available_permits()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
