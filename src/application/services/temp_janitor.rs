use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::application::ports::{ArtifactStore, ArtifactStoreError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub removed: usize,
    pub retained: usize,
}

/// Evicts artifacts older than a fixed age from a store.
pub struct TempFileJanitor {
    store: Arc<dyn ArtifactStore>,
    max_age: Duration,
}

impl TempFileJanitor {
    pub fn new(store: Arc<dyn ArtifactStore>, max_age: Duration) -> Self {
        Self { store, max_age }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub async fn sweep(&self) -> Result<SweepReport, ArtifactStoreError> {
        let now = Utc::now();
        let mut report = SweepReport::default();

        for meta in self.store.list().await? {
            let age = (now - meta.last_modified).to_std().unwrap_or_default();
            if age <= self.max_age {
                report.retained += 1;
                continue;
            }

            match self.store.delete(&meta.name).await {
                Ok(()) => {
                    tracing::info!(file = %meta.name, age_secs = age.as_secs(), "Cleaned up temp file");
                    report.removed += 1;
                }
                Err(e) => {
                    tracing::warn!(file = %meta.name, error = %e, "Failed to remove temp file");
                    report.retained += 1;
                }
            }
        }

        Ok(report)
    }

    /// Runs a sweep without blocking the caller.
    pub fn schedule(self: &Arc<Self>) {
        let janitor = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = janitor.sweep().await {
                tracing::error!(error = %e, "Error cleaning up temp files");
            }
        });
    }

    pub fn spawn_periodic(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let janitor = Arc::clone(self);
        tokio::spawn(async move {
            // interval panics on a zero period
            let mut ticker = tokio::time::interval(every.max(Duration::from_secs(1)));
            loop {
                ticker.tick().await;
                match janitor.sweep().await {
                    Ok(report) if report.removed > 0 => {
                        tracing::debug!(
                            removed = report.removed,
                            retained = report.retained,
                            "Periodic sweep finished"
                        );
                    }
                    Ok(_) => {}
                    Err(e) => tracing::error!(error = %e, "Error cleaning up temp files"),
                }
            }
        })
    }
}
