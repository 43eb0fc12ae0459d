use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;

use speech_services::application::ports::ArtifactStore;
use speech_services::application::services::{SweepReport, TempFileJanitor};
use speech_services::domain::ArtifactName;
use speech_services::infrastructure::storage::LocalArtifactStore;

use crate::support::FakeStore;

#[tokio::test]
async fn given_files_older_than_max_age_when_sweeping_then_only_old_files_are_removed() {
    let now = Utc::now();
    let store = Arc::new(FakeStore::with_entries(vec![
        ("input_old.wav", now - chrono::Duration::seconds(1801)),
        ("converted_fresh.wav", now - chrono::Duration::seconds(60)),
    ]));
    let janitor = TempFileJanitor::new(store.clone(), Duration::from_secs(1800));

    let report = janitor.sweep().await.unwrap();

    assert_eq!(
        report,
        SweepReport {
            removed: 1,
            retained: 1
        }
    );
    assert_eq!(store.names(), vec!["converted_fresh.wav"]);
}

#[tokio::test]
async fn given_file_with_future_timestamp_when_sweeping_then_file_is_kept() {
    let now = Utc::now();
    let store = Arc::new(FakeStore::with_entries(vec![(
        "tts_future.wav",
        now + chrono::Duration::seconds(5),
    )]));
    let janitor = TempFileJanitor::new(store.clone(), Duration::ZERO);

    let report = janitor.sweep().await.unwrap();

    assert_eq!(report.removed, 0);
    assert_eq!(report.retained, 1);
}

#[tokio::test]
async fn given_undeletable_file_when_sweeping_then_sweep_continues() {
    let old = Utc::now() - chrono::Duration::hours(2);
    let mut store = FakeStore::with_entries(vec![
        ("tts_locked.wav", old),
        ("tts_a.wav", old),
        ("tts_b.mp3", old),
    ]);
    store.undeletable = vec!["tts_locked.wav".to_string()];
    let store = Arc::new(store);
    let janitor = TempFileJanitor::new(store.clone(), Duration::from_secs(3600));

    let report = janitor.sweep().await.unwrap();

    assert_eq!(report.removed, 2);
    assert_eq!(report.retained, 1);
    assert_eq!(store.names(), vec!["tts_locked.wav"]);
}

#[tokio::test]
async fn given_empty_store_when_sweeping_then_nothing_happens() {
    let janitor = TempFileJanitor::new(Arc::new(FakeStore::default()), Duration::from_secs(1));

    let report = janitor.sweep().await.unwrap();

    assert_eq!(report, SweepReport::default());
}

#[tokio::test]
async fn given_real_directory_when_sweeping_with_zero_max_age_then_files_are_deleted() {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn ArtifactStore> = Arc::new(LocalArtifactStore::new(dir.path()).unwrap());
    let name = ArtifactName::parse("input_abc_clip.wav").unwrap();
    store.put(&name, Bytes::from_static(b"RIFF")).await.unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    let janitor = TempFileJanitor::new(Arc::clone(&store), Duration::ZERO);
    let report = janitor.sweep().await.unwrap();

    assert_eq!(report.removed, 1);
    assert!(!dir.path().join("input_abc_clip.wav").exists());
}

#[tokio::test]
async fn given_real_directory_when_sweeping_with_long_max_age_then_files_are_kept() {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn ArtifactStore> = Arc::new(LocalArtifactStore::new(dir.path()).unwrap());
    let name = ArtifactName::parse("tts_keep.wav").unwrap();
    store.put(&name, Bytes::from_static(b"RIFF")).await.unwrap();

    let janitor = Arc::new(TempFileJanitor::new(
        Arc::clone(&store),
        Duration::from_secs(3600),
    ));
    janitor.schedule();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(dir.path().join("tts_keep.wav").exists());
    assert_eq!(janitor.max_age(), Duration::from_secs(3600));
}
