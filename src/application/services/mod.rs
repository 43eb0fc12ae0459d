mod admission_gate;
mod language_detector;
mod model_slot;
mod speech_service;
mod temp_janitor;
mod transcription_service;

pub use admission_gate::{AdmissionError, AdmissionGate, AdmissionPermit};
pub use language_detector::{detect_language, resolve_language};
pub use model_slot::ModelSlot;
pub use speech_service::{
    SpeechOutcome, SpeechRequest, SpeechService, SpeechServiceError, estimate_speech_duration,
    select_speaker,
};
pub use temp_janitor::{SweepReport, TempFileJanitor};
pub use transcription_service::{
    AudioUpload, TranscriptionOutcome, TranscriptionService, TranscriptionServiceError,
};
