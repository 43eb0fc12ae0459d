mod audio_file;
mod error;
mod generate_speech;
mod stt_health;
mod transcribe;
mod tts_health;
mod voices;

pub use audio_file::audio_file_handler;
pub use error::{ErrorResponse, error_response};
pub use generate_speech::{GenerateSpeechRequest, GenerateSpeechResponse, generate_speech_handler};
pub use stt_health::{SttHealthResponse, SttStatusResponse, stt_health_handler, stt_status_handler};
pub use transcribe::{AUDIO_FIELD, TranscriptionResponse, transcribe_handler};
pub use tts_health::{TtsHealthResponse, TtsStatusResponse, tts_health_handler, tts_status_handler};
pub use voices::voices_handler;
