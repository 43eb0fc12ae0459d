mod artifact_store;
mod audio_converter;
mod model_loader;
mod speech_synthesizer;
mod transcription_engine;

pub use artifact_store::{ArtifactMeta, ArtifactStore, ArtifactStoreError};
pub use audio_converter::{
    AudioConversionError, AudioConverter, ConversionTarget, WHISPER_SAMPLE_RATE,
};
pub use model_loader::{ModelLoadError, ModelLoader};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError, SynthesisRequest};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
