pub mod audio_decoder;
mod azure_whisper_engine;
mod candle_whisper_engine;
mod fallback_converter;
pub mod ffmpeg_converter;
mod mock_transcription_engine;
mod openai_whisper_engine;
mod symphonia_converter;
mod transcription_engine_factory;
pub mod wav_encoder;

pub use azure_whisper_engine::AzureWhisperEngine;
pub use candle_whisper_engine::CandleWhisperEngine;
pub use fallback_converter::FallbackAudioConverter;
pub use ffmpeg_converter::{DEFAULT_FFMPEG_BINARY, FfmpegAudioConverter, check_ffmpeg_binary};
pub use mock_transcription_engine::{MOCK_TRANSCRIPT, MockTranscriptionEngine};
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use symphonia_converter::SymphoniaAudioConverter;
pub use transcription_engine_factory::TranscriptionEngineFactory;
