mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VARIABLE, Environment};
pub use settings::{
    DEFAULT_HOST, DEFAULT_MAX_AUDIO_SIZE, DEFAULT_TTS_MODEL, DEFAULT_WHISPER_MODEL, DeviceSetting,
    DeviceSettings, LoggingSettings, ScaffoldSettings, ServerSettings, ServiceKind, Settings,
    SpeechProviderSetting, SttSettings, TranscriptionProviderSetting, TtsSettings,
};
