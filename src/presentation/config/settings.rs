use std::collections::HashMap;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;

use crate::domain::Language;

use super::environment::Environment;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_WHISPER_MODEL: &str = "openai/whisper-medium";
pub const DEFAULT_TTS_MODEL: &str = "tts_models/multilingual/multi-dataset/xtts_v2";
pub const DEFAULT_MAX_AUDIO_SIZE: i64 = 50 * 1024 * 1024;

/// Which of the two binaries is loading its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Stt,
    Tts,
}

impl ServiceKind {
    pub fn default_port(&self) -> u16 {
        match self {
            ServiceKind::Stt => 8002,
            ServiceKind::Tts => 8001,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Stt => "stt-service",
            ServiceKind::Tts => "tts-service",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub device: DeviceSettings,
    pub scaffold: ScaffoldSettings,
    pub stt: SttSettings,
    pub tts: TtsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceSettings {
    pub torch_device: DeviceSetting,
    pub enable_gpu: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSetting {
    Auto,
    Cpu,
    Cuda,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScaffoldSettings {
    pub enabled: bool,
    pub mock_latency_ms: u64,
}

impl ScaffoldSettings {
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SttSettings {
    pub temp_audio_dir: String,
    pub max_audio_size: usize,
    pub max_concurrent_requests: usize,
    pub temp_file_max_age_secs: u64,
    pub cleanup_interval_secs: u64,
    pub ffmpeg_binary: String,
    pub provider: TranscriptionProviderSetting,
    pub whisper_model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderSetting {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TtsSettings {
    pub audio_output_dir: String,
    pub max_text_length: usize,
    pub model_name: String,
    pub default_language: Language,
    pub audio_file_max_age_secs: u64,
    pub cleanup_interval_secs: u64,
    pub ffmpeg_binary: String,
    pub provider: SpeechProviderSetting,
    pub base_url: String,
    pub api_key: Option<String>,
    pub voice_model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProviderSetting {
    Xtts,
    #[serde(rename = "openai")]
    OpenAi,
    Mock,
}

/// Flat variables understood by the earlier deployments, mapped onto the
/// nested keys. They take precedence over every other source.
const LEGACY_VARIABLES: &[(&str, &str)] = &[
    ("HOST", "server.host"),
    ("PORT", "server.port"),
    ("LOG_LEVEL", "logging.level"),
    ("TORCH_DEVICE", "device.torch_device"),
    ("ENABLE_GPU", "device.enable_gpu"),
    ("SCAFFOLD_MODE", "scaffold.enabled"),
    ("MOCK_RESPONSE_DELAY", "scaffold.mock_latency_ms"),
    ("TEMP_AUDIO_DIR", "stt.temp_audio_dir"),
    ("MAX_AUDIO_SIZE", "stt.max_audio_size"),
    ("MAX_CONCURRENT_REQUESTS", "stt.max_concurrent_requests"),
    ("WHISPER_MODEL", "stt.whisper_model"),
    ("OPENAI_API_KEY", "stt.api_key"),
    ("OPENAI_API_KEY", "tts.api_key"),
    ("AUDIO_OUTPUT_DIR", "tts.audio_output_dir"),
    ("MAX_TEXT_LENGTH", "tts.max_text_length"),
    ("TTS_MODEL_NAME", "tts.model_name"),
    ("DEFAULT_LANGUAGE", "tts.default_language"),
    ("XTTS_SERVER_URL", "tts.base_url"),
];

impl Settings {
    /// Loads settings from the process environment and the optional
    /// `appsettings.{env}` file in the working directory.
    pub fn load(service: ServiceKind) -> Result<Self, ConfigError> {
        Self::load_with(service, std::env::vars().collect())
    }

    /// Same layering as [`Settings::load`], reading variables from `vars`
    /// instead of the process environment.
    pub fn load_with(
        service: ServiceKind,
        vars: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let environment =
            Environment::from_lookup(|key| vars.get(key).cloned()).map_err(ConfigError::Message)?;

        let mut builder = Self::defaults(service)?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone().into_iter().collect())),
            );

        for (variable, key) in LEGACY_VARIABLES {
            let value = vars
                .get(*variable)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    fn defaults(service: ServiceKind) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(service.default_port()))?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .set_default("device.torch_device", "auto")?
            .set_default("device.enable_gpu", true)?
            .set_default("scaffold.enabled", false)?
            .set_default("scaffold.mock_latency_ms", 0_i64)?
            .set_default("stt.temp_audio_dir", "./temp")?
            .set_default("stt.max_audio_size", DEFAULT_MAX_AUDIO_SIZE)?
            .set_default("stt.max_concurrent_requests", 5_i64)?
            .set_default("stt.temp_file_max_age_secs", 1800_i64)?
            .set_default("stt.cleanup_interval_secs", 300_i64)?
            .set_default("stt.ffmpeg_binary", "ffmpeg")?
            .set_default("stt.provider", "local")?
            .set_default("stt.whisper_model", DEFAULT_WHISPER_MODEL)?
            .set_default("stt.azure_api_version", "2024-06-01")?
            .set_default("tts.audio_output_dir", "./audio")?
            .set_default("tts.max_text_length", 1000_i64)?
            .set_default("tts.model_name", DEFAULT_TTS_MODEL)?
            .set_default("tts.default_language", "en")?
            .set_default("tts.audio_file_max_age_secs", 3600_i64)?
            .set_default("tts.cleanup_interval_secs", 300_i64)?
            .set_default("tts.ffmpeg_binary", "ffmpeg")?
            .set_default("tts.provider", "xtts")?
            .set_default("tts.base_url", "http://localhost:8020")?
            .set_default("tts.voice_model", "tts-1")
    }
}
