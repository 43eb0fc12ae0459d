use std::collections::HashMap;

use speech_services::domain::Language;
use speech_services::presentation::config::{
    DEFAULT_TTS_MODEL, DEFAULT_WHISPER_MODEL, DeviceSetting, ServiceKind, Settings,
    SpeechProviderSetting, TranscriptionProviderSetting,
};

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn given_no_variables_when_loading_stt_then_defaults_apply() {
    let settings = Settings::load_with(ServiceKind::Stt, HashMap::new()).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8002);
    assert_eq!(settings.device.torch_device, DeviceSetting::Auto);
    assert!(settings.device.enable_gpu);
    assert!(!settings.scaffold.enabled);
    assert_eq!(settings.stt.temp_audio_dir, "./temp");
    assert_eq!(settings.stt.max_audio_size, 52_428_800);
    assert_eq!(settings.stt.max_concurrent_requests, 5);
    assert_eq!(settings.stt.temp_file_max_age_secs, 1800);
    assert_eq!(settings.stt.cleanup_interval_secs, 300);
    assert_eq!(settings.stt.whisper_model, DEFAULT_WHISPER_MODEL);
    assert_eq!(settings.stt.provider, TranscriptionProviderSetting::Local);
    assert_eq!(settings.stt.api_key, None);
}

#[test]
fn given_no_variables_when_loading_tts_then_defaults_apply() {
    let settings = Settings::load_with(ServiceKind::Tts, HashMap::new()).unwrap();

    assert_eq!(settings.server.port, 8001);
    assert_eq!(settings.tts.audio_output_dir, "./audio");
    assert_eq!(settings.tts.max_text_length, 1000);
    assert_eq!(settings.tts.model_name, DEFAULT_TTS_MODEL);
    assert_eq!(settings.tts.default_language, Language::English);
    assert_eq!(settings.tts.audio_file_max_age_secs, 3600);
    assert_eq!(settings.tts.provider, SpeechProviderSetting::Xtts);
}

#[test]
fn given_legacy_variables_when_loading_then_they_override_defaults() {
    let settings = Settings::load_with(
        ServiceKind::Stt,
        vars(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9100"),
            ("TORCH_DEVICE", "cpu"),
            ("ENABLE_GPU", "false"),
            ("MAX_CONCURRENT_REQUESTS", "2"),
            ("TEMP_AUDIO_DIR", "/tmp/stt"),
            ("MAX_AUDIO_SIZE", "1048576"),
            ("SCAFFOLD_MODE", "true"),
            ("MOCK_RESPONSE_DELAY", "250"),
            ("OPENAI_API_KEY", "sk-legacy"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 9100);
    assert_eq!(settings.device.torch_device, DeviceSetting::Cpu);
    assert!(!settings.device.enable_gpu);
    assert_eq!(settings.stt.max_concurrent_requests, 2);
    assert_eq!(settings.stt.temp_audio_dir, "/tmp/stt");
    assert_eq!(settings.stt.max_audio_size, 1_048_576);
    assert!(settings.scaffold.enabled);
    assert_eq!(settings.scaffold.mock_latency_ms, 250);
    assert_eq!(settings.stt.api_key.as_deref(), Some("sk-legacy"));
    assert_eq!(settings.tts.api_key.as_deref(), Some("sk-legacy"));
}

#[test]
fn given_tts_legacy_variables_when_loading_then_tts_section_is_updated() {
    let settings = Settings::load_with(
        ServiceKind::Tts,
        vars(&[
            ("AUDIO_OUTPUT_DIR", "/srv/audio"),
            ("MAX_TEXT_LENGTH", "500"),
            ("TTS_MODEL_NAME", "tts_models/custom"),
            ("DEFAULT_LANGUAGE", "ru"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.tts.audio_output_dir, "/srv/audio");
    assert_eq!(settings.tts.max_text_length, 500);
    assert_eq!(settings.tts.model_name, "tts_models/custom");
    assert_eq!(settings.tts.default_language, Language::Russian);
}

#[test]
fn given_nested_app_variables_when_loading_then_sections_are_overridden() {
    let settings = Settings::load_with(
        ServiceKind::Tts,
        vars(&[
            ("APP__TTS__PROVIDER", "mock"),
            ("APP__TTS__CLEANUP_INTERVAL_SECS", "60"),
            ("APP__LOGGING__ENABLE_JSON", "true"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.tts.provider, SpeechProviderSetting::Mock);
    assert_eq!(settings.tts.cleanup_interval_secs, 60);
    assert!(settings.logging.enable_json);
}

#[test]
fn given_both_sources_when_loading_then_legacy_variable_wins() {
    let settings = Settings::load_with(
        ServiceKind::Stt,
        vars(&[("APP__SERVER__PORT", "7000"), ("PORT", "7001")]),
    )
    .unwrap();

    assert_eq!(settings.server.port, 7001);
}

#[test]
fn given_blank_legacy_variable_when_loading_then_it_is_ignored() {
    let settings = Settings::load_with(ServiceKind::Stt, vars(&[("TEMP_AUDIO_DIR", "  ")])).unwrap();

    assert_eq!(settings.stt.temp_audio_dir, "./temp");
}

#[test]
fn given_invalid_values_when_loading_then_error() {
    assert!(Settings::load_with(ServiceKind::Stt, vars(&[("PORT", "not-a-port")])).is_err());
    assert!(Settings::load_with(ServiceKind::Tts, vars(&[("DEFAULT_LANGUAGE", "de")])).is_err());
    assert!(Settings::load_with(ServiceKind::Stt, vars(&[("TORCH_DEVICE", "tpu")])).is_err());
    assert!(Settings::load_with(ServiceKind::Stt, vars(&[("APP_ENVIRONMENT", "moon")])).is_err());
}

#[test]
fn given_service_kinds_when_naming_then_binaries_match() {
    assert_eq!(ServiceKind::Stt.name(), "stt-service");
    assert_eq!(ServiceKind::Tts.default_port(), 8001);
}
