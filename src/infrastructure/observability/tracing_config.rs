/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub service: String,
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(service: impl Into<String>, level: &str, json_format: bool) -> Self {
        Self {
            service: service.into(),
            json_format: json_format || env_requests_json(),
            default_filter: format!("{level},speech_services=debug,tower_http=debug"),
            ..Self::default()
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service: "speech-services".to_string(),
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            json_format: env_requests_json(),
            default_filter: "info,speech_services=debug,tower_http=debug".to_string(),
        }
    }
}

fn env_requests_json() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
