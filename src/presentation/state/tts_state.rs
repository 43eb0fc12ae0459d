use std::sync::Arc;

use crate::application::services::SpeechService;
use crate::infrastructure::device::ComputeDevice;
use crate::presentation::config::TtsSettings;

#[derive(Clone)]
pub struct TtsState {
    pub speech_service: Arc<SpeechService>,
    pub settings: TtsSettings,
    pub device: ComputeDevice,
}
