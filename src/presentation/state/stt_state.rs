use std::sync::Arc;

use crate::application::services::{AdmissionGate, TranscriptionService};
use crate::infrastructure::device::ComputeDevice;
use crate::presentation::config::SttSettings;

#[derive(Clone)]
pub struct SttState {
    pub transcription_service: Arc<TranscriptionService>,
    pub admission_gate: Arc<AdmissionGate>,
    pub settings: SttSettings,
    pub device: ComputeDevice,
}
