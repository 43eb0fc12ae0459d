use axum::Json;
use axum::extract::State;

use crate::domain::VoiceInfo;
use crate::presentation::state::TtsState;

pub async fn voices_handler(State(state): State<TtsState>) -> Json<Vec<VoiceInfo>> {
    let mut voices = VoiceInfo::builtin();
    voices.extend(
        state
            .speech_service
            .model_speakers()
            .await
            .iter()
            .map(|speaker| VoiceInfo::from_speaker(speaker)),
    );
    Json(voices)
}
