mod stt_state;
mod tts_state;

pub use stt_state::SttState;
pub use tts_state::TtsState;
