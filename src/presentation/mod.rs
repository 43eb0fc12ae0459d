pub mod config;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use config::{Environment, ServiceKind, Settings};
pub use router::{create_stt_router, create_tts_router};
pub use server::{serve, shutdown_signal};
pub use state::{SttState, TtsState};
