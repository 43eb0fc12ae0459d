mod mock_speech_synthesizer;
mod openai_speech_synthesizer;
mod speech_synthesizer_factory;
mod xtts_server_synthesizer;

pub use mock_speech_synthesizer::MockSpeechSynthesizer;
pub use openai_speech_synthesizer::OpenAiSpeechSynthesizer;
pub use speech_synthesizer_factory::SpeechSynthesizerFactory;
pub use xtts_server_synthesizer::XttsServerSynthesizer;
