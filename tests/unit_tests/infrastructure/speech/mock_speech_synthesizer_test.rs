use std::time::Duration;

use speech_services::application::ports::{SpeechSynthesizer, SynthesisRequest};
use speech_services::domain::Language;
use speech_services::infrastructure::audio::audio_decoder::decode_audio;
use speech_services::infrastructure::speech::MockSpeechSynthesizer;

fn request(text: &str, speed: f32) -> SynthesisRequest {
    SynthesisRequest {
        text: text.to_string(),
        language: Language::English,
        speaker: None,
        speed,
    }
}

#[tokio::test]
async fn given_text_when_mock_synthesizes_then_valid_wav_scaled_by_word_count() {
    let synthesizer = MockSpeechSynthesizer::default();

    let wav = synthesizer.synthesize(&request("one two three", 1.0)).await.unwrap();
    let audio = decode_audio(&wav, None).unwrap();

    assert!((audio.duration_secs() - 1.2).abs() < 0.01);
}

#[tokio::test]
async fn given_faster_speed_when_mock_synthesizes_then_audio_is_shorter() {
    let synthesizer = MockSpeechSynthesizer::default();

    let normal = synthesizer.synthesize(&request("one two", 1.0)).await.unwrap();
    let fast = synthesizer.synthesize(&request("one two", 2.0)).await.unwrap();

    assert!(fast.len() < normal.len());
}

#[tokio::test]
async fn given_default_mock_when_listing_speakers_then_xtts_defaults_are_present() {
    let synthesizer = MockSpeechSynthesizer::new(vec!["Dmitrii".to_string()], Duration::ZERO);

    assert_eq!(synthesizer.speakers().await.unwrap(), vec!["Dmitrii".to_string()]);
    assert_eq!(MockSpeechSynthesizer::default().speakers().await.unwrap().len(), 2);
}
