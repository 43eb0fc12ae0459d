use speech_services::domain::{ArtifactId, ArtifactName, AudioFormat};

#[test]
fn given_upload_filename_when_naming_then_prefix_and_id_are_included() {
    let id = ArtifactId::new();
    let name = ArtifactName::upload(&id, "meeting.mp3");

    assert_eq!(name.as_str(), format!("input_{}_meeting.mp3", id.as_uuid()));
    assert_eq!(name.format(), Some(AudioFormat::Mp3));
}

#[test]
fn given_filename_with_path_segments_when_naming_upload_then_only_base_name_survives() {
    let id = ArtifactId::new();
    let name = ArtifactName::upload(&id, "../../etc/passwd");

    assert_eq!(name.as_str(), format!("input_{}_passwd", id.as_uuid()));
    assert!(ArtifactName::parse(name.as_str()).is_ok());
}

#[test]
fn given_filename_with_spaces_when_naming_upload_then_unsafe_chars_are_replaced() {
    let id = ArtifactId::new();
    let name = ArtifactName::upload(&id, "my voice memo (1).m4a");

    assert!(name.as_str().ends_with("my_voice_memo__1_.m4a"));
}

#[test]
fn given_very_long_filename_when_naming_upload_then_extension_is_kept() {
    let id = ArtifactId::new();
    let long = format!("{}.wav", "a".repeat(300));
    let name = ArtifactName::upload(&id, &long);

    assert!(name.as_str().len() < 200);
    assert_eq!(name.format(), Some(AudioFormat::Wav));
}

#[test]
fn given_speech_artifacts_when_naming_then_follow_tts_pattern() {
    let id = ArtifactId::new();

    assert_eq!(
        ArtifactName::speech(&id, AudioFormat::Mp3).as_str(),
        format!("tts_{}.mp3", id.as_uuid())
    );
    assert_eq!(
        ArtifactName::speech_source(&id).as_str(),
        format!("tts_{}.src.wav", id.as_uuid())
    );
    assert_eq!(
        ArtifactName::converted(&id).as_str(),
        format!("converted_{}.wav", id.as_uuid())
    );
}

#[test]
fn given_traversal_or_hidden_names_when_parsing_then_rejected() {
    for raw in ["", "../secret.wav", "a/b.wav", ".env", "x\\y.wav", "tts..wav", "a b.wav"] {
        assert!(ArtifactName::parse(raw).is_err(), "accepted {raw:?}");
    }
}

#[test]
fn given_generated_name_when_parsing_then_accepted() {
    let parsed = ArtifactName::parse("tts_7f1c.wav").unwrap();
    assert_eq!(parsed.to_string(), "tts_7f1c.wav");
}
