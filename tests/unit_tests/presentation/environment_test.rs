use speech_services::presentation::config::Environment;

#[test]
fn given_known_names_when_parsing_environment_then_variants_match() {
    assert_eq!(Environment::try_from("LOCAL".to_string()), Ok(Environment::Local));
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
    assert_eq!(
        Environment::try_from("production".to_string()),
        Ok(Environment::Prod)
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_unset_variable_when_looking_up_environment_then_local() {
    assert_eq!(Environment::from_lookup(|_| None), Ok(Environment::Local));
}

#[test]
fn given_environment_when_naming_settings_file_then_lowercase_suffix() {
    assert_eq!(Environment::Prod.settings_file(), "appsettings.prod");
}
