mod temp_janitor_test;
mod transcription_service_test;
