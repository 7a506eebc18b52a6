use serial_test::serial;
use std::env;

fn clear() {
    for var in [
        "AWS_ACCESS_KEY_ID",
        "AWS_SECRET_ACCESS_KEY",
        "AWS_SESSION_TOKEN",
        "AWS_REGION",
        "TRANSCRIBE_PROVIDER_ENDPOINT",
        "TRANSCRIBE_PROVIDER_TIMEOUT",
        "TRANSCRIBE_PROVIDER_MAX_RETRIES",
        "TRANSCRIBE_PROVIDER_LOG_LEVEL",
        "RUST_LOG",
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_config_load_success() {
    clear();
    env::set_var("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE");
    env::set_var("AWS_SECRET_ACCESS_KEY", "secret");

    let config = transcribe_aws::config::AwsConfig::load().unwrap();
    assert_eq!(config.access_key_id, "AKIDEXAMPLE");
    assert_eq!(config.region, "us-east-1");
    assert!(config.session_token.is_none());
    assert_eq!(config.common.timeout_secs, 30);
    assert_eq!(config.common.max_retries, 3);
    assert_eq!(config.endpoint(), "https://transcribe.us-east-1.amazonaws.com");

    clear();
}

#[test]
#[serial]
fn test_config_load_missing_secret() {
    clear();
    env::set_var("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE");

    let err = transcribe_aws::config::AwsConfig::load().unwrap_err();
    assert!(matches!(err, golem_transcribe::TranscribeError::Unauthorized(_)));
    assert!(err.message().contains("AWS_SECRET_ACCESS_KEY"));

    clear();
}

#[test]
#[serial]
fn test_config_load_custom_values() {
    clear();
    env::set_var("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE");
    env::set_var("AWS_SECRET_ACCESS_KEY", "secret");
    env::set_var("AWS_SESSION_TOKEN", "session");
    env::set_var("AWS_REGION", "ap-southeast-2");
    env::set_var("TRANSCRIBE_PROVIDER_ENDPOINT", "http://localhost:4566");
    env::set_var("TRANSCRIBE_PROVIDER_MAX_RETRIES", "0");

    let config = transcribe_aws::config::AwsConfig::load().unwrap();
    assert_eq!(config.region, "ap-southeast-2");
    assert_eq!(config.session_token.as_deref(), Some("session"));
    assert_eq!(config.common.max_retries, 0);
    assert_eq!(config.endpoint(), "http://localhost:4566");

    clear();
}

#[test]
#[serial]
fn test_client_from_env_installs_logger_at_configured_level() {
    clear();
    env::set_var("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE");
    env::set_var("AWS_SECRET_ACCESS_KEY", "secret");
    env::set_var("TRANSCRIBE_PROVIDER_LOG_LEVEL", "debug");

    let client = transcribe_aws::AwsTranscribeClient::from_env().unwrap();
    assert_eq!(client.config().common.log_level.as_deref(), Some("debug"));
    assert_eq!(log::max_level(), log::LevelFilter::Debug);

    // A second client keeps the logger that is already installed.
    env::set_var("TRANSCRIBE_PROVIDER_LOG_LEVEL", "error");
    transcribe_aws::AwsTranscribeClient::from_env().unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Debug);

    clear();
}
