use golem_transcribe::config::CommonConfig;
use serial_test::serial;
use std::env;

fn clear() {
    env::remove_var("TRANSCRIBE_PROVIDER_TIMEOUT");
    env::remove_var("TRANSCRIBE_PROVIDER_MAX_RETRIES");
    env::remove_var("TRANSCRIBE_PROVIDER_LOG_LEVEL");
    env::remove_var("TRANSCRIBE_PROVIDER_ENDPOINT");
}

#[test]
#[serial]
fn test_config_defaults() {
    clear();

    let config = CommonConfig::from_env().unwrap();
    assert_eq!(config, CommonConfig::default());
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.max_retries, 3);
    assert!(config.endpoint.is_none());
}

#[test]
#[serial]
fn test_config_custom_values() {
    clear();
    env::set_var("TRANSCRIBE_PROVIDER_TIMEOUT", "60");
    env::set_var("TRANSCRIBE_PROVIDER_MAX_RETRIES", "5");
    env::set_var("TRANSCRIBE_PROVIDER_LOG_LEVEL", "debug");
    env::set_var("TRANSCRIBE_PROVIDER_ENDPOINT", "http://localhost:4566/");

    let config = CommonConfig::from_env().unwrap();
    assert_eq!(config.timeout_secs, 60);
    assert_eq!(config.timeout().as_secs(), 60);
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.log_level.as_deref(), Some("debug"));
    assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));

    clear();
}

#[test]
#[serial]
fn test_config_garbage_numbers_fall_back() {
    clear();
    env::set_var("TRANSCRIBE_PROVIDER_TIMEOUT", "soon");
    env::set_var("TRANSCRIBE_PROVIDER_MAX_RETRIES", "-1");

    let config = CommonConfig::from_env().unwrap();
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.max_retries, 3);

    clear();
}

#[test]
#[serial]
fn test_config_rejects_malformed_endpoint() {
    clear();
    env::set_var("TRANSCRIBE_PROVIDER_ENDPOINT", "not a url");
    assert!(CommonConfig::from_env().is_err());

    env::set_var("TRANSCRIBE_PROVIDER_ENDPOINT", "ftp://example.com");
    assert!(CommonConfig::from_env().is_err());

    clear();
}
