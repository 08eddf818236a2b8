//! Tests for config functionality.

use crate::config::Config;
use crate::config::types::{default_lock_file, default_spam_tags};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.authorization, "");
    assert_eq!(config.mail_parameter_name, "Mail");
    assert_eq!(config.request_timeout_secs, 60);
    assert_eq!(config.max_bytes, 0);
    assert_eq!(config.spam_tags, default_spam_tags());
    assert!(config.use_locks);
    assert_eq!(config.lock_file, default_lock_file());
    assert_eq!(config.lock_timeout_secs, 30);
    assert_eq!(config.lock_lifetime_secs, 90);
    assert!(config.request_timeout_secs < config.lock_lifetime_secs);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();

    // Should use all defaults
    assert_eq!(config.lock_timeout_secs, 30);
    assert_eq!(config.mail_parameter_name, "Mail");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
authorization: "relay:s3cret"
mail_parameter_name: Message
request_timeout_secs: 10
max_bytes: 1048576
spam_tags:
  - "X-Spam-Flag: YES"
use_locks: false
lock_file: /var/lock/relay.lock
lock_timeout_secs: 5
lock_lifetime_secs: 120
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.authorization, "relay:s3cret");
    assert_eq!(config.mail_parameter_name, "Message");
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.max_bytes, 1_048_576);
    assert_eq!(config.spam_tags, vec!["X-Spam-Flag: YES"]);
    assert!(!config.use_locks);
    assert_eq!(config.lock_file.to_str(), Some("/var/lock/relay.lock"));
    assert_eq!(config.lock_timeout(), Some(Duration::from_secs(5)));
    assert_eq!(config.lock_lifetime(), Duration::from_secs(120));
    assert_eq!(
        config.credentials(),
        Some(("relay".to_string(), "s3cret".to_string()))
    );
}

#[test]
fn test_parse_yaml_with_unknown_fields() {
    let yaml = r#"
max_bytes: 5
future_feature_x: enabled
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.max_bytes, 5);
}

#[test]
fn test_zero_lock_timeout_waits_forever() {
    let config = Config::from_yaml("lock_timeout_secs: 0").unwrap();
    assert_eq!(config.lock_timeout(), None);
}

#[test]
fn test_validate_lifetime_must_be_positive() {
    let err = Config::from_yaml("lock_lifetime_secs: 0").unwrap_err();
    assert!(err.to_string().contains("lock_lifetime_secs"));
}

#[test]
fn test_validate_lifetime_has_upper_bound() {
    let err = Config::from_yaml("lock_lifetime_secs: 18446744073709551615").unwrap_err();
    assert!(err.to_string().contains("at most 86400"));

    let config = Config::from_yaml("lock_lifetime_secs: 86400").unwrap();
    assert_eq!(config.lock_lifetime(), Duration::from_secs(86_400));
}

#[test]
fn test_validate_request_must_end_before_lease() {
    let err = Config::from_yaml("request_timeout_secs: 60\nlock_lifetime_secs: 60").unwrap_err();
    assert!(err.to_string().contains("request_timeout_secs (60)"));

    let config = Config::from_yaml("request_timeout_secs: 59\nlock_lifetime_secs: 60").unwrap();
    assert_eq!(config.request_timeout(), Duration::from_secs(59));

    // Without locking there is no lease to outlive.
    let config = Config::from_yaml(
        "use_locks: false\nrequest_timeout_secs: 120\nlock_lifetime_secs: 60",
    )
    .unwrap();
    assert!(!config.use_locks);
}

#[test]
fn test_validate_spam_tags_must_compile() {
    let err = Config::from_yaml("spam_tags: ['[unclosed']").unwrap_err();
    assert!(err.to_string().contains("invalid spam tag"));
}

#[test]
fn test_validate_authorization_needs_colon() {
    let err = Config::from_yaml("authorization: justauser").unwrap_err();
    assert!(err.to_string().contains("user:password"));
}

#[test]
fn test_validate_parameter_name_non_empty() {
    let err = Config::from_yaml("mail_parameter_name: ' '").unwrap_err();
    assert!(err.to_string().contains("mail_parameter_name"));
}

#[test]
fn test_no_credentials_by_default() {
    assert_eq!(Config::default().credentials(), None);
}

#[test]
fn test_load_from_file_and_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("smtp2http.yaml");
    std::fs::write(&path, "max_bytes: 42\nuse_locks: false\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.max_bytes, 42);
    assert!(!config.use_locks);

    let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
    assert_eq!(reparsed.max_bytes, 42);
}

#[test]
fn test_load_missing_file_is_config_error() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(temp.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}
