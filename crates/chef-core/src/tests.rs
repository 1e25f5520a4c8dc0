use crate::*;
use chrono::{Duration, TimeZone, Utc};
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

// ========== Config ==========

#[test]
fn test_config_requires_api_key() {
    let err = ChefConfig::from_lookup(env(&[])).unwrap_err();
    assert!(matches!(err, ChefError::Config(_)));
}

#[test]
fn test_config_blank_api_key_rejected() {
    let err = ChefConfig::from_lookup(env(&[("GROQ_API_KEY", "   ")])).unwrap_err();
    assert!(matches!(err, ChefError::Config(_)));
}

#[test]
fn test_config_defaults() {
    let cfg = ChefConfig::from_lookup(env(&[("GROQ_API_KEY", "gsk_test")])).unwrap();
    assert_eq!(cfg.completion.api_key, "gsk_test");
    assert_eq!(cfg.completion.model, "llama-3.3-70b-versatile");
    assert_eq!(cfg.completion.max_tokens, 250);
    assert!((cfg.completion.temperature - 0.6).abs() < f32::EPSILON);
    assert_eq!(cfg.server.port, 8000);
    assert_eq!(cfg.logging.format, "pretty");
}

#[test]
fn test_config_overrides() {
    let cfg = ChefConfig::from_lookup(env(&[
        ("GROQ_API_KEY", "k"),
        ("CHEF_PORT", "9001"),
        ("CHEF_MODEL", "llama-3.1-8b-instant"),
        ("CHEF_COMPLETION_BASE_URL", "http://localhost:1234/v1/"),
        ("CHEF_UPSTREAM_TIMEOUT_SECS", "5"),
        ("CHEF_LOG_FORMAT", "json"),
    ]))
    .unwrap();
    assert_eq!(cfg.server.port, 9001);
    assert_eq!(cfg.completion.model, "llama-3.1-8b-instant");
    assert_eq!(cfg.completion.base_url, "http://localhost:1234/v1");
    assert_eq!(cfg.completion.timeout_secs, 5);
    assert_eq!(cfg.logging.format, "json");
}

#[test]
fn test_config_invalid_port() {
    let err = ChefConfig::from_lookup(env(&[("GROQ_API_KEY", "k"), ("CHEF_PORT", "eighty")]))
        .unwrap_err();
    assert!(err.to_string().contains("CHEF_PORT"));
}

#[test]
fn test_config_invalid_log_format() {
    let res = ChefConfig::from_lookup(env(&[("GROQ_API_KEY", "k"), ("CHEF_LOG_FORMAT", "xml")]));
    assert!(res.is_err());
}

#[test]
fn test_config_zero_timeout_rejected() {
    let err = ChefConfig::from_lookup(env(&[
        ("GROQ_API_KEY", "k"),
        ("CHEF_UPSTREAM_TIMEOUT_SECS", "0"),
    ]))
    .unwrap_err();
    assert!(matches!(err, ChefError::Config(_)));
    assert!(err.to_string().contains("CHEF_UPSTREAM_TIMEOUT_SECS"));
}

#[test]
fn test_config_reads_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "GROQ_API_KEY=gsk_from_file\nCHEF_MODEL=llama-3.1-8b-instant\n").unwrap();

    let cfg = ChefConfig::from_env_file_with(&path, env(&[])).unwrap();
    assert_eq!(cfg.completion.api_key, "gsk_from_file");
    assert_eq!(cfg.completion.model, "llama-3.1-8b-instant");
}

#[test]
fn test_config_environment_wins_over_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "GROQ_API_KEY=gsk_from_file\nCHEF_PORT=9000\n").unwrap();

    let cfg = ChefConfig::from_env_file_with(&path, env(&[("GROQ_API_KEY", "gsk_from_env")])).unwrap();
    assert_eq!(cfg.completion.api_key, "gsk_from_env");
    assert_eq!(cfg.server.port, 9000);
}

#[test]
fn test_config_missing_dotenv_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ChefConfig::from_env_file_with(&dir.path().join("absent.env"), env(&[])).unwrap_err();
    assert!(matches!(err, ChefError::Config(_)));
}

#[test]
fn test_api_key_not_serialized() {
    let cfg = ChefConfig::from_lookup(env(&[("GROQ_API_KEY", "secret-key")])).unwrap();
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(!json.contains("secret-key"));
}

// ========== Types ==========

#[test]
fn test_turn_serializes_lowercase_role() {
    let json = serde_json::to_value(Turn::assistant("hi")).unwrap();
    assert_eq!(json["role"], "assistant");
    assert_eq!(json["content"], "hi");
}

#[test]
fn test_role_display() {
    assert_eq!(Role::User.to_string(), "user");
    assert_eq!(Role::Assistant.as_str(), "assistant");
}

// ========== Clock ==========

#[test]
fn test_manual_clock_advances() {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    let clock = ManualClock::new(start);
    assert_eq!(clock.now(), start);
    clock.advance(Duration::seconds(61));
    assert_eq!(clock.now(), start + Duration::seconds(61));
    clock.set(start);
    assert_eq!(clock.now(), start);
}
