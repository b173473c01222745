use biocosmos_explorer::config::{AppConfig, ChatMode};
use serial_test::serial;
use std::env;
use std::fs;

const BIN: &str = "biocosmos-explorer";

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("BIOCOSMOS_SERVER__PORT");
        env::remove_var("BIOCOSMOS_CHAT__MODE");
        env::remove_var("BIOCOSMOS_LLM__MODEL");
        env::remove_var("LLM_API_KEY");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("BACKEND_URL");
        env::remove_var("CHAT_MODE");
        env::remove_var("CATALOG_ENABLED");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args([BIN]).expect("defaults should load");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.backend.base_url, "http://127.0.0.1:3000");
    assert_eq!(config.chat.mode, ChatMode::Backend);
    assert_eq!(config.chat.result_limit, 10);
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert!(config.llm.api_key.is_none());
    assert_eq!(config.quota.requests_per_minute, 15);
    assert_eq!(config.quota.requests_per_day, 1500);
    assert_eq!(config.resilience.request_timeout_secs, 30);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("BIOCOSMOS_SERVER__PORT", "9090");
        env::set_var("BIOCOSMOS_CHAT__MODE", "direct");
        env::set_var("LLM_API_KEY", "sk-test");
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.chat.mode, ChatMode::Direct);
    assert_eq!(config.llm_settings().api_key.as_deref(), Some("sk-test"));
    // The embedded catalogue moves with the listen port
    assert_eq!(config.backend.base_url, "http://127.0.0.1:9090");

    clear_env_vars();
}

#[test]
#[serial]
fn test_env_backend_url() {
    clear_env_vars();
    unsafe {
        env::set_var("BIOCOSMOS_BACKEND__BASE_URL", "http://10.0.0.5:5001");
    }

    let config = AppConfig::load_from_args([BIN, "--port", "8181"]).expect("Failed to load config");
    assert_eq!(config.backend.base_url, "http://10.0.0.5:5001");

    unsafe {
        env::remove_var("BIOCOSMOS_BACKEND__BASE_URL");
    }
    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("BIOCOSMOS_SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args([BIN, "--port", "8181", "--chat-mode", "direct"])
        .expect("Failed to load config");
    assert_eq!(config.server.port, 8181);
    assert_eq!(config.chat.mode, ChatMode::Direct);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("biocosmos.yaml");
    fs::write(
        &file_path,
        r#"
server:
  port: 7070
llm:
  model: gemini-2.0-flash
  base_url: https://generativelanguage.googleapis.com/v1beta/openai
"#,
    )
    .expect("Failed to write temp config");

    // Tell AppConfig to use this file via Env Var (mocking CLI arg indirectly)
    unsafe {
        env::set_var("CONFIG_FILE", &file_path);
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.llm.model, "gemini-2.0-flash");
    // Unset keys keep their defaults
    assert_eq!(config.chat.result_limit, 10);

    clear_env_vars();
}

#[test]
#[serial]
fn test_cwd_config_fallback() {
    clear_env_vars();

    let cwd_path = "config.yaml";
    fs::write(cwd_path, "server:\n  port: 6060\n").expect("Failed to write ./config.yaml");

    let config = AppConfig::load_from_args([BIN]);

    // Clean up before asserting so a failure does not leak the file into other tests
    fs::remove_file(cwd_path).unwrap();

    assert_eq!(config.expect("Failed to load config").server.port, 6060);
}
