//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold ENV_MUTEX to avoid
//! interfering with each other.

use minote::config::load_config;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("MINOTE_APPLICATION_LOG_LEVEL");
    std::env::remove_var("MINOTE_SERVICE_COOKIES");
    std::env::remove_var("MINOTE_EXPORT_CHUNK_SIZE");
    std::env::remove_var("MINOTE_EXPORT_OUTPUT_DIR");
    std::env::remove_var("MINOTE_EXPORT_PROGRESS_REPORT");
    std::env::remove_var("TEST_MINOTE_COOKIES");
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = config_file(
        r#"
[application]
log_level = "debug"

[service]
base_url = "https://notes.example.com/"
cookies = "userId=42; serviceToken=abc"
timeout_seconds = 45

[export]
chunk_size = 25
output_dir = "/tmp/minote-out"
max_workers = 8
max_retries = 2
page_size = 100
credential_check_interval = 10
progress_report = true
verify_output = false

[logging]
local_enabled = true
local_path = "/tmp/minote-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");

    assert_eq!(config.service.base_url, "https://notes.example.com/");
    assert!(config.service.cookies.expose_secret() == "userId=42; serviceToken=abc");
    assert_eq!(config.service.timeout_seconds, 45);

    assert_eq!(config.export.chunk_size, 25);
    assert_eq!(config.export.output_dir, "/tmp/minote-out");
    assert_eq!(config.export.max_workers, 8);
    assert_eq!(config.export.max_retries, 2);
    assert_eq!(config.export.page_size, 100);
    assert_eq!(config.export.credential_check_interval, 10);
    assert!(config.export.progress_report);
    assert!(!config.export.verify_output);

    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/minote-logs");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = config_file("[service]\ncookies = \"userId=1\"\n");

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.service.base_url, "https://i.mi.com/");
    assert_eq!(config.service.timeout_seconds, 30);
    assert_eq!(config.export.chunk_size, 50);
    assert_eq!(config.export.output_dir, "exported_notes");
    assert_eq!(config.export.max_workers, 5);
    assert_eq!(config.export.max_retries, 3);
    assert_eq!(config.export.page_size, 200);
    assert_eq!(config.export.credential_check_interval, 20);
    assert!(!config.export.progress_report);
    assert!(config.export.verify_output);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_MINOTE_COOKIES", "serviceToken=from-env");

    let temp_file = config_file(
        r#"
[service]
# cookies = "${NOT_SUBSTITUTED_IN_COMMENTS}"
cookies = "${TEST_MINOTE_COOKIES}"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert!(config.service.cookies.expose_secret() == "serviceToken=from-env");

    std::env::remove_var("TEST_MINOTE_COOKIES");
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = config_file("[service]\ncookies = \"${TEST_MINOTE_COOKIES}\"\n");

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_MINOTE_COOKIES"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("MINOTE_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("MINOTE_EXPORT_CHUNK_SIZE", "7");
    std::env::set_var("MINOTE_EXPORT_OUTPUT_DIR", "elsewhere");
    std::env::set_var("MINOTE_EXPORT_PROGRESS_REPORT", "true");

    let temp_file = config_file(
        r#"
[application]
log_level = "info"

[export]
chunk_size = 50
output_dir = "exported_notes"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.export.chunk_size, 7);
    assert_eq!(config.export.output_dir, "elsewhere");
    assert!(config.export.progress_report);

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"loud\"\n",
        "[export]\nchunk_size = 0\n",
        "[export]\nmax_workers = 0\n",
        "[service]\nbase_url = \"ftp://i.mi.com\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        let temp_file = config_file(contents);
        assert!(
            load_config(temp_file.path()).is_err(),
            "expected rejection of {contents:?}"
        );
    }
}

#[test]
fn test_missing_file() {
    let err = load_config("/nonexistent/minote.toml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}
