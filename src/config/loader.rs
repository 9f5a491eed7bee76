//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MinoteConfig;
use super::secret::secret_string;
use crate::domain::errors::MinoteError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`MinoteConfig`]
/// 4. Applies environment variable overrides (`MINOTE_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`MinoteError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use minote::config::loader::load_config;
///
/// let config = load_config("minote.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MinoteConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MinoteError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MinoteError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MinoteConfig = toml::from_str(&contents)
        .map_err(|e| MinoteError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        MinoteError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MinoteError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MinoteError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `MINOTE_*` prefix
///
/// Variables follow the pattern `MINOTE_<SECTION>_<KEY>`, for example
/// `MINOTE_SERVICE_COOKIES` or `MINOTE_EXPORT_CHUNK_SIZE`. Unparseable
/// numeric values are ignored and leave the file value in place.
fn apply_env_overrides(config: &mut MinoteConfig) {
    fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
        std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
    }

    // Application overrides
    if let Ok(val) = std::env::var("MINOTE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Service overrides
    if let Ok(val) = std::env::var("MINOTE_SERVICE_BASE_URL") {
        config.service.base_url = val;
    }
    if let Ok(val) = std::env::var("MINOTE_SERVICE_COOKIES") {
        config.service.cookies = secret_string(val);
    }
    if let Some(val) = parsed("MINOTE_SERVICE_TIMEOUT_SECONDS") {
        config.service.timeout_seconds = val;
    }

    // Export overrides
    if let Some(val) = parsed("MINOTE_EXPORT_CHUNK_SIZE") {
        config.export.chunk_size = val;
    }
    if let Ok(val) = std::env::var("MINOTE_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Some(val) = parsed("MINOTE_EXPORT_MAX_WORKERS") {
        config.export.max_workers = val;
    }
    if let Some(val) = parsed("MINOTE_EXPORT_MAX_RETRIES") {
        config.export.max_retries = val;
    }
    if let Some(val) = parsed("MINOTE_EXPORT_PAGE_SIZE") {
        config.export.page_size = val;
    }
    if let Some(val) = parsed("MINOTE_EXPORT_CREDENTIAL_CHECK_INTERVAL") {
        config.export.credential_check_interval = val;
    }
    if let Some(val) = parsed("MINOTE_EXPORT_PROGRESS_REPORT") {
        config.export.progress_report = val;
    }
    if let Some(val) = parsed("MINOTE_EXPORT_VERIFY_OUTPUT") {
        config.export.verify_output = val;
    }

    // Logging overrides
    if let Some(val) = parsed("MINOTE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val;
    }
    if let Ok(val) = std::env::var("MINOTE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MINOTE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
