//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Overrides the backend URL from the environment.
pub const ENV_BACKEND_URL: &str = "GATEWAY_BACKEND_URL";
/// Overrides the listener bind address from the environment.
pub const ENV_BIND_ADDRESS: &str = "GATEWAY_BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the startup configuration: file (or defaults), then environment overrides,
/// then validation.
pub fn resolve_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply overrides looked up by environment key.
pub fn apply_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
        config.backend.url = url;
    }
    if let Some(addr) = lookup(ENV_BIND_ADDRESS).filter(|v| !v.trim().is_empty()) {
        config.listener.bind_address = addr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("chat-gateway-{}.toml", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        let path = write_temp(
            r#"
            [listener]
            bind_address = "127.0.0.1:4000"

            [backend]
            url = "http://rasa.internal:5005/webhooks/rest/webhook"
            timeout_ms = 2500
            "#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
        assert_eq!(config.backend.timeout_ms, 2500);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let path = write_temp("[backend]\ntimeout_ms = 0\n");

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors == &vec![ValidationError::Timeout]));
        assert!(err.to_string().contains("backend.timeout_ms"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/gateway.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_config_parse_error() {
        let path = write_temp("[backend\nurl = ");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = GatewayConfig::default();
        apply_overrides(&mut config, |key| match key {
            ENV_BACKEND_URL => Some("http://10.0.0.5:5005/webhooks/rest/webhook".into()),
            ENV_BIND_ADDRESS => Some("  ".into()),
            _ => None,
        });

        assert_eq!(config.backend.url, "http://10.0.0.5:5005/webhooks/rest/webhook");
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
    }
}
