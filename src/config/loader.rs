//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::UpstreamError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] rustls::Error),

    #[error("Invalid upstream `{upstream}`: {source}")]
    Upstream {
        upstream: String,
        #[source]
        source: UpstreamError,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    let config: ProxyConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:8088"

            [[routes]]
            name = "api"
            local_path = "/api"
            upstream = "http://127.0.0.1:3000/v1"

            [[routes]]
            local_path = "/static"
            upstream = "http://127.0.0.1:3001"

            [timeouts]
            connect_secs = 2
            request_secs = 10

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:8088");
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].name, "api");
        assert_eq!(config.routes[1].name, "");
        assert_eq!(config.timeouts.connect_secs, 2);
        assert_eq!(config.timeouts.request_secs, 10);
        assert_eq!(config.timeouts.idle_secs, 60);
        assert_eq!(config.observability.log_level, "debug");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_config("[[routes]\nlocal_path = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_required_field() {
        let err = parse_config("[[routes]]\nlocal_path = \"/api\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_config(
            "[[routes]]\nlocal_path = \"/api\"\nupstream = \"nope\"\n",
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().starts_with("Validation failed: route `#0`"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
