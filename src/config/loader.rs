//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
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

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;
    use std::io::Write;

    const SAMPLE: &str = r#"
[server]
bind_address = "127.0.0.1:9000"

[logging]
format = "json"

[routes]
middleware = ["trace"]

[[routes.routes]]
method = "GET"
path = ""
handler = "hello"

[[routes.groups]]
prefix = "/api"
middleware = ["recover"]

[[routes.groups.routes]]
method = "POST"
path = "/echo"
handler = "echo"
"#;

    #[test]
    fn test_parse_nested_tree() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:9000");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.routes.middleware, vec!["trace"]);
        assert_eq!(config.routes.routes[0].handler, "hello");
        assert_eq!(config.routes.groups[0].prefix, "/api");
        assert_eq!(config.routes.groups[0].routes[0].path, "/echo");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert!(config.routes.routes.is_empty());
    }

    #[test]
    fn test_validation_error_surfaces() {
        let err = parse_config("[server]\nrequest_timeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 1));
        assert_eq!(
            err.to_string(),
            "Validation failed: server.request_timeout_secs must be greater than zero"
        );
    }

    #[test]
    fn test_parse_error_surfaces() {
        assert!(matches!(parse_config("[server"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.routes.groups.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
