use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::DeskConfig;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "desk.toml";

/// Environment variable that overrides `api.base_url`
pub const API_URL_ENV: &str = "TICKET_DESK_API_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load the config. An explicit path must exist; otherwise `./desk.toml`
/// is used when present and defaults when not.
pub fn load_config(explicit: Option<&Path>) -> Result<DeskConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                read_config(path)
            } else {
                Ok(DeskConfig::default())
            }
        }
    }
}

pub fn read_config(path: &Path) -> Result<DeskConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn parse_config(text: &str) -> Result<DeskConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Apply the base URL overrides: the env var beats the file, the
/// command-line flag beats both.
pub fn apply_overrides(config: &mut DeskConfig, env_url: Option<String>, flag_url: Option<&str>) {
    if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url;
    }
    if let Some(url) = flag_url {
        config.api.base_url = url.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.intake.debounce_ms, 1000);
        assert_eq!(config.intake.min_classify_chars, 20);
        assert_eq!(config.intake.notice_ms, 3000);
        assert_eq!(config.log.level, "info");
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r##"[api]
base_url = "https://desk.example.com/api"

[intake]
debounce_ms = 250

[ui]
colors = { highlight = "#FB4196" }
"##,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://desk.example.com/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.intake.debounce_ms, 250);
        assert_eq!(config.intake.notice_ms, 3000);
        assert_eq!(config.ui.colors.get("highlight").map(String::as_str), Some("#FB4196"));
    }

    #[test]
    fn test_read_config_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("desk.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\nfile = \"td.log\"\n").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file.as_deref(), Some("td.log"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.toml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("desk.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_override_precedence() {
        let mut config = DeskConfig::default();
        apply_overrides(&mut config, Some("http://env:1/api".into()), None);
        assert_eq!(config.api.base_url, "http://env:1/api");

        apply_overrides(&mut config, Some("http://env:1/api".into()), Some("http://flag:2/api"));
        assert_eq!(config.api.base_url, "http://flag:2/api");

        let mut config = DeskConfig::default();
        apply_overrides(&mut config, Some("  ".into()), None);
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }
}
