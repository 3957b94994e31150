//! Optional config file loading. Search order: ./codernet-mirror.toml, then
//! $XDG_CONFIG_HOME/codernet-mirror/config.toml (or ~/.config/codernet-mirror/config.toml).

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Catalog root. Entry and document URLs are appended to it verbatim.
    pub base_url: Option<String>,
    /// Default destination offered by the prompt (instead of the executable's directory).
    pub output_dir: Option<PathBuf>,
    /// HTTP User-Agent header. None sends no User-Agent.
    pub user_agent: Option<String>,
    /// Request timeout in seconds. None keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
}

/// Why a present config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("Cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Candidate config files, highest priority first.
fn candidate_paths() -> Result<Vec<PathBuf>, ConfigError> {
    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    let mut paths = vec![cwd.join("codernet-mirror.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("codernet-mirror").join("config.toml"));
    }
    Ok(paths)
}

/// Parse the first candidate that exists. Later candidates are not consulted, even if
/// the first one is invalid.
fn load_first(paths: &[PathBuf]) -> Result<Option<Config>, ConfigError> {
    let Some(path) = paths.iter().find(|p| p.exists()) else {
        return Ok(None);
    };
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        source: e,
    })?;
    toml::from_str::<Config>(&text)
        .map(Some)
        .map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })
}

/// Search order: (1) ./codernet-mirror.toml, (2) <config dir>/codernet-mirror/config.toml.
/// No file found is `Ok(None)`.
pub fn load_config() -> Result<Option<Config>, ConfigError> {
    load_first(&candidate_paths()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let c: Config = toml::from_str("").unwrap();
        assert!(c.base_url.is_none());
        assert!(c.output_dir.is_none());
        assert!(c.user_agent.is_none());
        assert!(c.timeout_secs.is_none());
    }

    #[test]
    fn parse_full_config() {
        let s = r#"
            base_url = "https://mirror.example/media/"
            output_dir = "books"
            user_agent = "Custom/1.0"
            timeout_secs = 120
        "#;
        let c: Config = toml::from_str(s).unwrap();
        assert_eq!(c.base_url.as_deref(), Some("https://mirror.example/media/"));
        assert_eq!(c.output_dir.as_deref(), Some(std::path::Path::new("books")));
        assert_eq!(c.user_agent.as_deref(), Some("Custom/1.0"));
        assert_eq!(c.timeout_secs, Some(120));
    }

    #[test]
    fn parse_partial_config() {
        let c: Config = toml::from_str("timeout_secs = 5").unwrap();
        assert!(c.base_url.is_none());
        assert_eq!(c.timeout_secs, Some(5));
    }

    #[test]
    fn load_first_without_any_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().join("a.toml"), dir.path().join("b.toml")];
        assert!(load_first(&paths).unwrap().is_none());
    }

    #[test]
    fn load_first_prefers_earlier_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "timeout_secs = 1").unwrap();
        std::fs::write(&second, "timeout_secs = 2").unwrap();
        let c = load_first(&[first, second]).unwrap().unwrap();
        assert_eq!(c.timeout_secs, Some(1));
    }

    #[test]
    fn load_first_skips_missing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("second.toml");
        std::fs::write(&second, "base_url = \"http://x/\"").unwrap();
        let c = load_first(&[dir.path().join("missing.toml"), second])
            .unwrap()
            .unwrap();
        assert_eq!(c.base_url.as_deref(), Some("http://x/"));
    }

    #[test]
    fn load_first_reports_parse_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "output_dir = [").unwrap();
        match load_first(&[bad.clone()]) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, bad),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_toml_errors() {
        assert!(toml::from_str::<Config>("output_dir = [").is_err());
        assert!(toml::from_str::<Config>("timeout_secs = \"soon\"").is_err());
    }
}
