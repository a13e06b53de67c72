//! Quiz configuration and source factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fermi_core::loader::LoadOptions;
use fermi_core::model::BankFormat;
use fermi_core::traits::QuestionSource;

use crate::file::FileSource;
use crate::http::HttpSource;

/// Where the question bank lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Http {
        url: String,
        #[serde(default)]
        format: BankFormat,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        format: BankFormat,
    },
}

impl SourceConfig {
    /// Build a source config from a URL or a path.
    pub fn from_location(location: &str, format: BankFormat) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            SourceConfig::Http {
                url: location.to_string(),
                format,
            }
        } else {
            SourceConfig::File {
                path: PathBuf::from(location),
                format,
            }
        }
    }

    pub fn location(&self) -> String {
        match self {
            SourceConfig::Http { url, .. } => url.clone(),
            SourceConfig::File { path, .. } => path.display().to_string(),
        }
    }
}

/// Top-level fermi-quiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FermiConfig {
    /// Default question source.
    #[serde(default)]
    pub source: Option<SourceConfig>,
    /// Randomize question order.
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    /// Max questions per session.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Retries on transient fetch failures.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Delay between retries in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_shuffle() -> bool {
    true
}
fn default_retries() -> u32 {
    2
}
fn default_retry_delay() -> u64 {
    500
}
fn default_timeout() -> u64 {
    10
}

impl Default for FermiConfig {
    fn default() -> Self {
        Self {
            source: None,
            shuffle: default_shuffle(),
            limit: None,
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
            timeout_secs: default_timeout(),
        }
    }
}

impl FermiConfig {
    pub fn load_options(&self, seed: Option<u64>) -> LoadOptions {
        LoadOptions {
            shuffle: self.shuffle,
            seed,
            limit: self.limit,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Http { url, format } => SourceConfig::Http {
            url: resolve_env_vars(url),
            format: *format,
        },
        SourceConfig::File { path, format } => SourceConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
            format: *format,
        },
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `fermi.toml` in the current directory
/// 2. `~/.config/fermi/config.toml`
///
/// `FERMI_BANK_URL` overrides the configured source.
pub fn load_config_from(path: Option<&Path>) -> Result<FermiConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("fermi.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<FermiConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => FermiConfig::default(),
    };

    if let Ok(url) = std::env::var("FERMI_BANK_URL") {
        if !url.is_empty() {
            config.source = Some(SourceConfig::from_location(&url, BankFormat::Auto));
        }
    }

    config.source = config.source.as_ref().map(resolve_source_config);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("fermi"))
}

/// Create a source instance from its configuration.
pub fn create_source(
    source: &SourceConfig,
    config: &FermiConfig,
) -> Result<Box<dyn QuestionSource>> {
    match source {
        SourceConfig::Http { url, format } => {
            anyhow::ensure!(!url.is_empty(), "source URL is empty");
            let http = HttpSource::with_timeout(url, config.timeout_secs)?
                .format(*format)
                .retries(
                    config.max_retries,
                    Duration::from_millis(config.retry_delay_ms),
                );
            Ok(Box::new(http))
        }
        SourceConfig::File { path, format } => {
            Ok(Box::new(FileSource::new(path.clone()).format(*format)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_FERMI_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_FERMI_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("https://${_FERMI_TEST_VAR}/bank.json"),
            "https://hello/bank.json"
        );
        std::env::remove_var("_FERMI_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = FermiConfig::default();
        assert!(config.source.is_none());
        assert!(config.shuffle);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn parse_http_source_config() {
        let toml_str = r#"
shuffle = false
limit = 20
max_retries = 1

[source]
type = "http"
url = "https://example.com/questions.js"
format = "script"
"#;
        let config: FermiConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.shuffle);
        assert_eq!(config.limit, Some(20));
        assert_eq!(
            config.source,
            Some(SourceConfig::Http {
                url: "https://example.com/questions.js".into(),
                format: BankFormat::Script,
            })
        );
    }

    #[test]
    fn parse_file_source_config() {
        let toml_str = r#"
[source]
type = "file"
path = "question-banks/classics.json"
"#;
        let config: FermiConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.source,
            Some(SourceConfig::File {
                format: BankFormat::Auto,
                ..
            })
        ));
        assert_eq!(config.retry_delay_ms, 500);
    }

    #[test]
    fn location_detection() {
        assert!(matches!(
            SourceConfig::from_location("https://x.org/q.json", BankFormat::Auto),
            SourceConfig::Http { .. }
        ));
        assert!(matches!(
            SourceConfig::from_location("banks/q.json", BankFormat::Json),
            SourceConfig::File {
                format: BankFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn load_explicit_missing_config_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/fermi.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fermi.toml");
        std::fs::write(&path, "limit = 5\n[source]\ntype = \"file\"\npath = \"bank.json\"\n")
            .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.limit, Some(5));
        assert_eq!(config.load_options(Some(3)).seed, Some(3));
    }

    #[test]
    fn create_sources() {
        let config = FermiConfig::default();
        let http = create_source(
            &SourceConfig::from_location("https://example.com/q.json", BankFormat::Auto),
            &config,
        )
        .unwrap();
        assert_eq!(http.name(), "http");

        let file = create_source(
            &SourceConfig::from_location("bank.json", BankFormat::Auto),
            &config,
        )
        .unwrap();
        assert_eq!(file.name(), "file");
        assert_eq!(file.location(), "bank.json");
    }
}
