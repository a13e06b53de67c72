//! Subcommand implementations.

pub mod init;
pub mod list;
pub mod play;
pub mod review;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use fermi_core::model::BankFormat;
use fermi_core::traits::QuestionSource;
use fermi_sources::config::load_config_from;
use fermi_sources::{create_source, FermiConfig, SourceConfig};

/// Load the config and build the question source, letting `--source` and
/// `--format` override the configured one.
pub(crate) fn resolve_source(
    source: Option<String>,
    format: &str,
    config_path: Option<PathBuf>,
) -> Result<(FermiConfig, Box<dyn QuestionSource>)> {
    let config = load_config_from(config_path.as_deref())?;
    let format: BankFormat = format
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let source_config = match (source, &config.source) {
        (Some(location), _) => SourceConfig::from_location(&location, format),
        (None, Some(configured)) => with_format(configured.clone(), format),
        (None, None) => anyhow::bail!(
            "no question source: pass --source or set [source] in fermi.toml"
        ),
    };

    let source = create_source(&source_config, &config)?;
    Ok((config, source))
}

/// An explicit `--format` wins over the configured one.
fn with_format(config: SourceConfig, format: BankFormat) -> SourceConfig {
    if format == BankFormat::Auto {
        return config;
    }
    match config {
        SourceConfig::Http { url, .. } => SourceConfig::Http { url, format },
        SourceConfig::File { path, .. } => SourceConfig::File { path, format },
    }
}
