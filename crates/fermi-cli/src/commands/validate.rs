//! The `fermi validate` command.

use std::path::PathBuf;

use anyhow::Result;

use fermi_core::parser::validate_bank;

pub async fn execute(
    source: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, source) = super::resolve_source(source, &format, config_path)?;
    let bank = source.fetch().await?;

    println!(
        "Question bank: {} ({} questions)",
        source.location(),
        bank.len()
    );
    for (name, count) in bank.sources() {
        println!("  {name}: {count}");
    }

    let warnings = validate_bank(&bank);
    for w in &warnings {
        let prefix = w
            .index
            .map(|i| format!("  [#{}]", i + 1))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
