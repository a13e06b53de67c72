//! The `fermi list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

pub async fn execute(
    source: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, source) = super::resolve_source(source, &format, config_path)?;
    let bank = source.fetch().await?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Answer", "Source"]);

    for (i, q) in bank.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&q.text),
            Cell::new(format!("10^{}", q.correct_order)),
            Cell::new(q.source.as_deref().unwrap_or("-")),
        ]);
    }

    println!("{table}");
    println!("{} questions from {}", bank.len(), source.location());
    Ok(())
}
