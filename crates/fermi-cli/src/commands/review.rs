//! The `fermi review` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use fermi_core::report::{AnswerOutcome, SessionReport};

pub fn execute(report_path: PathBuf) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;

    println!("Session {}", report.id);
    println!("  Source: {}", report.source);
    println!(
        "  Played: {} ({}s)",
        report.started_at.format("%Y-%m-%d %H:%M"),
        (report.finished_at - report.started_at).num_seconds()
    );

    let mut table = Table::new();
    table.set_header(vec!["Question", "Estimate", "Yours", "Correct", "Result"]);

    for answer in &report.answers {
        let (estimate, yours, result) = match &answer.outcome {
            AnswerOutcome::Answered { input, evaluation } => (
                input.clone(),
                format!("10^{}", evaluation.user_order),
                evaluation.feedback.label().to_string(),
            ),
            AnswerOutcome::Skipped => ("-".into(), "-".into(), "skipped".into()),
        };
        table.add_row(vec![
            Cell::new(&answer.question),
            Cell::new(estimate),
            Cell::new(yours),
            Cell::new(format!("10^{}", answer.correct_order)),
            Cell::new(result),
        ]);
    }
    println!("\n{table}");

    let counts = report.feedback_counts();
    let tiers: Vec<String> = ["exact", "close", "ballpark", "off"]
        .iter()
        .map(|tier| format!("{tier} {}", counts.get(tier).copied().unwrap_or(0)))
        .collect();

    println!();
    println!("Answered: {}", report.summary.answered);
    println!("Skipped: {}", report.skipped());
    println!(
        "Average error: {}",
        report.summary.average_error_display()
    );
    println!("Within one order: {}%", report.summary.accuracy_percent);
    println!("Tiers: {}", tiers.join(", "));

    let misses: Vec<_> = report.misses().collect();
    if !misses.is_empty() {
        println!("\nMissed by more than two orders:");
        for miss in misses {
            if let Some(evaluation) = miss.evaluation() {
                println!(
                    "  {} (you: 10^{}, answer: 10^{})",
                    miss.question, evaluation.user_order, miss.correct_order
                );
            }
        }
    }

    Ok(())
}
