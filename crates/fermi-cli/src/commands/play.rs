//! The `fermi play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use fermi_core::loader::load_questions;
use fermi_core::quiz::{Quiz, QuizEvent};
use fermi_core::report::SessionReport;

use crate::render;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    source: Option<String>,
    format: String,
    no_shuffle: bool,
    seed: Option<u64>,
    limit: Option<usize>,
    save: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (mut config, source) = super::resolve_source(source, &format, config_path)?;
    if no_shuffle {
        config.shuffle = false;
    }
    if limit.is_some() {
        config.limit = limit;
    }

    let location = source.location();
    let mut quiz = match load_questions(&*source, &config.load_options(seed)).await {
        Ok(bank) => Quiz::new(bank),
        Err(e) => {
            tracing::error!("{e:#}");
            Quiz::disabled(format!("{e:#}"))
        }
    };

    let started_at = Utc::now();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(&mut quiz, stdin.lock(), &mut stdout)?;

    if let Some(dir) = save {
        if quiz.disabled_reason().is_none() {
            let report = SessionReport::from_quiz(&quiz, location, started_at);
            let timestamp = started_at.format("%Y-%m-%dT%H%M%S");
            let path = dir.join(format!("session-{timestamp}.json"));
            report.save_json(&path)?;
            eprintln!("Session saved to: {}", path.display());
        }
    }

    Ok(())
}

/// Drive `quiz` from lines of `input` until it finishes or input runs out.
pub fn run_session<R: BufRead, W: Write>(quiz: &mut Quiz, input: R, out: &mut W) -> Result<()> {
    if let Some(reason) = quiz.disabled_reason() {
        render::disabled(out, reason)?;
        return Ok(());
    }

    render::banner(out)?;
    render::question(out, quiz)?;

    for line in input.lines() {
        let line = line?;
        let outcome = quiz.dispatch(to_event(quiz, &line));
        render::outcome(out, quiz, &outcome)?;
        if quiz.is_finished() {
            return Ok(());
        }
    }

    // Input closed mid-session.
    let outcome = quiz.dispatch(QuizEvent::Quit);
    render::outcome(out, quiz, &outcome)?;
    Ok(())
}

/// Map a line typed at the prompt to a quiz event.
fn to_event(quiz: &Quiz, line: &str) -> QuizEvent {
    let command = line.trim().to_lowercase();
    match command.as_str() {
        "quit" | "q" | "exit" => QuizEvent::Quit,
        "skip" | "s" => QuizEvent::Skip,
        _ if !quiz.is_awaiting_answer() => QuizEvent::Next,
        "next" | "n" => QuizEvent::Next,
        _ => QuizEvent::Submit(line.to_string()),
    }
}
