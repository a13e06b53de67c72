//! Terminal output for a quiz session.

use std::io::{self, Write};

use fermi_core::evaluator::Feedback;
use fermi_core::quiz::{Quiz, QuizOutcome};
use fermi_core::session::SessionSummary;

pub fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Fermi estimation practice")?;
    writeln!(
        out,
        "Answer with a number (4500, 3e9, 10^6). Type 'skip' or 'quit' at any time."
    )?;
    writeln!(out)
}

pub fn question<W: Write>(out: &mut W, quiz: &Quiz) -> io::Result<()> {
    let Some(q) = quiz.current_question() else {
        return Ok(());
    };
    let (position, total) = quiz.position();
    match &q.source {
        Some(source) => writeln!(out, "Question {position}/{total} [{source}]")?,
        None => writeln!(out, "Question {position}/{total}")?,
    }
    writeln!(out, "  {}", q.text)?;
    write!(out, "> ")?;
    out.flush()
}

pub fn outcome<W: Write>(out: &mut W, quiz: &Quiz, outcome: &QuizOutcome) -> io::Result<()> {
    match outcome {
        QuizOutcome::Question { .. } => {
            writeln!(out)?;
            question(out, quiz)
        }
        QuizOutcome::Answered(eval) => {
            writeln!(
                out,
                "Your estimate is about 10^{}. {} {}",
                eval.user_order,
                tier_tag(eval.feedback),
                eval.message()
            )?;
            let summary = quiz.stats().summary();
            writeln!(
                out,
                "  Answered: {} | Average error: {} | Within one order: {}%",
                summary.answered,
                summary.average_error_display(),
                summary.accuracy_percent
            )?;
            write!(out, "Press Enter for the next question. ")?;
            out.flush()
        }
        QuizOutcome::Rejected(e) => {
            write!(out, "Invalid answer: {e}. Try again.\n> ")?;
            out.flush()
        }
        QuizOutcome::Finished(summary) => finished(out, summary),
        QuizOutcome::Disabled(reason) => disabled(out, reason),
        QuizOutcome::Ignored => {
            write!(out, "Type a number, 'skip' or 'quit'.\n> ")?;
            out.flush()
        }
    }
}

fn tier_tag(feedback: Feedback) -> String {
    format!("[{}]", feedback.label().to_uppercase())
}

pub fn finished<W: Write>(out: &mut W, summary: &SessionSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Session complete.")?;
    writeln!(out, "  Answered: {}", summary.answered)?;
    writeln!(out, "  Average error: {}", summary.average_error_display())?;
    writeln!(out, "  Within one order: {}%", summary.accuracy_percent)
}

pub fn disabled<W: Write>(out: &mut W, reason: &str) -> io::Result<()> {
    writeln!(out, "Could not load questions: {reason}")?;
    writeln!(out, "Input is disabled. Fix the question source and start again.")
}
