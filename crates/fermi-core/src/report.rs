//! Session report types with JSON persistence.
//!
//! A report is only written when the user asks for one; the quiz itself
//! keeps nothing between runs.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluator::{Evaluation, Feedback};
use crate::model::Question;
use crate::quiz::Quiz;
use crate::session::SessionSummary;

/// What happened to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnswerOutcome {
    Answered {
        /// The text as typed.
        input: String,
        evaluation: Evaluation,
    },
    Skipped,
}

/// One row of the session transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub correct_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub outcome: AnswerOutcome,
}

impl AnswerRecord {
    pub fn new(question: &Question, outcome: AnswerOutcome) -> Self {
        Self {
            question: question.text.clone(),
            correct_order: question.correct_order,
            source: question.source.clone(),
            outcome,
        }
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        match &self.outcome {
            AnswerOutcome::Answered { evaluation, .. } => Some(evaluation),
            AnswerOutcome::Skipped => None,
        }
    }
}

/// A finished quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique session identifier.
    pub id: Uuid,
    /// Where the questions came from (URL or path).
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Every question shown, in order.
    pub answers: Vec<AnswerRecord>,
    pub summary: SessionSummary,
}

impl SessionReport {
    pub fn from_quiz(quiz: &Quiz, source: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            started_at,
            finished_at: Utc::now(),
            answers: quiz.history().to_vec(),
            summary: quiz.stats().summary(),
        }
    }

    /// How many answers landed in each feedback tier.
    pub fn feedback_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for feedback in self
            .answers
            .iter()
            .filter_map(|a| a.evaluation())
            .map(|e| e.feedback)
        {
            *counts.entry(feedback.label()).or_insert(0) += 1;
        }
        counts
    }

    pub fn skipped(&self) -> usize {
        self.answers
            .iter()
            .filter(|a| a.outcome == AnswerOutcome::Skipped)
            .count()
    }

    /// Answers that missed by more than two orders.
    pub fn misses(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.answers
            .iter()
            .filter(|a| a.evaluation().is_some_and(|e| e.feedback == Feedback::Off))
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
