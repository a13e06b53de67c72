//! Core data model types for fermi-quiz.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single estimation question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question shown to the user.
    pub text: String,
    /// Correct answer as an exponent of ten.
    pub correct_order: i32,
    /// Group the question came from, for banks keyed by source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Question {
    pub fn new(text: impl Into<String>, correct_order: i32) -> Self {
        Self {
            text: text.into(),
            correct_order,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A flat, ordered list of questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Shuffle the question order in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions.shuffle(rng);
    }

    /// Keep at most `limit` questions.
    pub fn truncate(&mut self, limit: usize) {
        self.questions.truncate(limit);
    }

    /// Question counts per source group. Ungrouped questions are not counted.
    pub fn sources(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for q in &self.questions {
            if let Some(source) = &q.source {
                *counts.entry(source.clone()).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Wire format of a question bank payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankFormat {
    /// Detect from the payload contents.
    #[default]
    Auto,
    /// A JSON array, or a JSON object keyed by source.
    Json,
    /// JavaScript text assigning the bank to a variable.
    Script,
    /// A TOML file with `[[questions]]` tables.
    Toml,
}

impl fmt::Display for BankFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankFormat::Auto => write!(f, "auto"),
            BankFormat::Json => write!(f, "json"),
            BankFormat::Script => write!(f, "script"),
            BankFormat::Toml => write!(f, "toml"),
        }
    }
}

impl FromStr for BankFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(BankFormat::Auto),
            "json" => Ok(BankFormat::Json),
            "script" | "js" | "javascript" => Ok(BankFormat::Script),
            "toml" => Ok(BankFormat::Toml),
            other => Err(format!("unknown bank format: {other}")),
        }
    }
}
