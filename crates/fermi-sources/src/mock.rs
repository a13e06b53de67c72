//! In-memory source for testing.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use fermi_core::model::{Question, QuestionBank};
use fermi_core::traits::QuestionSource;

/// A source that serves a fixed bank, or always fails.
///
/// Lets front ends be tested without a network or filesystem.
pub struct StaticSource {
    bank: Result<QuestionBank, String>,
    call_count: AtomicU32,
}

impl StaticSource {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            bank: Ok(QuestionBank::new(questions)),
            call_count: AtomicU32::new(0),
        }
    }

    /// A source whose every fetch fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            bank: Err(message.to_string()),
            call_count: AtomicU32::new(0),
        }
    }

    /// Number of fetches made so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn fetch(&self) -> anyhow::Result<QuestionBank> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match &self.bank {
            Ok(bank) => Ok(bank.clone()),
            Err(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}
