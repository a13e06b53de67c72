//! The question source trait.
//!
//! Implemented by the `fermi-sources` crate for HTTP, local files and
//! in-memory banks.

use async_trait::async_trait;

use crate::model::QuestionBank;

/// Anything that can produce a question bank.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Short source kind (e.g. "http").
    fn name(&self) -> &str;

    /// Where the questions come from, for messages and reports.
    fn location(&self) -> String;

    /// Fetch and parse the bank. Fails if nothing usable could be loaded.
    async fn fetch(&self) -> anyhow::Result<QuestionBank>;
}
