//! Loading a bank from a source and preparing it for a session.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::BankError;
use crate::model::QuestionBank;
use crate::traits::QuestionSource;

/// How to prepare a freshly loaded bank.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Randomize question order.
    pub shuffle: bool,
    /// Fixed seed for a reproducible shuffle.
    pub seed: Option<u64>,
    /// Keep at most this many questions.
    pub limit: Option<usize>,
}

/// Fetch a bank from `source`, then shuffle and truncate it.
pub async fn load_questions(
    source: &dyn QuestionSource,
    options: &LoadOptions,
) -> Result<QuestionBank> {
    let location = source.location();
    let mut bank = source
        .fetch()
        .await
        .with_context(|| format!("failed to load questions from {location}"))?;

    prepare(&mut bank, options);

    if bank.is_empty() {
        return Err(BankError::Empty(location).into());
    }

    tracing::info!(
        source = source.name(),
        %location,
        count = bank.len(),
        "question bank loaded"
    );
    Ok(bank)
}

/// Apply shuffle and limit.
pub fn prepare(bank: &mut QuestionBank, options: &LoadOptions) {
    if options.shuffle {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        bank.shuffle(&mut rng);
    }
    if let Some(limit) = options.limit {
        bank.truncate(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use async_trait::async_trait;

    struct FixedSource(Vec<Question>);

    #[async_trait]
    impl QuestionSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        fn location(&self) -> String {
            "memory".into()
        }

        async fn fetch(&self) -> anyhow::Result<QuestionBank> {
            Ok(QuestionBank::new(self.0.clone()))
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl QuestionSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        fn location(&self) -> String {
            "nowhere".into()
        }

        async fn fetch(&self) -> anyhow::Result<QuestionBank> {
            anyhow::bail!("connection refused")
        }
    }

    fn questions(n: i32) -> Vec<Question> {
        (0..n).map(|i| Question::new(format!("Q{i}"), i)).collect()
    }

    #[tokio::test]
    async fn load_keeps_order_without_shuffle() {
        let bank = load_questions(&FixedSource(questions(5)), &LoadOptions::default())
            .await
            .unwrap();
        let orders: Vec<i32> = bank.iter().map(|q| q.correct_order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn seeded_shuffle_is_reproducible() {
        let options = LoadOptions {
            shuffle: true,
            seed: Some(42),
            limit: None,
        };
        let a = load_questions(&FixedSource(questions(20)), &options)
            .await
            .unwrap();
        let b = load_questions(&FixedSource(questions(20)), &options)
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[tokio::test]
    async fn limit_truncates() {
        let options = LoadOptions {
            limit: Some(3),
            ..Default::default()
        };
        let bank = load_questions(&FixedSource(questions(10)), &options)
            .await
            .unwrap();
        assert_eq!(bank.len(), 3);
    }

    #[tokio::test]
    async fn zero_limit_is_empty_error() {
        let options = LoadOptions {
            limit: Some(0),
            ..Default::default()
        };
        let err = load_questions(&FixedSource(questions(4)), &options)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no valid questions"));
    }

    #[tokio::test]
    async fn fetch_failure_names_location() {
        let err = load_questions(&BrokenSource, &LoadOptions::default())
            .await
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("nowhere"));
        assert!(message.contains("connection refused"));
    }
}
