//! Question banks on the local filesystem.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::instrument;

use fermi_core::model::{BankFormat, QuestionBank};
use fermi_core::parser::{format_for_path, load_bank_directory, parse_bank_str};
use fermi_core::traits::QuestionSource;

use crate::error::SourceError;

/// Reads a bank file, or every bank file under a directory.
pub struct FileSource {
    path: PathBuf,
    format: BankFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: BankFormat::Auto,
        }
    }

    /// Override the format implied by the file extension.
    pub fn format(mut self, format: BankFormat) -> Self {
        self.format = format;
        self
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> anyhow::Result<QuestionBank> {
        if self.path.is_dir() {
            return load_bank_directory(&self.path, self.format);
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Read {
                path: self.location(),
                message: e.to_string(),
            })?;

        let format = match self.format {
            BankFormat::Auto => format_for_path(&self.path),
            explicit => explicit,
        };
        Ok(parse_bank_str(&content, format, &self.location())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        std::fs::write(
            &path,
            r#"[{"text": "Seconds in a year", "correctOrder": 7}]"#,
        )
        .unwrap();

        let bank = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(bank.len(), 1);
    }

    #[tokio::test]
    async fn format_override_beats_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.txt");
        std::fs::write(&path, "var q = [{ q: 'Cells in a body', a: 13 }];").unwrap();

        let bank = FileSource::new(&path)
            .format(BankFormat::Script)
            .fetch()
            .await
            .unwrap();
        assert_eq!(bank.questions[0].correct_order, 13);
    }

    #[tokio::test]
    async fn reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            r#"[{"text": "A", "correctOrder": 1}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("b.toml"),
            "[[questions]]\ntext = \"B\"\norder = 2\n",
        )
        .unwrap();

        let bank = FileSource::new(dir.path()).fetch().await.unwrap();
        assert_eq!(bank.len(), 2);
    }

    #[tokio::test]
    async fn directory_honors_format_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("bank.json"),
            "window.QUESTIONS = [{ text: 'Seconds in a year', correctOrder: 7 }];",
        )
        .unwrap();

        assert!(FileSource::new(dir.path()).fetch().await.is_err());

        let bank = FileSource::new(dir.path())
            .format(BankFormat::Script)
            .fetch()
            .await
            .unwrap();
        assert_eq!(bank.questions[0].correct_order, 7);
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let err = FileSource::new("/nonexistent/bank.json")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::Read { .. })
        ));
    }
}
