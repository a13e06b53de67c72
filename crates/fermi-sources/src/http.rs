//! Remote question bank over HTTP.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use fermi_core::model::{BankFormat, QuestionBank};
use fermi_core::parser::{format_for_path, parse_bank_str};
use fermi_core::traits::QuestionSource;

use crate::error::SourceError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Fetches a bank with a GET request.
pub struct HttpSource {
    url: String,
    format: BankFormat,
    client: reqwest::Client,
    timeout_secs: u64,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpSource {
    pub fn new(url: &str) -> Result<Self, SourceError> {
        Self::with_timeout(url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(url: &str, timeout_secs: u64) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SourceError::NetworkError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.to_string(),
            format: BankFormat::Auto,
            client,
            timeout_secs,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    pub fn format(mut self, format: BankFormat) -> Self {
        self.format = format;
        self
    }

    pub fn retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// The explicit format, or the one implied by the URL path extension.
    fn payload_format(&self) -> BankFormat {
        match self.format {
            BankFormat::Auto => reqwest::Url::parse(&self.url)
                .map(|url| format_for_path(Path::new(url.path())))
                .unwrap_or(BankFormat::Auto),
            explicit => explicit,
        }
    }

    async fn fetch_once(&self) -> Result<String, SourceError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                SourceError::NetworkError(format!("could not connect to {}", self.url))
            } else {
                SourceError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(SourceError::NotFound(self.url.clone()));
        }
        if status >= 400 {
            return Err(SourceError::Status {
                status,
                url: self.url.clone(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::NetworkError(format!("failed to read response body: {e}")))
    }

    /// Fetch the raw payload, retrying transient failures.
    async fn fetch_with_retries(&self) -> Result<String, SourceError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_permanent() || attempt >= self.max_retries => return Err(e),
                Err(e) => {
                    attempt += 1;
                    tracing::warn!(
                        url = %self.url,
                        attempt,
                        max_retries = self.max_retries,
                        "fetch failed ({e}), retrying in {}ms",
                        self.retry_delay.as_millis()
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn location(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> anyhow::Result<QuestionBank> {
        let body = self.fetch_with_retries().await?;
        let bank = parse_bank_str(&body, self.payload_format(), &self.url)?;
        Ok(bank)
    }
}
