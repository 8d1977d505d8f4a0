//! Question providers.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

use crate::models::{Category, Difficulty, RawQuestion};

use super::error::LoadError;

pub const OPEN_TDB_URL: &str = "https://opentdb.com/api.php";

/// Parameters of a question fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionRequest {
    pub amount: usize,
    pub category: Category,
    pub difficulty: Difficulty,
}

/// Anything that can hand out a batch of raw trivia records.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch(&self, request: &QuestionRequest) -> Result<Vec<RawQuestion>, LoadError>;
}

/// Envelope used by the Open Trivia DB API.
#[derive(Debug, Deserialize)]
pub(crate) struct ProviderResponse {
    pub response_code: u8,
    pub results: Vec<RawQuestion>,
}

impl ProviderResponse {
    pub(crate) fn into_results(self) -> Result<Vec<RawQuestion>, LoadError> {
        if self.response_code != 0 {
            return Err(LoadError::Provider(self.response_code));
        }
        Ok(self.results)
    }
}

/// Fetches multiple-choice questions over HTTP.
#[derive(Clone)]
pub struct OpenTdbSource {
    client: Client,
    base_url: String,
}

impl OpenTdbSource {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(OPEN_TDB_URL)
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for OpenTdbSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch(&self, request: &QuestionRequest) -> Result<Vec<RawQuestion>, LoadError> {
        info!(
            "Fetching {} {} questions in category {}",
            request.amount,
            request.difficulty.as_str(),
            request.category.code()
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("amount", request.amount.to_string()),
                ("type", "multiple".to_string()),
                ("category", request.category.code().to_string()),
                ("difficulty", request.difficulty.as_str().to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LoadError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let envelope: ProviderResponse = serde_json::from_str(&body)?;
        let results = envelope.into_results()?;
        debug!("Provider returned {} records", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_response_code() {
        let ok: ProviderResponse = serde_json::from_str(
            r#"{"response_code":0,"results":[{"type":"multiple","difficulty":"easy","category":"Science","question":"Q?","correct_answer":"a","incorrect_answers":["b","c","d"]}]}"#,
        )
        .unwrap();
        let results = ok.into_results().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].correct_answer.as_deref(), Some("a"));

        let rejected: ProviderResponse =
            serde_json::from_str(r#"{"response_code":1,"results":[]}"#).unwrap();
        assert!(matches!(rejected.into_results(), Err(LoadError::Provider(1))));
    }
}
