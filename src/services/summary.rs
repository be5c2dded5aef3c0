use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::{SummaryEnvelope, SummaryRecord};

/// Why a summary load produced no record.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Summary request failed: {0}")]
    Transport(String),

    #[error("Summary API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Summary API reported failure")]
    Rejected,

    #[error("Failed to parse summary response: {0}")]
    Decode(String),
}

/// Where a dashboard view gets its summary from.
#[async_trait]
pub trait SummarySource: Send + Sync {
    async fn fetch_summary(&self) -> Result<SummaryRecord, LoadError>;
}

#[derive(Clone)]
pub struct SummaryClient {
    client: Client,
    url: String,
    token: Option<String>,
}

impl SummaryClient {
    pub fn new(url: &str, token: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
            token: token.map(|t| t.to_string()),
        }
    }
}

#[async_trait]
impl SummarySource for SummaryClient {
    async fn fetch_summary(&self) -> Result<SummaryRecord, LoadError> {
        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LoadError::Status { status, body });
        }

        let envelope: SummaryEnvelope = response
            .json()
            .await
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        envelope.into_record().ok_or(LoadError::Rejected)
    }
}
