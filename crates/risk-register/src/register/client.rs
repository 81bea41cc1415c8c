use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::domain::{RiskId, RiskRecord, RiskSubmission};

/// Remote risk register consumed by the client core.
#[async_trait]
pub trait RiskApi: Send + Sync {
    async fn list_risks(&self) -> Result<Vec<RiskRecord>, ApiError>;
    async fn fetch_risk(&self, id: RiskId) -> Result<RiskRecord, ApiError>;
    async fn create_risk(&self, submission: &RiskSubmission) -> Result<RiskRecord, ApiError>;
    async fn delete_risk(&self, id: RiskId) -> Result<(), ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to risk register failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("risk register answered {status} for {url}")]
    Status { status: u16, url: String },
    #[error("could not parse risk register response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("risk register unavailable: {0}")]
    Unavailable(String),
}

/// `reqwest`-backed client. No retries; every request runs to completion or failure.
#[derive(Debug, Clone)]
pub struct HttpRiskApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRiskApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/risks/", self.base_url)
    }

    fn record_url(&self, id: RiskId) -> String {
        format!("{}/risks/{}", self.base_url, id)
    }

    async fn checked(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "risk register responded");

        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RiskApi for HttpRiskApi {
    async fn list_risks(&self) -> Result<Vec<RiskRecord>, ApiError> {
        let response = self.checked(self.client.get(self.collection_url())).await?;
        Self::decode(response).await
    }

    async fn fetch_risk(&self, id: RiskId) -> Result<RiskRecord, ApiError> {
        let response = self.checked(self.client.get(self.record_url(id))).await?;
        Self::decode(response).await
    }

    async fn create_risk(&self, submission: &RiskSubmission) -> Result<RiskRecord, ApiError> {
        let request = self.client.post(self.collection_url()).json(submission);
        let response = self.checked(request).await?;
        Self::decode(response).await
    }

    async fn delete_risk(&self, id: RiskId) -> Result<(), ApiError> {
        self.checked(self.client.delete(self.record_url(id)))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_follow_register_routes() {
        let api = HttpRiskApi::with_client(reqwest::Client::new(), "http://register.local/");
        assert_eq!(api.base_url(), "http://register.local");
        assert_eq!(api.collection_url(), "http://register.local/risks/");
        assert_eq!(api.record_url(RiskId(7)), "http://register.local/risks/7");
    }
}
