use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::models::{AnalyticsSnapshot, Signal};
use crate::store::{ExportFormat, ExtractOutcome, SignalStore, StoreError, StoreHealth};

/// Fallback wording when the store rejects a message without saying why.
const DEFAULT_REJECTION: &str = "No valid signal found";

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    message: &'a str,
    group_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignalListResponse {
    signals: Vec<Signal>,
}

/// HTTP client for the remote signal store. Every call is a single shot:
/// no retries, no backoff, no caching at this layer.
pub struct HttpSignalStore {
    client: Client,
    base_url: String,
}

impl HttpSignalStore {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: cfg.api_base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn ensure_success(resp: Response) -> Result<Response, StoreError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }
        Ok(resp)
    }
}

#[async_trait]
impl SignalStore for HttpSignalStore {
    async fn list_signals(&mut self) -> Result<Vec<Signal>, StoreError> {
        let resp = self.client.get(self.url("/api/signals")).send().await?;
        let resp = Self::ensure_success(resp).await?;
        let data: SignalListResponse = resp.json().await.map_err(StoreError::Decode)?;
        Ok(data.signals)
    }

    async fn analytics(&mut self) -> Result<AnalyticsSnapshot, StoreError> {
        let resp = self.client.get(self.url("/api/analytics")).send().await?;
        let resp = Self::ensure_success(resp).await?;
        resp.json().await.map_err(StoreError::Decode)
    }

    async fn extract(
        &mut self,
        message: &str,
        group_name: &str,
    ) -> Result<ExtractOutcome, StoreError> {
        let resp = self
            .client
            .post(self.url("/api/extract-signal"))
            .json(&ExtractRequest {
                message,
                group_name,
            })
            .send()
            .await?;
        let resp = Self::ensure_success(resp).await?;
        let data: ExtractResponse = resp.json().await.map_err(StoreError::Decode)?;

        if data.success {
            Ok(ExtractOutcome::Extracted)
        } else {
            let reason = data
                .message
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
            Ok(ExtractOutcome::Rejected(reason))
        }
    }

    async fn delete_signal(&mut self, id: &str) -> Result<(), StoreError> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/signals/{}", id)))
            .send()
            .await?;
        Self::ensure_success(resp).await?;
        Ok(())
    }

    async fn clear_signals(&mut self) -> Result<(), StoreError> {
        let resp = self.client.delete(self.url("/api/signals")).send().await?;
        Self::ensure_success(resp).await?;
        Ok(())
    }

    async fn export(&mut self, format: ExportFormat) -> Result<Vec<u8>, StoreError> {
        let resp = self
            .client
            .get(self.url(&format!("/api/export/{}", format)))
            .send()
            .await?;
        let resp = Self::ensure_success(resp).await?;
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn health(&mut self) -> Result<StoreHealth, StoreError> {
        let resp = self.client.get(self.url("/api/health")).send().await?;
        let resp = Self::ensure_success(resp).await?;
        resp.json().await.map_err(StoreError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let cfg = crate::test_helpers::default_test_config();
        let store = HttpSignalStore::new(&cfg).unwrap();
        assert_eq!(store.url("/api/signals"), "http://localhost:8001/api/signals");
        assert_eq!(
            store.url(&format!("/api/export/{}", ExportFormat::Csv)),
            "http://localhost:8001/api/export/csv"
        );
    }

    #[test]
    fn extract_response_tolerates_missing_message() {
        let parsed: ExtractResponse =
            serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.message.is_none());
    }
}
