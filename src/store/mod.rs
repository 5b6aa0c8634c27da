pub mod http;

pub use http::HttpSignalStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::models::{AnalyticsSnapshot, Signal};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to signal store failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("signal store returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("unexpected response from signal store: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Result of submitting raw message text for extraction. A rejection is a
/// normal outcome, not an error: the store looked at the text and found no
/// signal in it. The store's own wording is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    Extracted,
    Rejected(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreHealth {
    pub status: String,
    #[serde(default)]
    pub extractor_configured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait SignalStore: Send {
    async fn list_signals(&mut self) -> Result<Vec<Signal>, StoreError>;
    async fn analytics(&mut self) -> Result<AnalyticsSnapshot, StoreError>;
    async fn extract(&mut self, message: &str, group_name: &str)
        -> Result<ExtractOutcome, StoreError>;
    async fn delete_signal(&mut self, id: &str) -> Result<(), StoreError>;
    async fn clear_signals(&mut self) -> Result<(), StoreError>;
    async fn export(&mut self, format: ExportFormat) -> Result<Vec<u8>, StoreError>;
    async fn health(&mut self) -> Result<StoreHealth, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_format_round_trip() {
        assert_eq!(ExportFormat::parse("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::parse("xlsx"), None);
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.to_string(), "json");
    }
}
