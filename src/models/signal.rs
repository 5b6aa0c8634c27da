use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    Buy,
    Sell,
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalAction::Buy => write!(f, "BUY"),
            SignalAction::Sell => write!(f, "SELL"),
        }
    }
}

impl SignalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalAction::Buy => "BUY",
            SignalAction::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "BULLISH"),
            Sentiment::Bearish => write!(f, "BEARISH"),
            Sentiment::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "BULLISH",
            Sentiment::Bearish => "BEARISH",
            Sentiment::Neutral => "NEUTRAL",
        }
    }
}

/// One extracted trading signal as stored by the remote store.
/// The store assigns the id and timestamp; the dashboard only caches these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub symbol: String,
    pub action: SignalAction,
    #[serde(default)]
    pub entry: Option<f64>,
    #[serde(default)]
    pub zone_low: Option<f64>,
    #[serde(default)]
    pub zone_high: Option<f64>,
    #[serde(default)]
    pub tp1: Option<f64>,
    #[serde(default)]
    pub tp2: Option<f64>,
    #[serde(default)]
    pub tp3: Option<f64>,
    #[serde(default)]
    pub sl: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub risk_reward: Option<f64>,
    #[serde(default = "default_group")]
    pub group_name: String,
    #[serde(default)]
    pub source_message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

fn default_group() -> String {
    "Manual Input".to_string()
}

impl Signal {
    /// Entry rendered for display: a single price, a zone, or a dash.
    pub fn entry_label(&self) -> String {
        match (self.entry, self.zone_low, self.zone_high) {
            (Some(e), _, _) => format!("{:.5}", e),
            (None, Some(lo), Some(hi)) => format!("{:.5}-{:.5}", lo, hi),
            _ => "-".to_string(),
        }
    }

    pub fn tp_levels(&self) -> Vec<f64> {
        [self.tp1, self.tp2, self.tp3].into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_wire_form_is_uppercase() {
        assert_eq!(serde_json::to_string(&SignalAction::Buy).unwrap(), "\"BUY\"");
        let parsed: SignalAction = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(parsed, SignalAction::Sell);
    }

    #[test]
    fn signal_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "abc-1",
            "symbol": "EURUSD",
            "action": "BUY",
            "timestamp": "2024-03-10T10:00:00Z"
        }"#;
        let s: Signal = serde_json::from_str(json).unwrap();
        assert_eq!(s.symbol, "EURUSD");
        assert_eq!(s.group_name, "Manual Input");
        assert!(s.entry.is_none());
        assert!(s.sentiment.is_none());
        assert!(s.tp_levels().is_empty());
    }

    #[test]
    fn entry_label_prefers_price_over_zone() {
        let json = r#"{
            "id": "abc-2",
            "symbol": "GBPJPY",
            "action": "SELL",
            "entry": 185.50,
            "zone_low": 185.20,
            "zone_high": 185.80,
            "timestamp": "2024-03-10T10:00:00Z"
        }"#;
        let s: Signal = serde_json::from_str(json).unwrap();
        assert_eq!(s.entry_label(), "185.50000");

        let zoned = Signal {
            entry: None,
            ..s
        };
        assert_eq!(zoned.entry_label(), "185.20000-185.80000");
    }
}
