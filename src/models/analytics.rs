use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate summary computed by the store over all currently held signals.
/// Replaced wholesale on every fetch; the dashboard never recomputes any
/// field locally. Every field defaults so older store builds that omit a
/// breakdown still deserialize.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub total_signals: u64,
    #[serde(default)]
    pub buy_signals: u64,
    #[serde(default)]
    pub sell_signals: u64,

    #[serde(default)]
    pub symbols_breakdown: HashMap<String, u64>,
    #[serde(default)]
    pub groups_breakdown: HashMap<String, u64>,
    #[serde(default)]
    pub sentiment_breakdown: HashMap<String, u64>,
    /// ISO date (YYYY-MM-DD) -> signal count.
    #[serde(default)]
    pub daily_breakdown: HashMap<String, u64>,

    #[serde(default)]
    pub avg_confidence: Option<f64>,
    #[serde(default)]
    pub avg_tp_sl_ratio: Option<f64>,
    #[serde(default)]
    pub avg_risk_reward: Option<f64>,
    #[serde(default)]
    pub signals_per_day: Option<f64>,
    #[serde(default)]
    pub buy_sell_ratio: Option<f64>,
    #[serde(default)]
    pub total_symbols: u64,
}

impl AnalyticsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.total_signals == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_payload() {
        let snap: AnalyticsSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snap.is_empty());
        assert!(snap.symbols_breakdown.is_empty());
        assert!(snap.avg_tp_sl_ratio.is_none());
    }

    #[test]
    fn deserializes_full_payload() {
        let json = r#"{
            "total_signals": 3,
            "buy_signals": 2,
            "sell_signals": 1,
            "symbols_breakdown": {"EURUSD": 2, "GBPJPY": 1},
            "groups_breakdown": {"Manual Input": 3},
            "sentiment_breakdown": {"BULLISH": 2, "BEARISH": 1},
            "daily_breakdown": {"2024-03-10": 3},
            "avg_confidence": 0.9,
            "avg_tp_sl_ratio": 1.4,
            "avg_risk_reward": 1.4,
            "signals_per_day": 3.0,
            "buy_sell_ratio": 2.0,
            "total_symbols": 2
        }"#;
        let snap: AnalyticsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.total_signals, 3);
        assert_eq!(snap.symbols_breakdown["EURUSD"], 2);
        assert_eq!(snap.total_symbols, 2);
        assert_eq!(snap.avg_confidence, Some(0.9));
    }
}
