use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::config::Config;
use crate::models::{AnalyticsSnapshot, Signal, SignalAction};

/// Build a signal with sensible defaults, offset by `index` minutes so a
/// batch gets distinct timestamps.
pub fn make_signal(index: usize, symbol: &str, action: SignalAction) -> Signal {
    let base = DateTime::parse_from_rfc3339("2024-03-10T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc);

    Signal {
        id: format!("sig-{}", index),
        symbol: symbol.to_string(),
        action,
        entry: Some(1.0945),
        zone_low: None,
        zone_high: None,
        tp1: Some(1.0980),
        tp2: None,
        tp3: None,
        sl: Some(1.0920),
        confidence: Some(0.9),
        sentiment: None,
        risk_reward: None,
        group_name: "Manual Input".to_string(),
        source_message: None,
        timestamp: base + Duration::minutes(index as i64),
    }
}

/// Snapshot matching a list of (symbol, action) pairs, the way the store
/// would aggregate them.
pub fn make_snapshot(pairs: &[(&str, SignalAction)]) -> AnalyticsSnapshot {
    let mut symbols: HashMap<String, u64> = HashMap::new();
    for (symbol, _) in pairs {
        *symbols.entry(symbol.to_string()).or_insert(0) += 1;
    }
    let buy = pairs
        .iter()
        .filter(|(_, a)| *a == SignalAction::Buy)
        .count() as u64;

    AnalyticsSnapshot {
        total_signals: pairs.len() as u64,
        buy_signals: buy,
        sell_signals: pairs.len() as u64 - buy,
        total_symbols: symbols.len() as u64,
        symbols_breakdown: symbols,
        ..Default::default()
    }
}

/// A Config suitable for testing — local URL, temp export dir.
pub fn default_test_config() -> Config {
    Config {
        api_base_url: "http://localhost:8001".to_string(),
        export_dir: std::env::temp_dir()
            .join("signal_dash_test")
            .to_string_lossy()
            .to_string(),
        http_timeout_secs: 5,
        log_level: "error".to_string(),
    }
}
