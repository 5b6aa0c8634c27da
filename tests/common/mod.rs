use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use signal_dashboard::models::{AnalyticsSnapshot, Signal, SignalAction};

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

/// Aggregate a signal list the way the store's analytics endpoint would.
pub fn snapshot_for(signals: &[Signal]) -> AnalyticsSnapshot {
    let mut symbols: HashMap<String, u64> = HashMap::new();
    for s in signals {
        *symbols.entry(s.symbol.clone()).or_insert(0) += 1;
    }
    let buy = signals
        .iter()
        .filter(|s| s.action == SignalAction::Buy)
        .count() as u64;

    AnalyticsSnapshot {
        total_signals: signals.len() as u64,
        buy_signals: buy,
        sell_signals: signals.len() as u64 - buy,
        total_symbols: symbols.len() as u64,
        symbols_breakdown: symbols,
        ..Default::default()
    }
}
