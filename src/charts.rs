use chrono::NaiveDate;

use crate::models::{AnalyticsSnapshot, Sentiment};

/// One labelled value in a presentation-ready chart series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: u64,
}

fn sorted_desc(entries: impl Iterator<Item = (String, u64)>) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = entries
        .map(|(label, value)| SeriesPoint { label, value })
        .collect();
    points.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
    points
}

/// Symbols by signal count, busiest first; ties broken alphabetically.
pub fn symbol_series(snap: &AnalyticsSnapshot) -> Vec<SeriesPoint> {
    sorted_desc(snap.symbols_breakdown.iter().map(|(k, v)| (k.clone(), *v)))
}

/// Source groups by signal count, same ordering as symbols.
pub fn group_series(snap: &AnalyticsSnapshot) -> Vec<SeriesPoint> {
    sorted_desc(snap.groups_breakdown.iter().map(|(k, v)| (k.clone(), *v)))
}

/// Sentiment counts in fixed bullish/bearish/neutral order.
/// Tags absent from the snapshot (or at zero) are dropped.
pub fn sentiment_series(snap: &AnalyticsSnapshot) -> Vec<SeriesPoint> {
    [Sentiment::Bullish, Sentiment::Bearish, Sentiment::Neutral]
        .iter()
        .filter_map(|s| {
            let count = *snap.sentiment_breakdown.get(s.as_str()).unwrap_or(&0);
            (count > 0).then(|| SeriesPoint {
                label: s.as_str().to_string(),
                value: count,
            })
        })
        .collect()
}

/// Daily signal counts in date order. Keys that do not parse as ISO dates
/// are dropped rather than rendered out of sequence.
pub fn daily_series(snap: &AnalyticsSnapshot) -> Vec<SeriesPoint> {
    let mut dated: Vec<(NaiveDate, u64)> = snap
        .daily_breakdown
        .iter()
        .filter_map(|(k, v)| {
            NaiveDate::parse_from_str(k, "%Y-%m-%d")
                .ok()
                .map(|d| (d, *v))
        })
        .collect();
    dated.sort_by_key(|(d, _)| *d);
    dated
        .into_iter()
        .map(|(d, v)| SeriesPoint {
            label: d.format("%Y-%m-%d").to_string(),
            value: v,
        })
        .collect()
}

/// (buy, sell) counts for the action split tile.
pub fn action_split(snap: &AnalyticsSnapshot) -> (u64, u64) {
    (snap.buy_signals, snap.sell_signals)
}

/// Proportional text bar, `width` characters at `max`.
pub fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 || width == 0 {
        return String::new();
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    "#".repeat(filled.min(width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn snapshot_with(
        symbols: &[(&str, u64)],
        sentiments: &[(&str, u64)],
        daily: &[(&str, u64)],
    ) -> AnalyticsSnapshot {
        let to_map = |items: &[(&str, u64)]| -> HashMap<String, u64> {
            items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
        };
        AnalyticsSnapshot {
            symbols_breakdown: to_map(symbols),
            sentiment_breakdown: to_map(sentiments),
            daily_breakdown: to_map(daily),
            ..Default::default()
        }
    }

    #[test]
    fn symbol_series_sorts_by_count_then_name() {
        let snap = snapshot_with(
            &[("GBPJPY", 2), ("EURUSD", 5), ("AUDUSD", 2)],
            &[],
            &[],
        );
        let series = symbol_series(&snap);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["EURUSD", "AUDUSD", "GBPJPY"]);
        assert_eq!(series[0].value, 5);
    }

    #[test]
    fn sentiment_series_keeps_fixed_order_and_drops_zeroes() {
        let snap = snapshot_with(&[], &[("NEUTRAL", 1), ("BULLISH", 4)], &[]);
        let series = sentiment_series(&snap);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["BULLISH", "NEUTRAL"]);
    }

    #[test]
    fn daily_series_sorts_dates_and_drops_garbage_keys() {
        let snap = snapshot_with(
            &[],
            &[],
            &[("2024-03-11", 1), ("not-a-date", 9), ("2024-03-09", 2)],
        );
        let series = daily_series(&snap);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-03-09", "2024-03-11"]);
    }

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(5, 10, 10), "#####");
        assert_eq!(bar(10, 10, 10), "##########");
        assert_eq!(bar(1, 1000, 10), "");
        assert_eq!(bar(3, 0, 10), "");
    }
}
