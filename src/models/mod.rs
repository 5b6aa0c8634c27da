pub mod analytics;
pub mod signal;

pub use analytics::AnalyticsSnapshot;
pub use signal::{Sentiment, Signal, SignalAction};
