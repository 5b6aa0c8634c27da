use tracing::{debug, info, warn};

use crate::export::Exporter;
use crate::models::{AnalyticsSnapshot, Signal};
use crate::store::{ExportFormat, ExtractOutcome, SignalStore};

const DEFAULT_GROUP: &str = "Manual Input";
const TRANSPORT_NOTICE: &str = "Could not reach the signal store. Please try again.";

/// Unsaved user input pending submission. Only the message clears on a
/// successful extraction; the group name is sticky so a batch of alerts
/// from one channel can be pasted in sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub message: String,
    pub group_name: String,
}

/// Which slice of view state changed. Subscribers receive these in the
/// order the writes happen, so dependent recomputations are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Draft,
    Signals,
    Analytics,
    Busy,
    Notice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing alert queued by an operation and drained by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

type Subscriber = Box<dyn Fn(StateChange) + Send>;

/// Owns all dashboard view state and mediates every read and write against
/// the remote signal store. The cached list and snapshot always reflect the
/// last successful fetch: no optimistic updates, no retries. Every failed
/// operation leaves the last-known-good state in place.
pub struct DashboardController {
    store: Box<dyn SignalStore>,
    exporter: Exporter,

    signals: Vec<Signal>,
    analytics: Option<AnalyticsSnapshot>,
    draft: Draft,

    extracting: bool,
    loading_signals: bool,
    loading_analytics: bool,
    exporting: bool,

    notices: Vec<Notice>,
    subscribers: Vec<Subscriber>,
}

impl DashboardController {
    pub fn new(store: Box<dyn SignalStore>, exporter: Exporter) -> Self {
        Self {
            store,
            exporter,
            signals: Vec::new(),
            analytics: None,
            draft: Draft::default(),
            extracting: false,
            loading_signals: false,
            loading_analytics: false,
            exporting: false,
            notices: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    // --- state access ---

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn analytics(&self) -> Option<&AnalyticsSnapshot> {
        self.analytics.as_ref()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_extracting(&self) -> bool {
        self.extracting
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Drain queued alerts for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Register an observer for state writes. Observers run synchronously
    /// in registration order on every change.
    pub fn subscribe(&mut self, f: impl Fn(StateChange) + Send + 'static) {
        self.subscribers.push(Box::new(f));
    }

    fn emit(&self, change: StateChange) {
        for sub in &self.subscribers {
            sub(change);
        }
    }

    fn push_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice {
            level,
            text: text.into(),
        });
        self.emit(StateChange::Notice);
    }

    fn set_busy(flag: &mut bool, value: bool) -> bool {
        let changed = *flag != value;
        *flag = value;
        changed
    }

    // --- draft editing ---

    pub fn set_draft_message(&mut self, text: impl Into<String>) {
        self.draft.message = text.into();
        self.emit(StateChange::Draft);
    }

    pub fn set_draft_group(&mut self, group: impl Into<String>) {
        self.draft.group_name = group.into();
        self.emit(StateChange::Draft);
    }

    // --- operations ---

    /// Fetch the full signal list and replace the cache. A failure keeps
    /// the previous cache and is logged only; background reads never
    /// interrupt the user.
    pub async fn load_signals(&mut self) {
        if self.loading_signals {
            return;
        }
        if Self::set_busy(&mut self.loading_signals, true) {
            self.emit(StateChange::Busy);
        }

        match self.store.list_signals().await {
            Ok(signals) => {
                debug!(count = signals.len(), "signal list refreshed");
                self.signals = signals;
                self.emit(StateChange::Signals);
            }
            Err(err) => warn!("failed to load signals: {err}"),
        }

        if Self::set_busy(&mut self.loading_signals, false) {
            self.emit(StateChange::Busy);
        }
    }

    /// Fetch the analytics snapshot and replace it wholesale. On failure
    /// the stale snapshot stays up with no user-visible alert.
    pub async fn load_analytics(&mut self) {
        if self.loading_analytics {
            return;
        }
        if Self::set_busy(&mut self.loading_analytics, true) {
            self.emit(StateChange::Busy);
        }

        match self.store.analytics().await {
            Ok(snapshot) => {
                debug!(total = snapshot.total_signals, "analytics refreshed");
                self.analytics = Some(snapshot);
                self.emit(StateChange::Analytics);
            }
            Err(err) => warn!("failed to load analytics: {err}"),
        }

        if Self::set_busy(&mut self.loading_analytics, false) {
            self.emit(StateChange::Busy);
        }
    }

    /// Submit the current draft for extraction. An empty (post-trim) draft
    /// issues no request at all. On success the draft message clears and
    /// both caches refresh, list first. A store rejection surfaces the
    /// store's wording verbatim and preserves the draft.
    pub async fn submit_message(&mut self) {
        if self.extracting {
            debug!("extraction already in flight, ignoring submit");
            return;
        }

        let message = self.draft.message.trim().to_string();
        if message.is_empty() {
            return;
        }

        let group = {
            let g = self.draft.group_name.trim();
            if g.is_empty() {
                DEFAULT_GROUP.to_string()
            } else {
                g.to_string()
            }
        };

        if Self::set_busy(&mut self.extracting, true) {
            self.emit(StateChange::Busy);
        }

        match self.store.extract(&message, &group).await {
            Ok(ExtractOutcome::Extracted) => {
                info!(group = %group, "signal extracted");
                self.draft.message.clear();
                self.emit(StateChange::Draft);
                self.load_signals().await;
                self.load_analytics().await;
            }
            Ok(ExtractOutcome::Rejected(reason)) => {
                info!(reason = %reason, "store rejected message");
                self.push_notice(NoticeLevel::Warning, reason);
            }
            Err(err) => {
                warn!("extraction request failed: {err}");
                self.push_notice(NoticeLevel::Error, TRANSPORT_NOTICE);
            }
        }

        if Self::set_busy(&mut self.extracting, false) {
            self.emit(StateChange::Busy);
        }
    }

    /// Delete one signal, then refresh both caches. Failures are logged
    /// only; nothing was changed optimistically, so there is no rollback.
    pub async fn delete_signal(&mut self, id: &str) {
        match self.store.delete_signal(id).await {
            Ok(()) => {
                info!(id, "signal deleted");
                self.load_signals().await;
                self.load_analytics().await;
            }
            Err(err) => warn!(id, "failed to delete signal: {err}"),
        }
    }

    /// Delete every signal in the store. The confirmation prompt lives in
    /// the view; an unconfirmed call sends nothing.
    pub async fn clear_all(&mut self, confirmed: bool) {
        if !confirmed {
            debug!("clear-all not confirmed, nothing sent");
            return;
        }

        match self.store.clear_signals().await {
            Ok(()) => {
                info!("all signals cleared");
                self.load_signals().await;
                self.load_analytics().await;
            }
            Err(err) => {
                warn!("failed to clear signals: {err}");
                self.push_notice(NoticeLevel::Error, TRANSPORT_NOTICE);
            }
        }
    }

    /// Fetch a rendered export of the full signal set and save it locally.
    /// Cached state is untouched either way.
    pub async fn export_as(&mut self, format: ExportFormat) {
        if self.exporting {
            return;
        }
        if Self::set_busy(&mut self.exporting, true) {
            self.emit(StateChange::Busy);
        }

        match self.store.export(format).await {
            Ok(bytes) => match self.exporter.save(format, &bytes) {
                Ok(path) => {
                    info!(path = %path.display(), "export saved");
                    self.push_notice(
                        NoticeLevel::Info,
                        format!("Export saved to {}", path.display()),
                    );
                }
                Err(err) => {
                    warn!("failed to save export: {err:#}");
                    self.push_notice(NoticeLevel::Error, format!("Could not save export: {err}"));
                }
            },
            Err(err) => {
                warn!("export request failed: {err}");
                self.push_notice(NoticeLevel::Error, TRANSPORT_NOTICE);
            }
        }

        if Self::set_busy(&mut self.exporting, false) {
            self.emit(StateChange::Busy);
        }
    }

    /// Probe the store's health endpoint and report the result.
    pub async fn check_store(&mut self) {
        match self.store.health().await {
            Ok(health) => {
                let extractor = if health.extractor_configured {
                    "extractor ready"
                } else {
                    "extractor not configured"
                };
                self.push_notice(
                    NoticeLevel::Info,
                    format!("Store {} ({})", health.status, extractor),
                );
            }
            Err(err) => {
                warn!("health check failed: {err}");
                self.push_notice(NoticeLevel::Error, TRANSPORT_NOTICE);
            }
        }
    }
}
