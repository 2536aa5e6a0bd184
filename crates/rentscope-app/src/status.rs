use std::sync::atomic::{AtomicU64, Ordering};

use rentscope_core::TriggerOutcome;
use rentscope_types::{RequestUiState, Trigger};

/// Click counters for one trigger
#[derive(Debug, Default)]
pub struct TriggerStatus {
    pub clicks: AtomicU64,
    pub ignored: AtomicU64,
    pub succeeded: AtomicU64,
    pub failed: AtomicU64,
}

impl TriggerStatus {
    pub fn record(&self, outcome: TriggerOutcome) {
        self.clicks.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            TriggerOutcome::Ignored => &self.ignored,
            TriggerOutcome::Completed(RequestUiState::Success) => &self.succeeded,
            TriggerOutcome::Completed(RequestUiState::Error) => &self.failed,
            TriggerOutcome::Completed(_) => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> (u64, u64, u64, u64) {
        (
            self.clicks.load(Ordering::Relaxed),
            self.succeeded.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed),
            self.ignored.load(Ordering::Relaxed),
        )
    }
}

/// Application status
#[derive(Debug, Default)]
pub struct AppStatus {
    pub predict: TriggerStatus,
    pub crawl: TriggerStatus,
}

impl AppStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_trigger(&self, trigger: Trigger) -> &TriggerStatus {
        match trigger {
            Trigger::Predict => &self.predict,
            Trigger::Crawl => &self.crawl,
        }
    }

    pub fn log_summary(&self) {
        for (name, status) in [("predict", &self.predict), ("crawl", &self.crawl)] {
            let (clicks, succeeded, failed, ignored) = status.summary();
            tracing::info!(trigger = name, clicks, succeeded, failed, ignored, "session summary");
        }
    }
}
