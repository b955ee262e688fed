//! Metrics counters for the snippet API

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    snippets_created: AtomicU64,
    snippets_served: AtomicU64,
    reads_rejected: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snippet_created(&self) {
        self.snippets_created.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "snippets_created", "Metric incremented");
    }

    pub fn snippet_served(&self) {
        self.snippets_served.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "snippets_served", "Metric incremented");
    }

    /// A read that came back `NotFound`: absent, expired, or exhausted.
    pub fn read_rejected(&self) {
        self.reads_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "reads_rejected", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            snippets_created: self.snippets_created.load(Ordering::Relaxed),
            snippets_served: self.snippets_served.load(Ordering::Relaxed),
            reads_rejected: self.reads_rejected.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub snippets_created: u64,
    pub snippets_served: u64,
    pub reads_rejected: u64,
}
