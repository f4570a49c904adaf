//! Diagnostics telemetry collector and helpers.
//!
//! The collector keeps a bounded history of recognition and error events
//! plus running totals, served by the HTTP metrics endpoint. The recognition
//! core never publishes here; the service context records each call after
//! it completes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::analysis::RecognitionReport;

pub mod events;

pub use events::{DiagnosticError, MetricEvent};

/// Global telemetry hub shared across the crate.
static HUB: Lazy<TelemetryHub> = Lazy::new(TelemetryHub::default);

/// Access the global telemetry hub.
pub fn hub() -> &'static TelemetryHub {
    &HUB
}

/// Snapshot of collector state for HTTP/CLI reporting.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TelemetrySnapshot {
    pub recent: Vec<MetricEvent>,
    pub total_events: u64,
    pub dropped_events: u64,
    pub recognitions: u64,
    pub fallbacks: u64,
}

/// Collector retaining a bounded history of metrics.
pub struct TelemetryCollector {
    history: Mutex<VecDeque<MetricEvent>>,
    history_capacity: usize,
    total_events: AtomicU64,
    dropped_history: AtomicU64,
}

impl TelemetryCollector {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            history: Mutex::new(VecDeque::with_capacity(history_capacity)),
            history_capacity,
            total_events: AtomicU64::new(0),
            dropped_history: AtomicU64::new(0),
        }
    }

    pub fn publish(&self, event: MetricEvent) {
        self.total_events.fetch_add(1, Ordering::Relaxed);

        let mut history = match self.history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!("[Telemetry] History lock poisoned, recovering");
                poisoned.into_inner()
            }
        };
        if history.len() == self.history_capacity {
            history.pop_front();
            self.dropped_history.fetch_add(1, Ordering::Relaxed);
        }
        if self.history_capacity > 0 {
            history.push_back(event);
        }
    }

    fn recent(&self) -> Vec<MetricEvent> {
        match self.history.lock() {
            Ok(history) => history.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn total_events(&self) -> u64 {
        self.total_events.load(Ordering::Relaxed)
    }

    pub fn dropped_events(&self) -> u64 {
        self.dropped_history.load(Ordering::Relaxed)
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Top-level hub wrapping collector state plus recognition counters.
pub struct TelemetryHub {
    collector: TelemetryCollector,
    recognitions: AtomicU64,
    fallbacks: AtomicU64,
}

impl TelemetryHub {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            collector: TelemetryCollector::new(history_capacity),
            recognitions: AtomicU64::new(0),
            fallbacks: AtomicU64::new(0),
        }
    }

    pub fn collector(&self) -> &TelemetryCollector {
        &self.collector
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            recent: self.collector.recent(),
            total_events: self.collector.total_events(),
            dropped_events: self.collector.dropped_events(),
            recognitions: self.recognitions.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
        }
    }

    /// Record one recognition call with its accepted window decisions
    pub fn record_recognition(&self, report: &RecognitionReport) {
        self.recognitions.fetch_add(1, Ordering::Relaxed);
        if report.used_fallback {
            self.fallbacks.fetch_add(1, Ordering::Relaxed);
        }

        for window in report.windows.iter().filter(|w| w.result.accepted) {
            self.collector.publish(MetricEvent::WindowMatch {
                window_index: window.window_index,
                word: window.result.word().map(str::to_string),
                score: window.result.score,
                accepted: true,
            });
        }

        self.collector.publish(MetricEvent::Recognition {
            frame_count: report.frame_count,
            windows_considered: report.windows.len(),
            words: report.words.clone(),
            used_fallback: report.used_fallback,
        });
    }

    pub fn record_error(&self, code: DiagnosticError, context: impl Into<String>) {
        self.collector.publish(MetricEvent::Error {
            code,
            context: context.into(),
        });
    }
}

impl Default for TelemetryHub {
    fn default() -> Self {
        Self::new(64)
    }
}
