//! Telemetry event types describing recognition activity exposed to the
//! HTTP metrics endpoint and the CLI.

use serde::{Deserialize, Serialize};

/// Diagnostic error codes surfaced via telemetry metrics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticError {
    SignatureStore,
    InvalidRequest,
    FixtureLoad,
    Unknown,
}

/// Metric events covering recognition calls and individual window decisions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum MetricEvent {
    Recognition {
        frame_count: usize,
        windows_considered: usize,
        words: Vec<String>,
        used_fallback: bool,
    },
    WindowMatch {
        window_index: usize,
        word: Option<String>,
        score: f64,
        accepted: bool,
    },
    Error {
        code: DiagnosticError,
        context: String,
    },
}
