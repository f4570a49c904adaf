// Recognizer configuration error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Configuration error code constants
///
/// Error code range: 4001-4003
pub struct ConfigErrorCodes {}

impl ConfigErrorCodes {
    /// Window size must be at least one frame
    pub const INVALID_WINDOW_SIZE: i32 = 4001;

    /// Acceptance threshold must be finite and within [0, 1]
    pub const INVALID_THRESHOLD: i32 = 4002;

    /// Minimum window length must be between 1 and the window size
    pub const INVALID_MIN_WINDOW: i32 = 4003;
}

/// Log a configuration error with structured context
pub fn log_config_error(err: &ConfigError, context: &str) {
    error!(
        "Config error in {}: code={}, component=SequenceRecognizer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised when a recognizer is built from an unusable configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Window size of zero frames
    InvalidWindowSize { window_size: usize },

    /// Threshold outside [0, 1] or not finite
    InvalidThreshold { threshold: f64 },

    /// Minimum window length of zero or larger than the window size
    InvalidMinWindow {
        min_window_frames: usize,
        window_size: usize,
    },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::InvalidWindowSize { .. } => ConfigErrorCodes::INVALID_WINDOW_SIZE,
            ConfigError::InvalidThreshold { .. } => ConfigErrorCodes::INVALID_THRESHOLD,
            ConfigError::InvalidMinWindow { .. } => ConfigErrorCodes::INVALID_MIN_WINDOW,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::InvalidWindowSize { window_size } => {
                format!("Window size must be greater than 0 (got {})", window_size)
            }
            ConfigError::InvalidThreshold { threshold } => {
                format!(
                    "Acceptance threshold must be within [0, 1] (got {})",
                    threshold
                )
            }
            ConfigError::InvalidMinWindow {
                min_window_frames,
                window_size,
            } => {
                format!(
                    "Minimum window length must be between 1 and {} (got {})",
                    window_size, min_window_frames
                )
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConfigError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ConfigError {}
