//! Configuration management for recognition tuning
//!
//! This module provides runtime configuration loading from JSON files,
//! so windowing, acceptance threshold, fallback behavior, store location,
//! and server binding can be adjusted without recompilation.
//!
//! The similarity scale constants are deliberately not configurable; they
//! live in `analysis::scorer` next to the formulas that depend on them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::signatures::DEFAULT_SIGNATURES_PATH;

/// Default location of the application config file
pub const DEFAULT_CONFIG_PATH: &str = "assets/gloss_config.json";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub recognition: RecognitionConfig,
    pub store: StoreConfig,
    pub server: ServerConfig,
}

/// Sequence recognition parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Number of consecutive frames per candidate gesture
    pub window_size: usize,
    /// Windows shorter than this are discarded (trailing remainder guard)
    pub min_window_frames: usize,
    /// Best score must be strictly greater than this to accept a word
    pub acceptance_threshold: f64,
    /// Word returned when nothing was accepted; `None` returns an empty list
    pub fallback_word: Option<String>,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            window_size: 10,
            min_window_frames: 5,
            acceptance_threshold: 0.5,
            fallback_word: Some("HELLO".to_string()),
        }
    }
}

/// Reference signature store location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the gestures JSON document
    pub signatures_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            signatures_path: PathBuf::from(DEFAULT_SIGNATURES_PATH),
        }
    }
}

/// HTTP service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the service binds to (overridden by `GLOSS_HTTP_ADDR`)
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The loaded configuration, or the defaults if the file doesn't exist
    /// or its JSON is invalid (the failure is logged).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_PATH)
    }
}
