// SequenceRecognizer - windowing, matching, and de-duplication
//
// Pipeline per call:
// 1. Split frames into consecutive, non-overlapping windows of `window_size`
// 2. Drop windows shorter than `min_window_frames` (short trailing remainder)
// 3. Extract features per window and score every signature in store order;
//    the first signature with the strictly greatest score is the candidate,
//    accepted only if its score exceeds `acceptance_threshold`
// 4. Feed accepted words through a fresh RecognizerSession (de-duplication)
// 5. Substitute the configured fallback word if nothing was accepted
//
// The recognizer itself holds no mutable state and is Send + Sync; all
// per-call memory lives in the session created inside `recognize`.

use std::sync::Arc;

use serde::Serialize;

use crate::analysis::features::{FeatureExtractor, FeatureVector};
use crate::analysis::scorer::SimilarityScorer;
use crate::analysis::session::RecognizerSession;
use crate::config::RecognitionConfig;
use crate::error::ConfigError;
use crate::landmarks::Frame;
use crate::signatures::SignatureDatabase;

/// Outcome of matching one window against the database
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowMatch {
    /// Features extracted from the window
    pub features: FeatureVector,
    /// Highest-scoring signature (first one on ties), accepted or not
    pub best_match: Option<String>,
    /// Score of `best_match`, 0.0 for an empty database
    pub score: f64,
    /// Whether `score` cleared the acceptance threshold
    pub accepted: bool,
}

impl WindowMatch {
    /// Recognized word, if the window was accepted
    pub fn word(&self) -> Option<&str> {
        if self.accepted {
            self.best_match.as_deref()
        } else {
            None
        }
    }
}

/// A considered window together with its position in the input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReport {
    pub window_index: usize,
    pub start_frame: usize,
    pub frame_count: usize,
    #[serde(flatten)]
    pub result: WindowMatch,
}

/// Full result of one recognition call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognitionReport {
    /// Ordered, de-duplicated gloss words (the fallback if nothing matched)
    pub words: Vec<String>,
    /// Windows that met the minimum length, in input order
    pub windows: Vec<WindowReport>,
    /// True if `words` is the fallback substitution
    pub used_fallback: bool,
    /// Number of input frames
    pub frame_count: usize,
}

impl RecognitionReport {
    /// Mean score of accepted windows, 0.0 if none were accepted
    pub fn confidence(&self) -> f64 {
        let accepted: Vec<f64> = self
            .windows
            .iter()
            .filter(|w| w.result.accepted)
            .map(|w| w.result.score)
            .collect();

        if accepted.is_empty() {
            0.0
        } else {
            accepted.iter().sum::<f64>() / accepted.len() as f64
        }
    }

    pub fn accepted_windows(&self) -> usize {
        self.windows.iter().filter(|w| w.result.accepted).count()
    }
}

/// SequenceRecognizer turns a finite frame sequence into gloss words
pub struct SequenceRecognizer {
    database: Arc<SignatureDatabase>,
    config: RecognitionConfig,
    extractor: FeatureExtractor,
    scorer: SimilarityScorer,
}

impl SequenceRecognizer {
    /// Create a recognizer over a shared database
    ///
    /// # Errors
    /// `ConfigError` if the window size is zero, the minimum window length is
    /// outside `1..=window_size`, or the threshold is not within [0, 1].
    pub fn new(
        database: Arc<SignatureDatabase>,
        config: RecognitionConfig,
    ) -> Result<Self, ConfigError> {
        validate(&config)?;
        Ok(Self {
            database,
            config,
            extractor: FeatureExtractor::new(),
            scorer: SimilarityScorer::new(),
        })
    }

    /// Create a recognizer with the default configuration
    pub fn with_defaults(database: Arc<SignatureDatabase>) -> Self {
        Self {
            database,
            config: RecognitionConfig::default(),
            extractor: FeatureExtractor::new(),
            scorer: SimilarityScorer::new(),
        }
    }

    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    pub fn database(&self) -> &SignatureDatabase {
        &self.database
    }

    /// Recognize a sequence and return only the words
    pub fn recognize_sequence(&self, frames: &[Frame]) -> Vec<String> {
        self.recognize(frames).words
    }

    /// Recognize a sequence with per-window diagnostics
    pub fn recognize(&self, frames: &[Frame]) -> RecognitionReport {
        let mut session = RecognizerSession::new();
        let mut windows = Vec::with_capacity(frames.len() / self.config.window_size + 1);

        for (window_index, window) in frames.chunks(self.config.window_size).enumerate() {
            if window.len() < self.config.min_window_frames {
                log::debug!(
                    "[Recognizer] Skipping window {} with {} frames (minimum {})",
                    window_index,
                    window.len(),
                    self.config.min_window_frames
                );
                continue;
            }

            let result = self.recognize_window(window);
            log::debug!(
                "[Recognizer] Window {}: best={:?} score={:.3} accepted={}",
                window_index,
                result.best_match,
                result.score,
                result.accepted
            );

            if let Some(word) = result.word() {
                session.observe(word);
            }

            windows.push(WindowReport {
                window_index,
                start_frame: window_index * self.config.window_size,
                frame_count: window.len(),
                result,
            });
        }

        let (words, used_fallback) = session.finish(self.config.fallback_word.as_deref());
        log::debug!(
            "[Recognizer] {} frames, {} windows considered -> {:?}{}",
            frames.len(),
            windows.len(),
            words,
            if used_fallback { " (fallback)" } else { "" }
        );

        RecognitionReport {
            words,
            windows,
            used_fallback,
            frame_count: frames.len(),
        }
    }

    /// Match a single window against every signature
    ///
    /// Window length limits are not applied here; callers that bypass
    /// `recognize` decide which windows are worth matching.
    pub fn recognize_window(&self, window: &[Frame]) -> WindowMatch {
        let features = self.extractor.extract(window);

        let mut best: Option<(&str, f64)> = None;
        for signature in self.database.iter() {
            let score = self.scorer.score(&features, &signature.features);
            let better = best.map_or(true, |(_, best_score)| score > best_score);
            if better {
                best = Some((signature.name.as_str(), score));
            }
        }

        let (best_match, score) = match best {
            Some((name, score)) => (Some(name.to_string()), score),
            None => (None, 0.0),
        };

        WindowMatch {
            features,
            accepted: best_match.is_some() && score > self.config.acceptance_threshold,
            best_match,
            score,
        }
    }
}

fn validate(config: &RecognitionConfig) -> Result<(), ConfigError> {
    if config.window_size == 0 {
        return Err(ConfigError::InvalidWindowSize {
            window_size: config.window_size,
        });
    }
    if config.min_window_frames == 0 || config.min_window_frames > config.window_size {
        return Err(ConfigError::InvalidMinWindow {
            min_window_frames: config.min_window_frames,
            window_size: config.window_size,
        });
    }
    let threshold = config.acceptance_threshold;
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::InvalidThreshold { threshold });
    }
    Ok(())
}

#[cfg(test)]
#[path = "recognizer_tests.rs"]
mod tests;
