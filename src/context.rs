//! Service context tying the recognition pipeline to its collaborators.
//!
//! `GlossService` owns the shared signature database (through the
//! recognizer), the sentence translator, and telemetry recording. Both the
//! HTTP surface and the CLI go through it, so a request is handled the same
//! way regardless of how it arrived.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::{RecognitionReport, SequenceRecognizer};
use crate::config::AppConfig;
use crate::error::{log_config_error, log_store_error};
use crate::landmarks::Frame;
use crate::signatures::SignatureDatabase;
use crate::telemetry::{self, DiagnosticError};
use crate::translation::{SimpleTranslator, Translator};

/// Result of recognizing and translating one frame sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationOutcome {
    pub translation: String,
    pub words: Vec<String>,
    /// Mean score of accepted windows; 0.0 when the fallback word was used
    pub confidence: f64,
    pub frame_count: usize,
    pub windows_considered: usize,
    pub fallback: bool,
}

/// Recognition + translation service shared by all request handlers
pub struct GlossService {
    recognizer: SequenceRecognizer,
    translator: Box<dyn Translator>,
}

impl GlossService {
    pub fn new(recognizer: SequenceRecognizer, translator: Box<dyn Translator>) -> Self {
        Self {
            recognizer,
            translator,
        }
    }

    /// Build the service from application config
    ///
    /// A missing signature store yields an empty database. A store that
    /// exists but cannot be read or parsed, or an invalid recognition config,
    /// is an error.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::from_parts(&config.store.signatures_path, config)
    }

    /// Build the service with an explicit signature store path
    pub fn from_parts(signatures_path: &Path, config: &AppConfig) -> Result<Self> {
        let database = SignatureDatabase::load_from_file(signatures_path)
            .map_err(|err| {
                log_store_error(&err, "GlossService::from_parts");
                telemetry::hub().record_error(DiagnosticError::SignatureStore, err.to_string());
                err
            })
            .with_context(|| format!("loading signatures from {}", signatures_path.display()))?;

        let recognizer = SequenceRecognizer::new(Arc::new(database), config.recognition.clone())
            .map_err(|err| {
                log_config_error(&err, "GlossService::from_parts");
                err
            })
            .context("building sequence recognizer")?;

        Ok(Self::new(recognizer, Box::new(SimpleTranslator::new())))
    }

    pub fn recognizer(&self) -> &SequenceRecognizer {
        &self.recognizer
    }

    pub fn signature_count(&self) -> usize {
        self.recognizer.database().len()
    }

    pub fn translator_name(&self) -> &'static str {
        self.translator.name()
    }

    /// Recognize a frame sequence and record the call in telemetry
    pub fn recognize(&self, frames: &[Frame]) -> RecognitionReport {
        let report = self.recognizer.recognize(frames);
        telemetry::hub().record_recognition(&report);
        report
    }

    /// Recognize a frame sequence and translate the resulting gloss
    pub fn translate_frames(&self, frames: &[Frame]) -> TranslationOutcome {
        let report = self.recognize(frames);
        let translation = self.translator.translate(&report.words);
        log::info!(
            "[GlossService] {} frames -> {:?} -> {:?}",
            report.frame_count,
            report.words,
            translation
        );

        TranslationOutcome {
            translation,
            confidence: report.confidence(),
            frame_count: report.frame_count,
            windows_considered: report.windows.len(),
            fallback: report.used_fallback,
            words: report.words,
        }
    }
}
