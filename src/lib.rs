// Gloss Recognizer Core - sign-language gloss recognition
// Windowed landmark features matched against a reference signature library

// Module declarations
pub mod analysis;
pub mod config;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod landmarks;
pub mod signatures;
pub mod telemetry;
pub mod translation;

// Re-exports for convenience
pub use analysis::{
    FeatureExtractor, FeatureVector, HandShape, HandShapeClassifier, RecognitionReport,
    SequenceRecognizer, SimilarityScorer, WindowMatch, WindowReport,
};
pub use config::{AppConfig, RecognitionConfig};
pub use context::{GlossService, TranslationOutcome};
pub use landmarks::{Frame, Landmark};
pub use signatures::{GestureSignature, SignatureDatabase, SignatureFeatures};
pub use translation::{SimpleTranslator, Translator};
