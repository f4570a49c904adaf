// Analysis module - gesture recognition pipeline
//
// This module turns a finite sequence of landmark frames into an ordered
// list of gloss words.
//
// Architecture:
// - Pipeline: windowing → FeatureExtractor → SimilarityScorer (per signature)
//   → acceptance threshold → RecognizerSession de-duplication
// - Input: `&[Frame]` already decoded from the capture client
// - Output: RecognitionReport (words plus per-window diagnostics)
//
// Everything here is synchronous and free of I/O. The signature database is
// the only shared input and is read-only.

pub mod features;
pub mod recognizer;
pub mod scorer;
pub mod session;

pub use features::{FeatureExtractor, FeatureVector, HandShape, HandShapeClassifier};
pub use recognizer::{RecognitionReport, SequenceRecognizer, WindowMatch, WindowReport};
pub use scorer::{ScoreBreakdown, SimilarityScorer};
pub use session::RecognizerSession;
