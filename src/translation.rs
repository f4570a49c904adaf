//! Gloss-to-sentence translation seam.
//!
//! Recognition produces a gloss (sign-order word labels). Turning that into a
//! fluent sentence is delegated to a `Translator`. The built-in
//! `SimpleTranslator` applies basic formatting rules; richer backends
//! (language models, grammar engines) plug in behind the same trait.

/// Sentence returned when there are no words to translate
pub const NO_SIGNS_MESSAGE: &str = "No signs detected";

/// Converts a gloss word sequence into a sentence
pub trait Translator: Send + Sync {
    fn translate(&self, words: &[String]) -> String;

    /// Short backend identifier for health/diagnostic output
    fn name(&self) -> &'static str;
}

/// Rule-based translator: join, lowercase, capitalize, terminate
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTranslator;

impl SimpleTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl Translator for SimpleTranslator {
    fn translate(&self, words: &[String]) -> String {
        if words.is_empty() {
            return NO_SIGNS_MESSAGE.to_string();
        }

        let lowered = words.join(" ").to_lowercase();
        let mut chars = lowered.chars();
        let mut sentence = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => return lowered,
        };

        if !sentence.ends_with('.') {
            sentence.push('.');
        }
        sentence
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}
