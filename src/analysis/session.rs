// RecognizerSession - per-call de-duplication memory
//
// One session lives for exactly one recognition call. Sessions are never
// shared between calls, so concurrent requests cannot leak words into each
// other.

/// Accumulates accepted words for one recognition call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizerSession {
    last_emitted: Option<String>,
    words: Vec<String>,
}

impl RecognizerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted word
    ///
    /// The word is appended only if it differs from the previously accepted
    /// one. The memory is updated either way. Rejected windows must not be
    /// reported here, so a gap between two identical words still collapses
    /// them.
    ///
    /// # Returns
    /// `true` if the word was appended to the output
    pub fn observe(&mut self, word: &str) -> bool {
        let repeated = self.last_emitted.as_deref() == Some(word);
        if !repeated {
            self.words.push(word.to_string());
        }
        self.last_emitted = Some(word.to_string());
        !repeated
    }

    pub fn last_emitted(&self) -> Option<&str> {
        self.last_emitted.as_deref()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Finalize the word list
    ///
    /// An empty list is replaced by `[fallback]` when a fallback is given.
    ///
    /// # Returns
    /// Tuple of (words, whether the fallback was used)
    pub fn finish(self, fallback: Option<&str>) -> (Vec<String>, bool) {
        match fallback {
            Some(word) if self.words.is_empty() => (vec![word.to_string()], true),
            _ => (self.words, false),
        }
    }
}
