//! Fuzzy command matcher - resolves free text and emoji to canonical commands

use crate::domain::entities::{CanonicalCommand, CommandMatch, Vocabulary};

/// Default acceptance threshold. Low enough that a single-character typo on a
/// short word still matches ("halp" vs "help" scores 0.75), high enough that
/// unrelated words fall through.
pub const DEFAULT_THRESHOLD: f64 = 0.72;

fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Resolves raw user input against the command vocabulary.
///
/// Pure: same input, vocabulary, threshold and similarity function always
/// produce the same match. Exact alias and emoji lookups short-circuit at
/// confidence 1.0 before any fuzzy scoring; emoji are never edit-distanced.
pub struct CommandMatcher {
    vocabulary: Vocabulary,
    threshold: f64,
    similarity: fn(&str, &str) -> f64,
}

impl CommandMatcher {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            threshold: DEFAULT_THRESHOLD,
            similarity: levenshtein_similarity,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_similarity(mut self, similarity: fn(&str, &str) -> f64) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Match raw input against the vocabulary.
    pub fn match_input(&self, input_raw: &str) -> CommandMatch {
        let trimmed = input_raw.trim().to_lowercase();

        // Exact lookup on the otherwise untouched input first; this is the
        // only path emoji (and punctuation aliases like "?") can take.
        if let Some(command) = self.vocabulary.exact(&trimmed) {
            return CommandMatch {
                input_raw: input_raw.to_string(),
                command: Some(command),
                confidence: 1.0,
            };
        }

        let normalized = normalize(&trimmed);
        if normalized.is_empty() {
            return CommandMatch {
                input_raw: input_raw.to_string(),
                command: None,
                confidence: 0.0,
            };
        }
        if let Some(command) = self.vocabulary.exact(&normalized) {
            return CommandMatch {
                input_raw: input_raw.to_string(),
                command: Some(command),
                confidence: 1.0,
            };
        }

        // Fuzzy pass over every label and alias. Candidates come in
        // lexicographic command order and only a strictly better score
        // replaces the current best, so ties resolve to the
        // lexicographically smaller label.
        let mut best: Option<CanonicalCommand> = None;
        let mut best_score = 0.0_f64;
        for (command, term) in self.vocabulary.candidates() {
            let score = (self.similarity)(&normalized, term);
            if score > best_score {
                best_score = score;
                best = Some(command);
            }
        }

        let command = best.filter(|_| best_score >= self.threshold);
        CommandMatch {
            input_raw: input_raw.to_string(),
            command,
            confidence: best_score,
        }
    }
}

impl Default for CommandMatcher {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

/// Lowercase input with punctuation stripped and whitespace collapsed.
fn normalize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
