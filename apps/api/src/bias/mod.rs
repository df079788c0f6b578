//! Bias Lexicon — flagged words with suggested alternatives and a rationale.
//!
//! The lexicon is an immutable table built once at startup and injected into
//! callers through `AppState` — nothing reads it as ambient global state.
//! Definition order is significant: the system prompt takes the first N words
//! in this order, and findings are reported in this order.

use serde::Serialize;

/// One lexicon entry: a word to avoid, what to reach for instead, and why.
#[derive(Debug, Clone)]
pub struct BiasEntry {
    pub word: &'static str,
    pub suggestions: &'static [&'static str],
    pub note: &'static str,
}

/// A flagged word found in letter content. Derived transiently — recomputed
/// on every content change, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BiasFinding {
    pub word: String,
    pub suggestions: Vec<String>,
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct BiasLexicon {
    entries: Vec<BiasEntry>,
}

impl BiasLexicon {
    /// The built-in lexicon used by the letter studio.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                BiasEntry {
                    word: "hardworking",
                    suggestions: &["diligent", "industrious"],
                    note: "Consider achievement language",
                },
                BiasEntry {
                    word: "helpful",
                    suggestions: &["collaborative", "contributes to team success"],
                    note: "Be specific",
                },
                BiasEntry {
                    word: "quiet",
                    suggestions: &["thoughtful", "observant", "reflective"],
                    note: "May undervalue introverted strengths",
                },
                BiasEntry {
                    word: "aggressive",
                    suggestions: &["assertive", "driven", "ambitious"],
                    note: "Can carry negative connotation",
                },
                BiasEntry {
                    word: "bossy",
                    suggestions: &["demonstrates leadership", "takes initiative"],
                    note: "Consider leadership framing",
                },
                BiasEntry {
                    word: "emotional",
                    suggestions: &["passionate", "invested", "empathetic"],
                    note: "Consider context",
                },
            ],
        }
    }

    pub fn entries(&self) -> &[BiasEntry] {
        &self.entries
    }

    /// First `n` flagged words in definition order, for the system prompt's
    /// discouraged-word list.
    pub fn discouraged_words(&self, n: usize) -> Vec<&'static str> {
        self.entries.iter().take(n).map(|e| e.word).collect()
    }

    /// Case-insensitive substring scan of `content` against every entry.
    /// Findings come back in lexicon definition order.
    pub fn find(&self, content: &str) -> Vec<BiasFinding> {
        let lower = content.to_lowercase();
        self.entries
            .iter()
            .filter(|e| lower.contains(e.word))
            .map(|e| BiasFinding {
                word: e.word.to_string(),
                suggestions: e.suggestions.iter().map(|s| s.to_string()).collect(),
                note: e.note.to_string(),
            })
            .collect()
    }
}
