#![allow(dead_code)]

//! Context-panel snippets — brag-sheet facts surfaced as one-click inserts.
//!
//! Snippet identity is a stable key (field + index), not the snippet text:
//! two different facts can coincidentally share the same wording, and each
//! must remain insertable independently.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::brag_sheet::BragSheetProfile;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase", tag = "field", content = "index")]
pub enum SnippetKey {
    ThreeWord(usize),
    IntellectualSpark,
    UnseenFactor,
    StruggleStory,
    LeadershipMoment,
    ClassroomInteraction,
    Anecdote(usize),
    TranscriptNotes,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snippet {
    pub key: SnippetKey,
    pub title: String,
    pub content: String,
}

/// Flattens the brag sheet into the insertable snippet list, in panel order.
/// Empty fields produce no snippet.
pub fn collect_snippets(brag: &BragSheetProfile) -> Vec<Snippet> {
    let mut snippets = Vec::new();

    for (i, word) in brag.three_words.iter().enumerate() {
        snippets.push(Snippet {
            key: SnippetKey::ThreeWord(i),
            title: "Three Words".to_string(),
            content: word.clone(),
        });
    }

    push_field(
        &mut snippets,
        SnippetKey::IntellectualSpark,
        "Intellectual Spark",
        &brag.intellectual_spark,
    );
    push_field(
        &mut snippets,
        SnippetKey::UnseenFactor,
        "Unseen Factor",
        &brag.unseen_factor,
    );
    push_field(
        &mut snippets,
        SnippetKey::StruggleStory,
        "Struggle Story",
        &brag.struggle_story,
    );
    push_field(
        &mut snippets,
        SnippetKey::LeadershipMoment,
        "Leadership Moment",
        &brag.leadership_moment,
    );
    push_field(
        &mut snippets,
        SnippetKey::ClassroomInteraction,
        "Classroom Interaction",
        &brag.classroom_interaction,
    );

    for (i, anecdote) in brag.key_anecdotes.iter().enumerate() {
        snippets.push(Snippet {
            key: SnippetKey::Anecdote(i),
            title: anecdote.title.clone(),
            content: anecdote.description.clone(),
        });
    }

    push_field(
        &mut snippets,
        SnippetKey::TranscriptNotes,
        "Transcript Highlights",
        &brag.transcript_notes,
    );

    snippets
}

fn push_field(snippets: &mut Vec<Snippet>, key: SnippetKey, title: &str, value: &Option<String>) {
    if let Some(text) = value.as_deref().filter(|t| !t.trim().is_empty()) {
        snippets.push(Snippet {
            key,
            title: title.to_string(),
            content: text.to_string(),
        });
    }
}

/// Tracks which snippets have already been inserted into the letter.
#[derive(Debug, Default)]
pub struct SnippetTray {
    inserted: HashSet<SnippetKey>,
}

impl SnippetTray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_inserted(&self, key: &SnippetKey) -> bool {
        self.inserted.contains(key)
    }

    /// Returns the snippet content for insertion, or `None` if this snippet
    /// was already inserted once.
    pub fn insert<'a>(&mut self, snippet: &'a Snippet) -> Option<&'a str> {
        if !self.inserted.insert(snippet.key.clone()) {
            return None;
        }
        Some(&snippet.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::brag_sheet::Anecdote;

    fn brag_with(spark: Option<&str>, anecdotes: Vec<Anecdote>) -> BragSheetProfile {
        BragSheetProfile {
            three_words: vec!["curious".to_string(), "driven".to_string()],
            intellectual_spark: spark.map(str::to_string),
            unseen_factor: None,
            struggle_story: None,
            leadership_moment: None,
            classroom_interaction: None,
            key_anecdotes: anecdotes,
            counselor_rating: None,
            transcript_notes: None,
            activities: vec![],
            awards: vec![],
        }
    }

    #[test]
    fn test_collects_words_and_fields_in_panel_order() {
        let brag = brag_with(Some("Loves robotics"), vec![]);
        let snippets = collect_snippets(&brag);
        assert_eq!(snippets.len(), 3);
        assert_eq!(snippets[0].key, SnippetKey::ThreeWord(0));
        assert_eq!(snippets[2].key, SnippetKey::IntellectualSpark);
        assert_eq!(snippets[2].content, "Loves robotics");
    }

    #[test]
    fn test_empty_fields_produce_no_snippets() {
        let brag = brag_with(Some("   "), vec![]);
        let snippets = collect_snippets(&brag);
        assert!(snippets
            .iter()
            .all(|s| s.key != SnippetKey::IntellectualSpark));
    }

    #[test]
    fn test_insert_only_once_per_key() {
        let brag = brag_with(Some("Loves robotics"), vec![]);
        let snippets = collect_snippets(&brag);
        let mut tray = SnippetTray::new();
        assert_eq!(tray.insert(&snippets[2]), Some("Loves robotics"));
        assert_eq!(tray.insert(&snippets[2]), None);
        assert!(tray.is_inserted(&SnippetKey::IntellectualSpark));
    }

    #[test]
    fn test_duplicate_text_under_distinct_keys_stays_insertable() {
        let brag = brag_with(
            None,
            vec![
                Anecdote {
                    title: "First".to_string(),
                    description: "Helped a peer".to_string(),
                },
                Anecdote {
                    title: "Second".to_string(),
                    description: "Helped a peer".to_string(),
                },
            ],
        );
        let snippets = collect_snippets(&brag);
        let mut tray = SnippetTray::new();
        assert!(tray.insert(&snippets[2]).is_some());
        // Same wording, different fact — still insertable
        assert!(tray.insert(&snippets[3]).is_some());
    }
}
