#![allow(dead_code)]

//! Canvas state machine — the editable letter draft in the studio.
//!
//! Single-owner, event-driven: edits apply synchronously, generation is the
//! only suspended operation, and autosave collapses bursts of changes into
//! one save of the latest state via a fixed-delay debounce. Time is injected
//! as `DateTime<Utc>` arguments so the debounce is deterministic under test.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::bias::{BiasFinding, BiasLexicon};
use crate::models::letter::{Angle, Tone};

/// Debounce delay before an autosave fires after the last change.
const AUTOSAVE_DEBOUNCE_MS: i64 = 2000;

/// Derived length status against the fixed word-count thresholds.
/// 350 and 650 are inside Good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthStatus {
    Empty,
    Short,
    Good,
    Long,
}

impl LengthStatus {
    pub fn from_word_count(words: usize) -> Self {
        match words {
            0 => LengthStatus::Empty,
            n if n < 350 => LengthStatus::Short,
            n if n > 650 => LengthStatus::Long,
            _ => LengthStatus::Good,
        }
    }
}

/// What the debounced autosave hands to the persistence collaborator.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AutosavePayload {
    pub content: String,
    pub tone: Tone,
    pub angle: Angle,
}

#[derive(Debug, Error, PartialEq)]
pub enum CanvasError {
    #[error("a generation is already in flight")]
    GenerationInFlight,
}

/// The letter draft plus its studio-side interaction state.
#[derive(Debug, Clone)]
pub struct LetterCanvas {
    content: String,
    tone: Tone,
    angle: Angle,
    generating: bool,
    ferpa_acknowledged: bool,
    bias_dismissed: bool,
    last_saved: Option<DateTime<Utc>>,
    save_deadline: Option<DateTime<Utc>>,
}

impl LetterCanvas {
    pub fn new(content: String, tone: Tone, angle: Angle) -> Self {
        Self {
            content,
            tone,
            angle,
            generating: false,
            ferpa_acknowledged: false,
            bias_dismissed: false,
            last_saved: None,
            save_deadline: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    // ── Generation ──────────────────────────────────────────────────────

    /// Marks a generation in flight. A second generate action is rejected
    /// until the first one resolves.
    pub fn begin_generation(&mut self) -> Result<(), CanvasError> {
        if self.generating {
            return Err(CanvasError::GenerationInFlight);
        }
        self.generating = true;
        Ok(())
    }

    /// Replaces content wholesale with the generated text. The FERPA
    /// acknowledgement resets and the bias panel re-arms for the new content.
    pub fn generation_succeeded(&mut self, text: String, now: DateTime<Utc>) {
        self.content = text;
        self.ferpa_acknowledged = false;
        self.bias_dismissed = false;
        self.generating = false;
        self.touch(now);
    }

    /// Clears the busy indicator; prior content is preserved untouched.
    pub fn generation_failed(&mut self) {
        self.generating = false;
    }

    // ── Editing ─────────────────────────────────────────────────────────

    /// Direct text edit — applies synchronously and restarts the autosave
    /// debounce. Bias dismissal persists across manual edits.
    pub fn edit(&mut self, content: String, now: DateTime<Utc>) {
        self.content = content;
        self.touch(now);
    }

    pub fn set_tone(&mut self, tone: Tone, now: DateTime<Utc>) {
        self.tone = tone;
        self.touch(now);
    }

    pub fn set_angle(&mut self, angle: Angle, now: DateTime<Utc>) {
        self.angle = angle;
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.save_deadline = Some(now + Duration::milliseconds(AUTOSAVE_DEBOUNCE_MS));
    }

    // ── Autosave ────────────────────────────────────────────────────────

    /// Returns the pending save payload if the debounce window has elapsed.
    /// Fires at most once per quiet period, always with the latest state,
    /// and only when there is content to save.
    pub fn poll_autosave(&mut self, now: DateTime<Utc>) -> Option<AutosavePayload> {
        let deadline = self.save_deadline?;
        if now < deadline {
            return None;
        }
        self.save_deadline = None;
        if self.content.is_empty() {
            return None;
        }
        self.last_saved = Some(now);
        Some(AutosavePayload {
            content: self.content.clone(),
            tone: self.tone,
            angle: self.angle,
        })
    }

    // ── Derived state ───────────────────────────────────────────────────

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    pub fn length_status(&self) -> LengthStatus {
        LengthStatus::from_word_count(self.word_count())
    }

    /// Fraction of the 500-word target reached, capped at 1.0.
    pub fn progress(&self) -> f64 {
        (self.word_count() as f64 / 500.0).min(1.0)
    }

    // ── Bias review ─────────────────────────────────────────────────────

    pub fn bias_findings(&self, lexicon: &BiasLexicon) -> Vec<BiasFinding> {
        if self.bias_dismissed {
            return vec![];
        }
        lexicon.find(&self.content)
    }

    pub fn dismiss_bias(&mut self) {
        self.bias_dismissed = true;
    }

    // ── Export gate ─────────────────────────────────────────────────────

    /// Manual user confirmation — a checkbox, not an automated scan.
    pub fn acknowledge_ferpa(&mut self) {
        self.ferpa_acknowledged = true;
    }

    pub fn ferpa_acknowledged(&self) -> bool {
        self.ferpa_acknowledged
    }

    /// Export is enabled only once FERPA is acknowledged and there is
    /// content to export.
    pub fn can_export(&self) -> bool {
        self.ferpa_acknowledged && !self.content.is_empty()
    }
}
