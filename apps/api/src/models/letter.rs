#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rhetorical register selector for generated letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tone {
    Warm,
    Academic,
    Advocacy,
}

/// Thematic emphasis selector for generated letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Angle {
    Resilience,
    Stem,
    Community,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Warm => "WARM",
            Tone::Academic => "ACADEMIC",
            Tone::Advocacy => "ADVOCACY",
        }
    }
}

impl Angle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Angle::Resilience => "RESILIENCE",
            Angle::Stem => "STEM",
            Angle::Community => "COMMUNITY",
        }
    }
}

/// Workflow status of a letter as shown on the triage dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterStatus {
    Blocked,
    Draft,
    Review,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LetterRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub content: String,
    pub tone: String,
    pub angle: String,
    pub status: String,
    pub deadline: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}
