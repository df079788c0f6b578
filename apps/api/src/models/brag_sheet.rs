#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Counselor's ordinal rating of the student. Counselor-tier: never rendered
/// in a student-facing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentRating {
    // serde's snake_case does not insert an underscore before digits
    // ("top1_percent"); rename explicitly to match the spec wire format.
    #[serde(rename = "top_1_percent")]
    Top1Percent,
    #[serde(rename = "top_5_percent")]
    Top5Percent,
    #[serde(rename = "top_10_percent")]
    Top10Percent,
    Average,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anecdote {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub role: String,
    pub years: u32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Award {
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
}

/// The full brag-sheet material available to the letter studio and the
/// prompt builder. Every narrative field is optional — the builder renders a
/// literal placeholder for anything missing rather than omitting the section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BragSheetProfile {
    #[serde(default)]
    pub three_words: Vec<String>,
    pub intellectual_spark: Option<String>,
    pub unseen_factor: Option<String>,
    pub struggle_story: Option<String>,
    pub leadership_moment: Option<String>,
    pub classroom_interaction: Option<String>,
    #[serde(default)]
    pub key_anecdotes: Vec<Anecdote>,
    pub counselor_rating: Option<StudentRating>,
    pub transcript_notes: Option<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub awards: Vec<Award>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BragSheetRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub role: String,
    pub answers: Value,
    pub draft_step: i16,
    pub submitted_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&StudentRating::Top5Percent).unwrap(),
            "\"top_5_percent\""
        );
    }

    #[test]
    fn test_profile_tolerates_missing_optional_fields() {
        let profile: BragSheetProfile =
            serde_json::from_str(r#"{"threeWords": ["curious"]}"#).unwrap();
        assert_eq!(profile.three_words, vec!["curious"]);
        assert!(profile.intellectual_spark.is_none());
        assert!(profile.activities.is_empty());
        assert!(profile.counselor_rating.is_none());
    }
}
