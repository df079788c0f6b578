#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Student identity snapshot as it travels through the generation pipeline.
/// Owned by the persistence collaborator; immutable from this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub first_name: String,
    pub last_name: String,
    pub grade: u8,
    pub gpa: Option<f64>,
}

impl StudentProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub grade_level: i16,
    pub gpa: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentRow {
    pub fn profile(&self) -> StudentProfile {
        StudentProfile {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            grade: self.grade_level.max(0) as u8,
            gpa: self.gpa,
        }
    }
}
