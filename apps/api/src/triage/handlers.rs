//! Axum route handler for the triage dashboard.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::letter::LetterStatus;
use crate::state::AppState;
use crate::triage::{
    deadline_label, filter_and_sort, summarize, TriageCounts, TriageEntry, TriageFilter,
};

#[derive(Debug, Deserialize)]
pub struct TriageQuery {
    pub filter: Option<TriageFilter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageCard {
    #[serde(flatten)]
    pub entry: TriageEntry,
    pub deadline_label: String,
    pub urgent: bool,
}

#[derive(Debug, Serialize)]
pub struct TriageResponse {
    pub counts: TriageCounts,
    pub students: Vec<TriageCard>,
}

#[derive(Debug, FromRow)]
struct TriageRowRaw {
    student_id: Uuid,
    first_name: String,
    last_name: String,
    draft_step: Option<i16>,
    role: Option<String>,
    submitted: Option<bool>,
    status: Option<String>,
    deadline: Option<DateTime<Utc>>,
}

fn parse_status(raw: Option<&str>) -> LetterStatus {
    // A student with no letter row yet is waiting on material
    match raw {
        Some("DRAFT") => LetterStatus::Draft,
        Some("REVIEW") => LetterStatus::Review,
        Some("COMPLETED") => LetterStatus::Completed,
        _ => LetterStatus::Blocked,
    }
}

/// Brag-sheet completion as a coarse percentage of wizard steps reached;
/// a submitted sheet is always 100%.
fn completion_percent(draft_step: Option<i16>, role: Option<&str>, submitted: bool) -> u8 {
    if submitted {
        return 100;
    }
    let total = match role {
        Some("counselor") => 4,
        _ => 3,
    };
    let step = draft_step.unwrap_or(0).clamp(0, total) as u32;
    (step * 100 / total as u32) as u8
}

/// GET /api/v1/dashboard/triage?filter=
///
/// Derived counts plus the filtered, deadline-sorted student list.
pub async fn handle_triage(
    State(state): State<AppState>,
    Query(query): Query<TriageQuery>,
) -> Result<Json<TriageResponse>, AppError> {
    let rows = sqlx::query_as::<_, TriageRowRaw>(
        r#"
        SELECT s.id AS student_id,
               s.first_name,
               s.last_name,
               b.draft_step,
               b.role,
               (b.submitted_at IS NOT NULL) AS submitted,
               l.status,
               l.deadline
        FROM students s
        LEFT JOIN brag_sheets b ON b.student_id = s.id
        LEFT JOIN LATERAL (
            SELECT status, deadline FROM letters
            WHERE student_id = s.id
            ORDER BY updated_at DESC LIMIT 1
        ) l ON true
        ORDER BY s.created_at
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    let now = Utc::now();
    let entries: Vec<TriageEntry> = rows
        .into_iter()
        .map(|r| TriageEntry {
            student_id: r.student_id,
            first_name: r.first_name,
            last_name: r.last_name,
            completion_percent: completion_percent(
                r.draft_step,
                r.role.as_deref(),
                r.submitted.unwrap_or(false),
            ),
            status: parse_status(r.status.as_deref()),
            deadline: r.deadline,
        })
        .collect();

    let counts = summarize(&entries, now);
    let students = filter_and_sort(entries, query.filter, now)
        .into_iter()
        .map(|entry| {
            let (label, urgent) = deadline_label(entry.deadline, now);
            TriageCard {
                entry,
                deadline_label: label,
                urgent,
            }
        })
        .collect();

    Ok(Json(TriageResponse { counts, students }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_defaults_to_blocked() {
        assert_eq!(parse_status(Some("DRAFT")), LetterStatus::Draft);
        assert_eq!(parse_status(Some("COMPLETED")), LetterStatus::Completed);
        assert_eq!(parse_status(None), LetterStatus::Blocked);
        assert_eq!(parse_status(Some("unknown")), LetterStatus::Blocked);
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(None, None, false), 0);
        assert_eq!(completion_percent(Some(2), Some("student"), false), 66);
        assert_eq!(completion_percent(Some(2), Some("counselor"), false), 50);
        assert_eq!(completion_percent(Some(1), Some("counselor"), true), 100);
    }
}
