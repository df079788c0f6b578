//! Axum route handlers for the Letter Studio API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::letters::generator::{generate_letter, GenerateLetterRequest, GeneratedLetter};
use crate::models::brag_sheet::BragSheetRow;
use crate::models::letter::{Angle, LetterRow, Tone};
use crate::models::student::StudentRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StudioPayload {
    pub student: StudentRow,
    pub brag_sheet: Option<BragSheetRow>,
    pub letter: Option<LetterRow>,
}

#[derive(Debug, Deserialize)]
pub struct AutosaveLetterRequest {
    pub content: String,
    pub tone: Tone,
    pub angle: Angle,
}

#[derive(Debug, Serialize)]
pub struct AutosaveLetterResponse {
    pub saved_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ai/generate
///
/// Body: `{ student, bragSheet, tone, angle }` — all four required; a
/// missing or malformed field is a 400, a provider failure a 500, both with
/// a flat `{ error }` payload.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GeneratedLetter>, AppError> {
    for field in ["student", "bragSheet", "tone", "angle"] {
        if body.get(field).is_none() {
            return Err(AppError::Validation("Missing required fields".to_string()));
        }
    }

    let request: GenerateLetterRequest = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))?;

    let generated = generate_letter(&state.llm, &state.lexicon, &request).await?;
    Ok(Json(generated))
}

/// GET /api/v1/students/:student_id/letter
///
/// Studio payload: the student plus their brag sheet and letter, if present.
/// An unknown student is a terminal not-found for that navigation.
pub async fn handle_get_studio(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudioPayload>, AppError> {
    let student = sqlx::query_as::<_, StudentRow>("SELECT * FROM students WHERE id = $1")
        .bind(student_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;

    let brag_sheet =
        sqlx::query_as::<_, BragSheetRow>("SELECT * FROM brag_sheets WHERE student_id = $1")
            .bind(student_id)
            .fetch_optional(&state.db)
            .await?;

    let letter = sqlx::query_as::<_, LetterRow>(
        "SELECT * FROM letters WHERE student_id = $1 ORDER BY updated_at DESC LIMIT 1",
    )
    .bind(student_id)
    .fetch_optional(&state.db)
    .await?;

    Ok(Json(StudioPayload {
        student,
        brag_sheet,
        letter,
    }))
}

/// PUT /api/v1/letters/:letter_id
///
/// Debounced letter autosave from the canvas: latest content, tone, and
/// angle. Last write wins; cross-session conflict resolution belongs to the
/// persistence collaborator.
pub async fn handle_autosave_letter(
    State(state): State<AppState>,
    Path(letter_id): Path<Uuid>,
    Json(request): Json<AutosaveLetterRequest>,
) -> Result<Json<AutosaveLetterResponse>, AppError> {
    let saved_at = Utc::now();

    let result = sqlx::query(
        "UPDATE letters SET content = $1, tone = $2, angle = $3, updated_at = $4 WHERE id = $5",
    )
    .bind(&request.content)
    .bind(request.tone.as_str())
    .bind(request.angle.as_str())
    .bind(saved_at)
    .bind(letter_id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Letter {letter_id} not found")));
    }

    Ok(Json(AutosaveLetterResponse { saved_at }))
}
