//! Axum route handlers for brag-sheet drafts and submissions.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::brag_sheet::BragSheetRow;
use crate::state::AppState;
use crate::wizard::machine::total_steps;
use crate::wizard::schema::{
    student_visible, validate_complete, BragSheetSubmission, FieldError, Role, WizardForm,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBragSheetRequest {
    pub student_id: Uuid,
    #[serde(flatten)]
    pub submission: BragSheetSubmission,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBragSheetResponse {
    pub brag_sheet_id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftRequest {
    pub role: Role,
    pub values: WizardForm,
    pub step: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftResponse {
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AudienceQuery {
    pub audience: Option<Role>,
}

fn joined(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/brag-sheets
///
/// Complete role-tagged submission. The student variant cannot carry
/// counselor-tier fields by construction; validation is re-run server-side
/// on the narrative bounds before the upsert.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(request): Json<SubmitBragSheetRequest>,
) -> Result<Json<SubmitBragSheetResponse>, AppError> {
    let role = request.submission.role();

    // Re-validate the payload through the same schema the wizard uses.
    if let Err(errors) = validate_complete(&request.submission.to_form(), role) {
        return Err(AppError::Validation(joined(&errors)));
    }

    let answers_json = serde_json::to_value(&request.submission)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize submission: {e}")))?;
    let role_str = match role {
        Role::Student => "student",
        Role::Counselor => "counselor",
    };
    let submitted_at = Utc::now();
    let final_step = total_steps(role) as i16;

    let row = sqlx::query_as::<_, BragSheetRow>(
        r#"
        INSERT INTO brag_sheets (id, student_id, role, answers, draft_step, submitted_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        ON CONFLICT (student_id) DO UPDATE
            SET role = $3, answers = $4, draft_step = $5, submitted_at = $6, updated_at = $6
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.student_id)
    .bind(role_str)
    .bind(&answers_json)
    .bind(final_step)
    .bind(submitted_at)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(SubmitBragSheetResponse {
        brag_sheet_id: row.id,
        submitted_at,
    }))
}

/// PUT /api/v1/brag-sheets/:student_id/draft
///
/// Wizard draft autosave: raw in-progress values plus the step to resume
/// from. No validation — drafts may be arbitrarily incomplete.
pub async fn handle_save_draft(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(request): Json<SaveDraftRequest>,
) -> Result<Json<SaveDraftResponse>, AppError> {
    let step = request.step.clamp(1, total_steps(request.role)) as i16;
    let values = serde_json::to_value(&request.values)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize draft: {e}")))?;
    let role_str = match request.role {
        Role::Student => "student",
        Role::Counselor => "counselor",
    };
    let saved_at = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO brag_sheets (id, student_id, role, answers, draft_step, submitted_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NULL, $6)
        ON CONFLICT (student_id) DO UPDATE
            SET role = $3, answers = $4, draft_step = $5, updated_at = $6
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(student_id)
    .bind(role_str)
    .bind(&values)
    .bind(step)
    .bind(saved_at)
    .execute(&state.db)
    .await?;

    Ok(Json(SaveDraftResponse { saved_at }))
}

/// GET /api/v1/brag-sheets/:student_id?audience=
///
/// Returns the stored brag sheet. For a student-facing audience the
/// counselor-tier fields are stripped before the row leaves the server.
pub async fn handle_get_brag_sheet(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Query(query): Query<AudienceQuery>,
) -> Result<Json<BragSheetRow>, AppError> {
    let mut row =
        sqlx::query_as::<_, BragSheetRow>("SELECT * FROM brag_sheets WHERE student_id = $1")
            .bind(student_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Brag sheet for student {student_id} not found"))
            })?;

    if query.audience == Some(Role::Student) {
        row.answers = student_visible(&row.answers);
    }

    Ok(Json(row))
}
