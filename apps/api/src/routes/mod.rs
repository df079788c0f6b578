pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::letters::handlers as letter_handlers;
use crate::state::AppState;
use crate::triage::handlers as triage_handlers;
use crate::wizard::handlers as wizard_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation
        .route("/api/v1/ai/generate", post(letter_handlers::handle_generate))
        // Brag sheets
        .route("/api/v1/brag-sheets", post(wizard_handlers::handle_submit))
        .route(
            "/api/v1/brag-sheets/:student_id",
            get(wizard_handlers::handle_get_brag_sheet),
        )
        .route(
            "/api/v1/brag-sheets/:student_id/draft",
            put(wizard_handlers::handle_save_draft),
        )
        // Letter studio
        .route(
            "/api/v1/students/:student_id/letter",
            get(letter_handlers::handle_get_studio),
        )
        .route(
            "/api/v1/letters/:letter_id",
            put(letter_handlers::handle_autosave_letter),
        )
        // Dashboard
        .route(
            "/api/v1/dashboard/triage",
            get(triage_handlers::handle_triage),
        )
        .with_state(state)
}
