//! Letter generation — composes the two prompts and calls the model.
//!
//! Flow: build_system_prompt + build_user_prompt → LlmClient::call → text.
//! Every failure mode (transport error, provider error status, empty text)
//! collapses into `AppError::Generation`; the caller treats them uniformly
//! and leaves any prior letter content untouched.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bias::BiasLexicon;
use crate::errors::AppError;
use crate::letters::prompts::{build_system_prompt, build_user_prompt};
use crate::llm_client::{LlmClient, Usage};
use crate::models::brag_sheet::BragSheetProfile;
use crate::models::letter::{Angle, Tone};
use crate::models::student::StudentProfile;

/// Request body for letter generation. Constructed fresh per call — stateless.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLetterRequest {
    pub student: StudentProfile,
    pub brag_sheet: BragSheetProfile,
    pub tone: Tone,
    pub angle: Angle,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedLetter {
    pub letter: String,
    pub usage: Usage,
}

/// Runs one generation call. No retries — a failed call surfaces once and
/// the user decides whether to try again.
pub async fn generate_letter(
    llm: &LlmClient,
    lexicon: &BiasLexicon,
    request: &GenerateLetterRequest,
) -> Result<GeneratedLetter, AppError> {
    let system = build_system_prompt(lexicon);
    let prompt = build_user_prompt(&request.student, &request.brag_sheet, request.tone, request.angle);

    info!(
        "Generating letter for {} (tone={}, angle={})",
        request.student.full_name(),
        request.tone.as_str(),
        request.angle.as_str()
    );

    let response = llm
        .call(&prompt, &system)
        .await
        .map_err(|e| AppError::Generation(e.to_string()))?;

    let letter = response
        .text()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Generation("model returned empty content".to_string()))?
        .to_string();

    Ok(GeneratedLetter {
        letter,
        usage: response.usage,
    })
}
