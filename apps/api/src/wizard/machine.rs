#![allow(dead_code)]

//! Brag-Sheet Wizard state machine.
//!
//! Steps 1..=N where N is 3 for students and 4 for counselors; the terminal
//! state is "submitted". Next validates only the active step's required
//! fields, fires a best-effort draft autosave, and advances; Back is free;
//! Submit runs full-schema validation on the final step and hands the tagged
//! payload to the sink.
//!
//! All sink calls go through `&mut self` async methods, so an autosave or
//! submit can never overlap its predecessor on the same wizard instance.

use async_trait::async_trait;
use tracing::warn;

use crate::wizard::schema::{
    required_fields, validate_complete, validate_fields, BragSheetSubmission, FieldError, Role,
    WizardForm,
};

pub const STUDENT_TOTAL_STEPS: u8 = 3;
pub const COUNSELOR_TOTAL_STEPS: u8 = 4;

pub fn total_steps(role: Role) -> u8 {
    match role {
        Role::Student => STUDENT_TOTAL_STEPS,
        Role::Counselor => COUNSELOR_TOTAL_STEPS,
    }
}

/// Persistence collaborator for the wizard. Draft saves are best-effort;
/// submit failures keep the user on the review step with state intact.
#[async_trait]
pub trait DraftSink: Send + Sync {
    async fn save_draft(&self, form: &WizardForm, next_step: u8) -> anyhow::Result<()>;
    async fn submit(&self, submission: &BragSheetSubmission) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    Advanced { step: u8 },
    Rejected { errors: Vec<FieldError> },
    /// Already on the final step — use submit.
    AtFinalStep,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted,
    Rejected { errors: Vec<FieldError> },
    /// Sink failed; the user stays on the review step and may retry.
    Failed,
    NotOnFinalStep,
    AlreadySubmitted,
}

pub struct BragSheetWizard<S: DraftSink> {
    role: Role,
    step: u8,
    form: WizardForm,
    errors: Vec<FieldError>,
    submitting: bool,
    submitted: bool,
    sink: S,
}

impl<S: DraftSink> BragSheetWizard<S> {
    /// Opens the wizard at step 1 with empty values.
    pub fn new(role: Role, sink: S) -> Self {
        Self::resume(role, WizardForm::default(), 1, sink)
    }

    /// Opens the wizard from a saved draft. The saved step is clamped into
    /// `[1, total_steps(role)]` so a stale draft can never land out of range.
    pub fn resume(role: Role, form: WizardForm, saved_step: u8, sink: S) -> Self {
        Self {
            role,
            step: saved_step.clamp(1, total_steps(role)),
            form,
            errors: Vec::new(),
            submitting: false,
            submitted: false,
            sink,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn current_step(&self) -> u8 {
        self.step
    }

    pub fn total_steps(&self) -> u8 {
        total_steps(self.role)
    }

    pub fn is_final_step(&self) -> bool {
        self.step == self.total_steps()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Field errors from the most recent Next/Submit attempt.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn form(&self) -> &WizardForm {
        &self.form
    }

    /// The caller edits form values directly between transitions.
    pub fn form_mut(&mut self) -> &mut WizardForm {
        &mut self.form
    }

    /// Validates the active step's required fields and advances on success.
    /// The draft autosave is best-effort: a sink failure is logged and the
    /// step still advances.
    pub async fn next(&mut self) -> NextOutcome {
        if self.is_final_step() {
            return NextOutcome::AtFinalStep;
        }

        let fields = required_fields(self.role, self.step);
        let errors = validate_fields(&self.form, fields);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return NextOutcome::Rejected { errors };
        }

        let next_step = self.step + 1;
        if let Err(e) = self.sink.save_draft(&self.form, next_step).await {
            warn!("Draft autosave failed (continuing): {e}");
        }

        self.errors.clear();
        self.step = next_step;
        NextOutcome::Advanced { step: self.step }
    }

    /// Moves back one step; no validation required.
    pub fn back(&mut self) {
        if self.step > 1 {
            self.step -= 1;
        }
    }

    /// Full-schema validation and submission. Only enabled on the final
    /// step; a sink failure leaves the form state intact for retry.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.submitted {
            return SubmitOutcome::AlreadySubmitted;
        }
        if !self.is_final_step() {
            return SubmitOutcome::NotOnFinalStep;
        }

        let submission = match validate_complete(&self.form, self.role) {
            Ok(s) => s,
            Err(errors) => {
                self.errors = errors.clone();
                return SubmitOutcome::Rejected { errors };
            }
        };

        self.submitting = true;
        let result = self.sink.submit(&submission).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.errors.clear();
                self.submitted = true;
                SubmitOutcome::Submitted
            }
            Err(e) => {
                warn!("Brag sheet submit failed: {e}");
                SubmitOutcome::Failed
            }
        }
    }
}
