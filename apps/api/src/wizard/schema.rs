//! Brag-sheet validation schema.
//!
//! Two visibility tiers: student answers (seen by both roles) and counselor
//! metadata (counselor-only). The submission type is a tagged union keyed by
//! role, so a student submission cannot carry counselor-tier fields by
//! construction, and a `student_visible` projection strips them from any
//! stored answer set before it reaches a student-facing rendering context.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::brag_sheet::StudentRating;

pub const FIELD_THREE_WORDS: &str = "threeWords";
pub const FIELD_INTELLECTUAL_SPARK: &str = "intellectualSpark";
pub const FIELD_UNSEEN_FACTOR: &str = "unseenFactor";
pub const FIELD_STRUGGLE_STORY: &str = "struggleStory";
pub const FIELD_LEADERSHIP_MOMENT: &str = "leadershipMoment";
pub const FIELD_CLASSROOM_INTERACTION: &str = "classroomInteraction";
pub const FIELD_STUDENT_RATING: &str = "studentRating";
pub const FIELD_COUNSELOR_NOTES: &str = "counselorNotes";

/// Narrative fields must carry real detail; the three-word field is short.
const NARRATIVE_MIN: usize = 50;
const NARRATIVE_MAX: usize = 2000;
const THREE_WORDS_MIN: usize = 3;
const THREE_WORDS_MAX: usize = 100;
const NOTES_MAX: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Counselor,
}

/// In-progress form values. Everything is allowed to be empty while the
/// user is still typing; validation applies per step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardForm {
    pub three_words: String,
    pub intellectual_spark: String,
    pub unseen_factor: String,
    pub struggle_story: String,
    pub leadership_moment: String,
    pub classroom_interaction: String,
    pub student_rating: Option<StudentRating>,
    pub is_first_gen_low_income: bool,
    pub counselor_notes: String,
}

/// A per-field validation failure, surfaced inline next to the field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Student-tier answers — the validated narrative payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAnswers {
    pub three_words: String,
    pub intellectual_spark: String,
    pub unseen_factor: String,
    pub struggle_story: String,
    pub leadership_moment: String,
    pub classroom_interaction: String,
}

/// Counselor-tier metadata — never exposed to student-facing contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounselorAnswers {
    pub student_rating: StudentRating,
    #[serde(default)]
    pub is_first_gen_low_income: bool,
    #[serde(default)]
    pub counselor_notes: String,
}

/// Complete validated submission, tagged by the submitting role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum BragSheetSubmission {
    Student {
        #[serde(flatten)]
        answers: StudentAnswers,
    },
    Counselor {
        #[serde(flatten)]
        answers: StudentAnswers,
        #[serde(flatten)]
        metadata: CounselorAnswers,
    },
}

impl BragSheetSubmission {
    pub fn role(&self) -> Role {
        match self {
            BragSheetSubmission::Student { .. } => Role::Student,
            BragSheetSubmission::Counselor { .. } => Role::Counselor,
        }
    }

    pub fn answers(&self) -> &StudentAnswers {
        match self {
            BragSheetSubmission::Student { answers } => answers,
            BragSheetSubmission::Counselor { answers, .. } => answers,
        }
    }

    /// Re-expands the submission into form values so the server can run it
    /// back through the same schema the wizard validates with.
    pub fn to_form(&self) -> WizardForm {
        let answers = self.answers();
        let mut form = WizardForm {
            three_words: answers.three_words.clone(),
            intellectual_spark: answers.intellectual_spark.clone(),
            unseen_factor: answers.unseen_factor.clone(),
            struggle_story: answers.struggle_story.clone(),
            leadership_moment: answers.leadership_moment.clone(),
            classroom_interaction: answers.classroom_interaction.clone(),
            ..WizardForm::default()
        };
        if let BragSheetSubmission::Counselor { metadata, .. } = self {
            form.student_rating = Some(metadata.student_rating);
            form.is_first_gen_low_income = metadata.is_first_gen_low_income;
            form.counselor_notes = metadata.counselor_notes.clone();
        }
        form
    }
}

/// Required-field lookup keyed by (role, step). The final review step for
/// each role has no required fields and always validates.
pub fn required_fields(role: Role, step: u8) -> &'static [&'static str] {
    match (step, role) {
        (1, _) => &[
            FIELD_THREE_WORDS,
            FIELD_INTELLECTUAL_SPARK,
            FIELD_UNSEEN_FACTOR,
        ],
        (2, _) => &[
            FIELD_STRUGGLE_STORY,
            FIELD_LEADERSHIP_MOMENT,
            FIELD_CLASSROOM_INTERACTION,
        ],
        (3, Role::Counselor) => &[FIELD_STUDENT_RATING],
        _ => &[],
    }
}

fn check_narrative(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    let len = value.chars().count();
    if len < NARRATIVE_MIN {
        errors.push(FieldError {
            field,
            message: format!("Please provide more detail (at least {NARRATIVE_MIN} characters)"),
        });
    } else if len > NARRATIVE_MAX {
        errors.push(FieldError {
            field,
            message: format!("Please keep your response under {NARRATIVE_MAX} characters"),
        });
    }
}

fn check_field(field: &'static str, form: &WizardForm, errors: &mut Vec<FieldError>) {
    match field {
        FIELD_THREE_WORDS => {
            let len = form.three_words.chars().count();
            if len < THREE_WORDS_MIN {
                errors.push(FieldError {
                    field,
                    message: format!("Please provide at least {THREE_WORDS_MIN} characters"),
                });
            } else if len > THREE_WORDS_MAX {
                errors.push(FieldError {
                    field,
                    message: format!(
                        "Please keep your response under {THREE_WORDS_MAX} characters"
                    ),
                });
            }
        }
        FIELD_INTELLECTUAL_SPARK => check_narrative(field, &form.intellectual_spark, errors),
        FIELD_UNSEEN_FACTOR => check_narrative(field, &form.unseen_factor, errors),
        FIELD_STRUGGLE_STORY => check_narrative(field, &form.struggle_story, errors),
        FIELD_LEADERSHIP_MOMENT => check_narrative(field, &form.leadership_moment, errors),
        FIELD_CLASSROOM_INTERACTION => check_narrative(field, &form.classroom_interaction, errors),
        FIELD_STUDENT_RATING => {
            if form.student_rating.is_none() {
                errors.push(FieldError {
                    field,
                    message: "Please select a rating".to_string(),
                });
            }
        }
        FIELD_COUNSELOR_NOTES => {
            if form.counselor_notes.chars().count() > NOTES_MAX {
                errors.push(FieldError {
                    field,
                    message: format!("Please keep your notes under {NOTES_MAX} characters"),
                });
            }
        }
        _ => {}
    }
}

/// Validates only the given field set. An empty set always passes.
pub fn validate_fields(form: &WizardForm, fields: &[&'static str]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for field in fields {
        check_field(field, form, &mut errors);
    }
    errors
}

/// Full-schema validation across all fields for the role; on success,
/// produces the role-tagged submission payload.
pub fn validate_complete(
    form: &WizardForm,
    role: Role,
) -> Result<BragSheetSubmission, Vec<FieldError>> {
    let mut fields: Vec<&'static str> = vec![
        FIELD_THREE_WORDS,
        FIELD_INTELLECTUAL_SPARK,
        FIELD_UNSEEN_FACTOR,
        FIELD_STRUGGLE_STORY,
        FIELD_LEADERSHIP_MOMENT,
        FIELD_CLASSROOM_INTERACTION,
    ];
    if role == Role::Counselor {
        fields.push(FIELD_STUDENT_RATING);
        fields.push(FIELD_COUNSELOR_NOTES);
    }

    let errors = validate_fields(form, &fields);
    if !errors.is_empty() {
        return Err(errors);
    }

    let answers = StudentAnswers {
        three_words: form.three_words.clone(),
        intellectual_spark: form.intellectual_spark.clone(),
        unseen_factor: form.unseen_factor.clone(),
        struggle_story: form.struggle_story.clone(),
        leadership_moment: form.leadership_moment.clone(),
        classroom_interaction: form.classroom_interaction.clone(),
    };

    match role {
        Role::Student => Ok(BragSheetSubmission::Student { answers }),
        Role::Counselor => {
            let Some(student_rating) = form.student_rating else {
                return Err(vec![FieldError {
                    field: FIELD_STUDENT_RATING,
                    message: "Please select a rating".to_string(),
                }]);
            };
            Ok(BragSheetSubmission::Counselor {
                answers,
                metadata: CounselorAnswers {
                    student_rating,
                    is_first_gen_low_income: form.is_first_gen_low_income,
                    counselor_notes: form.counselor_notes.clone(),
                },
            })
        }
    }
}

/// Counselor-tier keys that must never reach a student-facing context.
const COUNSELOR_ONLY_KEYS: &[&str] = &[
    FIELD_STUDENT_RATING,
    "isFirstGenLowIncome",
    FIELD_COUNSELOR_NOTES,
];

/// Strips counselor-tier keys from a stored answer object for student-facing
/// rendering.
pub fn student_visible(answers: &Value) -> Value {
    let mut projected = answers.clone();
    if let Some(map) = projected.as_object_mut() {
        for key in COUNSELOR_ONLY_KEYS {
            map.remove(*key);
        }
    }
    projected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> WizardForm {
        let narrative = "x".repeat(60);
        WizardForm {
            three_words: "curious, resilient, kind".to_string(),
            intellectual_spark: narrative.clone(),
            unseen_factor: narrative.clone(),
            struggle_story: narrative.clone(),
            leadership_moment: narrative.clone(),
            classroom_interaction: narrative,
            student_rating: Some(StudentRating::Top10Percent),
            is_first_gen_low_income: true,
            counselor_notes: "solid candidate".to_string(),
        }
    }

    #[test]
    fn test_step_one_rejects_short_narrative() {
        let mut form = filled_form();
        form.intellectual_spark = "too short".to_string();
        let errors = validate_fields(&form, required_fields(Role::Student, 1));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, FIELD_INTELLECTUAL_SPARK);
    }

    #[test]
    fn test_step_one_rejects_overlong_narrative() {
        let mut form = filled_form();
        form.unseen_factor = "y".repeat(2001);
        let errors = validate_fields(&form, required_fields(Role::Student, 1));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, FIELD_UNSEEN_FACTOR);
    }

    #[test]
    fn test_three_words_bounds() {
        let mut form = filled_form();
        form.three_words = "ab".to_string();
        assert!(!validate_fields(&form, &[FIELD_THREE_WORDS]).is_empty());
        form.three_words = "abc".to_string();
        assert!(validate_fields(&form, &[FIELD_THREE_WORDS]).is_empty());
        form.three_words = "w".repeat(101);
        assert!(!validate_fields(&form, &[FIELD_THREE_WORDS]).is_empty());
    }

    #[test]
    fn test_counselor_step_requires_rating() {
        let mut form = filled_form();
        form.student_rating = None;
        let errors = validate_fields(&form, required_fields(Role::Counselor, 3));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, FIELD_STUDENT_RATING);
    }

    #[test]
    fn test_student_step_three_has_no_required_fields() {
        assert!(required_fields(Role::Student, 3).is_empty());
        assert!(required_fields(Role::Counselor, 4).is_empty());
    }

    #[test]
    fn test_complete_student_submission_carries_no_counselor_tier() {
        let submission = validate_complete(&filled_form(), Role::Student).unwrap();
        assert_eq!(submission.role(), Role::Student);
        let json = serde_json::to_value(&submission).unwrap();
        assert!(json.get(FIELD_STUDENT_RATING).is_none());
        assert!(json.get(FIELD_COUNSELOR_NOTES).is_none());
        assert_eq!(json["role"], "student");
    }

    #[test]
    fn test_complete_counselor_submission_round_trips() {
        let submission = validate_complete(&filled_form(), Role::Counselor).unwrap();
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["role"], "counselor");
        assert_eq!(json[FIELD_STUDENT_RATING], "top_10_percent");
        let parsed: BragSheetSubmission = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.role(), Role::Counselor);
    }

    #[test]
    fn test_counselor_submission_rejected_without_rating() {
        let mut form = filled_form();
        form.student_rating = None;
        let errors = validate_complete(&form, Role::Counselor).unwrap_err();
        assert!(errors.iter().any(|e| e.field == FIELD_STUDENT_RATING));
    }

    #[test]
    fn test_student_visible_strips_counselor_keys() {
        let submission = validate_complete(&filled_form(), Role::Counselor).unwrap();
        let stored = serde_json::to_value(&submission).unwrap();
        let projected = student_visible(&stored);
        assert!(projected.get(FIELD_STUDENT_RATING).is_none());
        assert!(projected.get("isFirstGenLowIncome").is_none());
        assert!(projected.get(FIELD_COUNSELOR_NOTES).is_none());
        assert!(projected.get(FIELD_INTELLECTUAL_SPARK).is_some());
    }
}
