//! Prompt Builder — deterministic construction of the system and user
//! prompts for letter generation.
//!
//! Both builders are pure: identical inputs produce byte-identical strings
//! (no randomness, no clock reads), so generation requests are reproducible
//! under test. Missing optional fields render literal placeholders rather
//! than being omitted — the LLM-facing text depends on every section being
//! present.

use crate::bias::BiasLexicon;
use crate::models::brag_sheet::{BragSheetProfile, StudentRating};
use crate::models::letter::{Angle, Tone};
use crate::models::student::StudentProfile;

/// How many lexicon words the system prompt lists as discouraged.
const DISCOURAGED_WORD_COUNT: usize = 10;

fn tone_instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Warm => {
            "Write in a warm, personal tone. Use first-person perspective (\"I have had the pleasure...\").\n\
             Include personal observations and emotional connections. Make the reader feel they know this student."
        }
        Tone::Academic => {
            "Write in a formal, academic tone. Focus on intellectual achievements and academic potential.\n\
             Use precise language and specific metrics. Emphasize scholarly contributions and research potential."
        }
        Tone::Advocacy => {
            "Write with strong advocacy. This letter should leave no doubt about the student's exceptional qualities.\n\
             Use superlatives appropriately and make a compelling case. Emphasize unique circumstances and potential."
        }
    }
}

fn angle_instruction(angle: Angle) -> &'static str {
    match angle {
        Angle::Resilience => {
            "Focus on the student's ability to overcome challenges. Highlight growth, perseverance,\n\
             and transformation. Use the struggle story as a central narrative element."
        }
        Angle::Stem => {
            "Emphasize technical abilities, analytical thinking, and scientific contributions.\n\
             Highlight research, projects, and quantitative achievements. Use specific technical accomplishments."
        }
        Angle::Community => {
            "Focus on leadership, service, and impact on others. Highlight how the student\n\
             has improved their community and mentored peers. Emphasize collaborative abilities."
        }
    }
}

/// Maps the counselor's ordinal rating to the descriptive clause used in the
/// prompt. Absent rating falls back to a generic phrase.
pub fn humanize_rating(rating: Option<StudentRating>) -> &'static str {
    match rating {
        Some(StudentRating::Top1Percent) => "top 1% of students I have counseled in my career",
        Some(StudentRating::Top5Percent) => "top 5% of students I have worked with",
        Some(StudentRating::Top10Percent) => "top 10% of students in their class",
        Some(StudentRating::Average) => "a solid student among their peers",
        None => "a notable student",
    }
}

fn bias_avoidance_instruction(lexicon: &BiasLexicon) -> String {
    let words = lexicon.discouraged_words(DISCOURAGED_WORD_COUNT).join(", ");
    format!(
        "IMPORTANT: Avoid potentially biased language. Do NOT use words like: {words}.\n\
         Instead, use specific, achievement-focused language that demonstrates rather than describes."
    )
}

/// Builds the fixed system prompt: length target, structure guidance, FERPA
/// directive, and the discouraged-word list drawn from the lexicon.
pub fn build_system_prompt(lexicon: &BiasLexicon) -> String {
    format!(
        "You are an expert college counselor writing recommendation letters for college applications.\n\
         \n\
         Your letters should:\n\
         - Be 400-500 words (3-4 paragraphs)\n\
         - Include specific examples and anecdotes, not generic praise\n\
         - Feel authentic and personal, as if written by the counselor\n\
         - Follow FERPA guidelines (no sensitive medical/legal information)\n\
         - Be appropriate for college admissions committees\n\
         \n\
         {bias}\n\
         \n\
         Structure:\n\
         1. Opening: Establish relationship and context\n\
         2. Body (1-2 paragraphs): Specific stories and achievements\n\
         3. Closing: Clear ranking/recommendation and future potential",
        bias = bias_avoidance_instruction(lexicon)
    )
}

fn or_placeholder(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => s,
        _ => "Not provided",
    }
}

fn format_gpa(gpa: Option<f64>) -> String {
    gpa.map(|g| format!("{g:.2}")).unwrap_or_else(|| "N/A".to_string())
}

fn format_activities(brag: &BragSheetProfile) -> String {
    if brag.activities.is_empty() {
        return "No activities listed".to_string();
    }
    brag.activities
        .iter()
        .map(|a| {
            let plural = if a.years == 1 { "" } else { "s" };
            format!("- {}: {} ({} year{plural})", a.name, a.role, a.years)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_awards(brag: &BragSheetProfile) -> String {
    if brag.awards.is_empty() {
        return "No awards listed".to_string();
    }
    brag.awards
        .iter()
        .map(|a| format!("- {} ({})", a.name, a.year))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_anecdotes(brag: &BragSheetProfile) -> String {
    if brag.key_anecdotes.is_empty() {
        return "None provided".to_string();
    }
    brag.key_anecdotes
        .iter()
        .map(|a| format!("{}: {}", a.title, a.description))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_three_words(brag: &BragSheetProfile) -> String {
    if brag.three_words.is_empty() {
        "Not provided".to_string()
    } else {
        brag.three_words.join(", ")
    }
}

/// Builds the labeled-section user prompt carrying all context for one letter.
pub fn build_user_prompt(
    student: &StudentProfile,
    brag: &BragSheetProfile,
    tone: Tone,
    angle: Angle,
) -> String {
    format!(
        "Write a recommendation letter for {name}.\n\
         \n\
         === STUDENT PROFILE ===\n\
         Name: {name}\n\
         Grade: {grade}\n\
         GPA: {gpa}\n\
         Counselor Ranking: {ranking}\n\
         \n\
         === THE HOOK (What makes them memorable) ===\n\
         Three Words: {three_words}\n\
         Intellectual Spark: {spark}\n\
         Unseen Factor: {unseen}\n\
         \n\
         === THE PROOF (Stories that demonstrate character) ===\n\
         Struggle Story: {struggle}\n\
         \n\
         Leadership Moment: {leadership}\n\
         \n\
         Classroom Interaction: {classroom}\n\
         \n\
         Key Anecdotes:\n\
         {anecdotes}\n\
         \n\
         === ACADEMIC CONTEXT ===\n\
         Transcript Notes: {transcript}\n\
         \n\
         Activities:\n\
         {activities}\n\
         \n\
         Awards:\n\
         {awards}\n\
         \n\
         === LETTER REQUIREMENTS ===\n\
         Tone: {tone}\n\
         {tone_text}\n\
         \n\
         Angle: {angle}\n\
         {angle_text}\n\
         \n\
         Write the letter now. Focus on specific stories and achievements. Make it authentic and compelling.",
        name = student.full_name(),
        grade = student.grade,
        gpa = format_gpa(student.gpa),
        ranking = humanize_rating(brag.counselor_rating),
        three_words = format_three_words(brag),
        spark = or_placeholder(&brag.intellectual_spark),
        unseen = or_placeholder(&brag.unseen_factor),
        struggle = or_placeholder(&brag.struggle_story),
        leadership = or_placeholder(&brag.leadership_moment),
        classroom = or_placeholder(&brag.classroom_interaction),
        anecdotes = format_anecdotes(brag),
        transcript = or_placeholder(&brag.transcript_notes),
        activities = format_activities(brag),
        awards = format_awards(brag),
        tone = tone.as_str(),
        tone_text = tone_instruction(tone),
        angle = angle.as_str(),
        angle_text = angle_instruction(angle),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::brag_sheet::{Activity, Anecdote, Award};

    fn sample_student() -> StudentProfile {
        StudentProfile {
            first_name: "Marcus".to_string(),
            last_name: "Nguyen".to_string(),
            grade: 12,
            gpa: Some(3.856),
        }
    }

    fn sample_brag_sheet() -> BragSheetProfile {
        BragSheetProfile {
            three_words: vec![
                "curious".to_string(),
                "resilient".to_string(),
                "leader".to_string(),
            ],
            intellectual_spark: Some("Built a robot".to_string()),
            unseen_factor: Some("Cares for two younger siblings after school".to_string()),
            struggle_story: Some("Overcame funding challenges".to_string()),
            leadership_moment: Some("Led the robotics team".to_string()),
            classroom_interaction: Some("Explained recursion to the whole class".to_string()),
            key_anecdotes: vec![Anecdote {
                title: "Server Room".to_string(),
                description: "Debugged a complex issue overnight".to_string(),
            }],
            counselor_rating: Some(StudentRating::Top5Percent),
            transcript_notes: Some("Strong STEM focus".to_string()),
            activities: vec![Activity {
                name: "Robotics".to_string(),
                role: "Captain".to_string(),
                years: 4,
                description: "Led team".to_string(),
            }],
            awards: vec![Award {
                name: "Regional Champion".to_string(),
                year: 2024,
                description: String::new(),
            }],
        }
    }

    fn empty_brag_sheet() -> BragSheetProfile {
        BragSheetProfile {
            three_words: vec![],
            intellectual_spark: None,
            unseen_factor: None,
            struggle_story: None,
            leadership_moment: None,
            classroom_interaction: None,
            key_anecdotes: vec![],
            counselor_rating: None,
            transcript_notes: None,
            activities: vec![],
            awards: vec![],
        }
    }

    #[test]
    fn test_user_prompt_is_deterministic() {
        let student = sample_student();
        let brag = sample_brag_sheet();
        let a = build_user_prompt(&student, &brag, Tone::Warm, Angle::Stem);
        let b = build_user_prompt(&student, &brag, Tone::Warm, Angle::Stem);
        assert_eq!(a, b);
    }

    #[test]
    fn test_user_prompt_contains_joined_three_words() {
        let prompt = build_user_prompt(
            &sample_student(),
            &sample_brag_sheet(),
            Tone::Warm,
            Angle::Stem,
        );
        assert!(prompt.contains("Three Words: curious, resilient, leader"));
    }

    #[test]
    fn test_warm_stem_prompt_carries_spark_and_angle_text() {
        let prompt = build_user_prompt(
            &sample_student(),
            &sample_brag_sheet(),
            Tone::Warm,
            Angle::Stem,
        );
        assert!(prompt.contains("Built a robot"));
        assert!(prompt.contains(angle_instruction(Angle::Stem)));
    }

    #[test]
    fn test_changing_angle_changes_only_angle_portion() {
        let student = sample_student();
        let brag = sample_brag_sheet();
        let stem = build_user_prompt(&student, &brag, Tone::Warm, Angle::Stem);
        let community = build_user_prompt(&student, &brag, Tone::Warm, Angle::Community);

        let stem_prefix = stem.split("Angle:").next().unwrap();
        let community_prefix = community.split("Angle:").next().unwrap();
        assert_eq!(stem_prefix, community_prefix);
        assert!(stem.contains(angle_instruction(Angle::Stem)));
        assert!(community.contains(angle_instruction(Angle::Community)));
        assert!(!community.contains(angle_instruction(Angle::Stem)));
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let prompt =
            build_user_prompt(&sample_student(), &empty_brag_sheet(), Tone::Academic, Angle::Resilience);
        assert!(prompt.contains("Three Words: Not provided"));
        assert!(prompt.contains("Struggle Story: Not provided"));
        assert!(prompt.contains("No activities listed"));
        assert!(prompt.contains("No awards listed"));
        assert!(prompt.contains("None provided"));
        assert!(prompt.contains("Counselor Ranking: a notable student"));
    }

    #[test]
    fn test_gpa_formats_to_two_decimals_or_na() {
        let prompt = build_user_prompt(
            &sample_student(),
            &sample_brag_sheet(),
            Tone::Warm,
            Angle::Stem,
        );
        assert!(prompt.contains("GPA: 3.86"));

        let mut no_gpa = sample_student();
        no_gpa.gpa = None;
        let prompt = build_user_prompt(&no_gpa, &sample_brag_sheet(), Tone::Warm, Angle::Stem);
        assert!(prompt.contains("GPA: N/A"));
    }

    #[test]
    fn test_activity_year_pluralization() {
        let mut brag = sample_brag_sheet();
        brag.activities.push(Activity {
            name: "Chess Club".to_string(),
            role: "Member".to_string(),
            years: 1,
            description: String::new(),
        });
        let prompt = build_user_prompt(&sample_student(), &brag, Tone::Warm, Angle::Stem);
        assert!(prompt.contains("- Robotics: Captain (4 years)"));
        assert!(prompt.contains("- Chess Club: Member (1 year)"));
    }

    #[test]
    fn test_system_prompt_lists_discouraged_words() {
        let lexicon = BiasLexicon::builtin();
        let system = build_system_prompt(&lexicon);
        assert!(system.contains("400-500 words"));
        assert!(system.contains("FERPA"));
        for word in lexicon.discouraged_words(10) {
            assert!(system.contains(word), "system prompt missing '{word}'");
        }
    }

    #[test]
    fn test_system_prompt_is_deterministic() {
        let lexicon = BiasLexicon::builtin();
        assert_eq!(build_system_prompt(&lexicon), build_system_prompt(&lexicon));
    }

    #[test]
    fn test_rating_clauses() {
        assert_eq!(
            humanize_rating(Some(StudentRating::Top1Percent)),
            "top 1% of students I have counseled in my career"
        );
        assert_eq!(humanize_rating(None), "a notable student");
    }
}
