// Prompt templates for the advisor chat. All LLM calls go through llm_client.

use crate::models::course::{CourseHit, JobHit};

const COUNSELOR_SYSTEM_PROMPT: &str = r#"You are an academic counselor for {institution} who is genuinely curious about students' interests and goals.

INSTRUCTIONS:
1. Use the provided context for personal information
2. Reference conversation history for context about past topics
3. Use recent messages for immediate conversation flow
4. Only mention information that's explicitly in these sections
5. If asked about something not in context, say "We haven't discussed that yet"

CURIOSITY & ENGAGEMENT:
- ALWAYS end your response with 1-2 curious questions
- Ask about their interests, preferences, or experiences related to the topic

Keep responses 2-3 paragraphs, recommend relevant courses, then ask engaging questions."#;

pub const PROMPT_COURSES: usize = 5;
pub const PROMPT_JOBS: usize = 3;

pub fn counselor_system_prompt(institution: &str) -> String {
    COUNSELOR_SYSTEM_PROMPT.replace("{institution}", institution)
}

/// User message for the counselor: memory context, then the query and whatever the graph found.
pub fn build_counselor_user_message(
    context: &str,
    user_input: &str,
    courses: &[CourseHit],
    jobs: &[JobHit],
) -> String {
    let mut query_section = format!("CURRENT QUERY: {user_input}");

    if !courses.is_empty() {
        query_section.push_str("\n\nAVAILABLE COURSES:\n");
        for course in courses.iter().take(PROMPT_COURSES) {
            query_section.push_str(&format!(
                "- {}: {} ({})\n",
                course.course_code,
                course.title,
                course.subject_area.as_deref().unwrap_or_default()
            ));
        }
    }

    if !jobs.is_empty() {
        query_section.push_str("\n\nCAREER OPPORTUNITIES:\n");
        for job in jobs.iter().take(PROMPT_JOBS) {
            query_section.push_str(&format!("- {}", job.job_title));
            if !job.related_courses.is_empty() {
                let required: Vec<&str> = job
                    .related_courses
                    .iter()
                    .take(2)
                    .map(String::as_str)
                    .collect();
                query_section.push_str(&format!(" (requires: {})", required.join(", ")));
            }
            query_section.push('\n');
        }
    }

    if context.trim().is_empty() {
        query_section
    } else {
        format!("{context}\n\n{query_section}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_institution_is_substituted() {
        let prompt = counselor_system_prompt("Jain University");
        assert!(prompt.starts_with("You are an academic counselor for Jain University"));
        assert!(!prompt.contains("{institution}"));
    }

    #[test]
    fn test_user_message_sections() {
        let courses = vec![CourseHit {
            course_code: "CS101".into(),
            title: "Intro to Programming".into(),
            subject_area: Some("Computer Science".into()),
            ..Default::default()
        }];
        let jobs = vec![JobHit {
            job_title: "Software Engineer".into(),
            related_courses: vec!["CS101".into(), "CS201".into(), "CS301".into()],
            ..Default::default()
        }];

        let message = build_counselor_user_message("SESSION: First message", "coding jobs", &courses, &jobs);
        assert_eq!(
            message,
            "SESSION: First message\n\nCURRENT QUERY: coding jobs\n\n\
             AVAILABLE COURSES:\n- CS101: Intro to Programming (Computer Science)\n\n\n\
             CAREER OPPORTUNITIES:\n- Software Engineer (requires: CS101, CS201)\n"
        );
    }

    #[test]
    fn test_only_first_five_courses_listed() {
        let courses: Vec<CourseHit> = (0..8)
            .map(|i| CourseHit {
                course_code: format!("C{i}"),
                title: format!("Course {i}"),
                ..Default::default()
            })
            .collect();
        let message = build_counselor_user_message("", "anything", &courses, &[]);
        assert!(message.starts_with("CURRENT QUERY: anything"));
        assert!(message.contains("- C4: Course 4 ()"));
        assert!(!message.contains("C5"));
    }
}
