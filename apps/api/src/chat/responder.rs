//! Turns query results into the assistant's reply.
//!
//! Casual and prerequisite queries are answered without the LLM. Everything else
//! goes to the counselor prompt when a model is configured, and falls back to a
//! plain listing of what the course graph returned when it is not (or when the
//! call fails).

use tracing::warn;

use crate::chat::memory::SlidingWindowMemory;
use crate::chat::prompts::{build_counselor_user_message, counselor_system_prompt};
use crate::chat::query::{QueryResults, SearchType};
use crate::chat::ChatTurn;
use crate::llm_client::{ChatCompletion, ChatMessage, CompletionParams};

const FALLBACK_COURSES: usize = 3;
const FALLBACK_JOBS: usize = 3;
const FOLLOW_UP_QUESTION: &str = " What aspects of this interest you most?";

const COUNSELOR_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 400,
    temperature: 0.3,
};

pub async fn generate_response(
    results: &QueryResults,
    user_input: &str,
    llm: Option<&dyn ChatCompletion>,
    history: &[ChatTurn],
    institution: &str,
) -> String {
    match results.search_type {
        SearchType::CasualConversation => {
            return results.conversational_response.clone().unwrap_or_else(|| {
                format!("Hello! How can I help you with {institution} courses today?")
            });
        }
        SearchType::DependencyPrerequisites => return prerequisite_response(results),
        SearchType::CourseSearch | SearchType::JobSearch => {}
    }

    let Some(llm) = llm else {
        return generate_fallback_response(results, institution);
    };

    let context = if history.is_empty() {
        String::new()
    } else {
        SlidingWindowMemory::default().build_context(history)
    };

    let messages = [
        ChatMessage::system(counselor_system_prompt(institution)),
        ChatMessage::user(build_counselor_user_message(
            &context,
            user_input,
            &results.courses,
            &results.jobs,
        )),
    ];

    match llm.complete(&messages, COUNSELOR_PARAMS).await {
        Ok(reply) => ensure_follow_up(reply),
        Err(e) => {
            warn!("LLM response failed, using fallback: {e}");
            generate_fallback_response(results, institution)
        }
    }
}

fn prerequisite_response(results: &QueryResults) -> String {
    if let Some(tree) = &results.dependency_tree {
        if tree.has_edges {
            return format!(
                "Here is how {} - {} fits into the course graph:\n\n```\n{}\n```",
                tree.course_code,
                tree.course_title,
                tree.ascii.trim_end()
            );
        }
        return format!(
            "I found this course matching your query: {} - {}. However, no prerequisite \
             or follow-on courses are recorded for it in the database yet.",
            tree.course_code, tree.course_title
        );
    }
    "I couldn't find prerequisites for that course in the database.".to_string()
}

/// Counselor replies should end on a question.
fn ensure_follow_up(reply: String) -> String {
    let reply = reply.trim().to_string();
    if reply.is_empty() || reply.ends_with('?') || reply.ends_with("?)") {
        reply
    } else {
        reply + FOLLOW_UP_QUESTION
    }
}

pub fn generate_fallback_response(results: &QueryResults, institution: &str) -> String {
    if results.courses.is_empty() && results.jobs.is_empty() {
        return format!(
            "I couldn't find specific information about that in our {institution} database. \
             Could you rephrase your question or try asking about a different course or career area?"
        );
    }

    let mut parts = Vec::new();

    if !results.courses.is_empty() {
        parts.push(format!("I found these relevant courses at {institution}:"));
        for course in results.courses.iter().take(FALLBACK_COURSES) {
            parts.push(format!("• {} - {}", course.course_code, course.title));
        }
    }

    if !results.jobs.is_empty() {
        parts.push("\nRelated career opportunities:".to_string());
        for job in results.jobs.iter().take(FALLBACK_JOBS) {
            parts.push(format!("• {}", job.job_title));
        }
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::chat::query::DependencyView;
    use crate::llm_client::LlmError;
    use crate::models::course::{CourseHit, JobHit};

    const INSTITUTION: &str = "Jain University";

    /// Returns a canned reply and records the prompts it was given.
    struct FakeLlm {
        reply: Result<String, ()>,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl FakeLlm {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatCompletion for FakeLlm {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            _params: CompletionParams,
        ) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.reply.clone().map_err(|_| LlmError::EmptyContent)
        }
    }

    fn course(code: &str, title: &str) -> CourseHit {
        CourseHit {
            course_code: code.into(),
            title: title.into(),
            subject_area: Some("Computer Science".into()),
            ..Default::default()
        }
    }

    fn course_results() -> QueryResults {
        let mut results = QueryResults::casual(String::new());
        results.search_type = SearchType::CourseSearch;
        results.conversational_response = None;
        results.courses = vec![
            course("CS101", "Intro to Programming"),
            course("CS201", "Data Structures"),
            course("CS301", "Algorithms"),
            course("CS401", "Compilers"),
        ];
        results
    }

    #[tokio::test]
    async fn test_casual_reply_is_passed_through() {
        let results = QueryResults::casual("Hi there!".into());
        let llm = FakeLlm::replying("unused");
        let reply = generate_response(&results, "hi", Some(&llm), &[], INSTITUTION).await;
        assert_eq!(reply, "Hi there!");
        assert!(llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_without_llm_lists_three_courses() {
        let reply = generate_response(&course_results(), "programming", None, &[], INSTITUTION).await;
        assert_eq!(
            reply,
            "I found these relevant courses at Jain University:\n\
             • CS101 - Intro to Programming\n\
             • CS201 - Data Structures\n\
             • CS301 - Algorithms"
        );
    }

    #[test]
    fn test_fallback_with_jobs() {
        let mut results = course_results();
        results.courses.truncate(1);
        results.jobs = vec![JobHit {
            job_title: "Software Engineer".into(),
            ..Default::default()
        }];
        assert_eq!(
            generate_fallback_response(&results, INSTITUTION),
            "I found these relevant courses at Jain University:\n\
             • CS101 - Intro to Programming\n\
             \nRelated career opportunities:\n\
             • Software Engineer"
        );
    }

    #[test]
    fn test_fallback_with_nothing_found() {
        let mut results = course_results();
        results.courses.clear();
        let reply = generate_fallback_response(&results, INSTITUTION);
        assert!(reply.starts_with("I couldn't find specific information about that in our Jain University database."));
    }

    #[tokio::test]
    async fn test_llm_reply_gets_follow_up_question() {
        let llm = FakeLlm::replying("CS101 is a great start.");
        let history = vec![ChatTurn::user("my name is Asha"), ChatTurn::assistant("Hi Asha!")];
        let reply =
            generate_response(&course_results(), "where do I start?", Some(&llm), &history, INSTITUTION)
                .await;
        assert_eq!(reply, "CS101 is a great start. What aspects of this interest you most?");

        let seen = llm.seen.lock().unwrap();
        let prompt = &seen[0];
        assert_eq!(prompt[0].role, "system");
        assert!(prompt[0].content.contains("Jain University"));
        assert!(prompt[1].content.contains("CURRENT QUERY: where do I start?"));
        assert!(prompt[1].content.contains("Name: Asha"));
    }

    #[tokio::test]
    async fn test_question_endings_are_kept() {
        let llm = FakeLlm::replying("Which area excites you (AI or systems?)");
        let reply = generate_response(&course_results(), "options", Some(&llm), &[], INSTITUTION).await;
        assert_eq!(reply, "Which area excites you (AI or systems?)");
    }

    #[tokio::test]
    async fn test_llm_failure_falls_back() {
        let llm = FakeLlm::failing();
        let reply = generate_response(&course_results(), "programming", Some(&llm), &[], INSTITUTION).await;
        assert!(reply.starts_with("I found these relevant courses at Jain University:"));
    }

    #[tokio::test]
    async fn test_prerequisite_tree_is_fenced() {
        let mut results = course_results();
        results.search_type = SearchType::DependencyPrerequisites;
        results.dependency_tree = Some(DependencyView {
            course_code: "CS201".into(),
            course_title: "Data Structures".into(),
            has_edges: true,
            ascii: "CS201 - Data Structures\n".into(),
        });
        let reply = generate_response(&results, "prereqs for CS201", None, &[], INSTITUTION).await;
        assert_eq!(
            reply,
            "Here is how CS201 - Data Structures fits into the course graph:\n\n```\nCS201 - Data Structures\n```"
        );
    }

    #[tokio::test]
    async fn test_prerequisite_without_edges() {
        let mut results = course_results();
        results.search_type = SearchType::DependencyPrerequisites;
        results.dependency_tree = Some(DependencyView {
            course_code: "CS101".into(),
            course_title: "Intro to Programming".into(),
            has_edges: false,
            ascii: String::new(),
        });
        let reply = generate_response(&results, "prereqs", None, &[], INSTITUTION).await;
        assert!(reply.starts_with("I found this course matching your query: CS101 - Intro to Programming."));
    }

    #[tokio::test]
    async fn test_prerequisite_without_tree() {
        let mut results = course_results();
        results.search_type = SearchType::DependencyPrerequisites;
        let reply = generate_response(&results, "prereqs", None, &[], INSTITUTION).await;
        assert_eq!(reply, "I couldn't find prerequisites for that course in the database.");
    }
}
