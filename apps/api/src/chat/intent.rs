use std::sync::OnceLock;

use regex::Regex;

static CASUAL_RES: OnceLock<Vec<Regex>> = OnceLock::new();
static GREETING_RE: OnceLock<Regex> = OnceLock::new();
static WHATS_UP_RE: OnceLock<Regex> = OnceLock::new();

const TOPIC_KEYWORDS: &[&str] = &["course", "class", "job", "career", "study", "learn", "degree"];
const JOB_TERMS: &[&str] = &["job", "career", "work", "employment", "opportunity", "hire"];
const PREREQ_TERMS: &[&str] = &[
    "prerequisite",
    "prereq",
    "pre-req",
    "dependency",
    "require",
    "before",
];

fn casual_patterns() -> &'static [Regex] {
    CASUAL_RES.get_or_init(|| {
        [
            r"^(hi|hello|hey+|hii+|sup|what's up)$",
            r"^good (morning|afternoon|evening)$",
            r"^(ok|okay|yes|no|yep|nope|sure|thanks|thank you)$",
            r"^(who are you|what are you|what can you do)$",
            r"^.{1,2}$",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

/// True for inputs like "aaa" or "!!!!": one character repeated three or more times.
fn is_repeated_char(input: &str) -> bool {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => input.chars().count() >= 3 && chars.all(|c| c == first),
        None => false,
    }
}

/// Small talk that should get a canned reply instead of a course-graph search.
pub fn is_casual_conversation(user_input: &str) -> bool {
    let input = user_input.trim().to_lowercase();

    if casual_patterns().iter().any(|re| re.is_match(&input)) || is_repeated_char(&input) {
        return true;
    }

    input.chars().count() < 4 && !TOPIC_KEYWORDS.iter().any(|k| input.contains(k))
}

pub fn is_job_query(input_lower: &str) -> bool {
    JOB_TERMS.iter().any(|t| input_lower.contains(t))
}

pub fn is_prerequisite_query(input_lower: &str) -> bool {
    PREREQ_TERMS.iter().any(|t| input_lower.contains(t))
}

/// Canned reply for casual input.
pub fn conversational_response(user_input: &str, institution: &str) -> String {
    let input = user_input.trim().to_lowercase();
    let greeting = GREETING_RE.get_or_init(|| Regex::new(r"^(hi|hello|hey+|hii+)$").unwrap());
    let whats_up = WHATS_UP_RE.get_or_init(|| Regex::new(r"^(what's up|sup)$").unwrap());

    if greeting.is_match(&input) {
        format!(
            "Hi there!

I'm your {institution} Course & Career Assistant. I'm here to help you explore:

- Courses - Find courses that match your interests
- Prerequisites - Discover what you need to study before advanced courses
- Career Paths - Explore job opportunities for {institution} graduates
- Learning Pathways - Plan your academic journey

What would you like to know about? You can ask me things like:
- \"What courses are available in Computer Science?\"
- \"What are the prerequisites for Data Science?\"
- \"What jobs can I get with an AI degree?\"

How can I help you today?"
        )
    } else if whats_up.is_match(&input) {
        format!(
            "Not much! Just here waiting to help {institution} students like you navigate their academic journey!

I can help you discover courses, understand prerequisites, explore career opportunities, and plan your learning pathway.

What's on your mind? Looking for a specific course or career advice?"
        )
    } else {
        format!(
            "I'm not sure what you meant by that, but I'm here to help!

I specialize in helping {institution} students with:
- Course recommendations and information
- Understanding prerequisites and dependencies
- Career guidance and job opportunities
- Academic pathway planning

Try asking me something like \"What courses are good for AI?\" or \"Show me computer science prerequisites\" and I'll give you detailed, helpful information!

What would you like to know about?"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greetings_are_casual() {
        for input in ["hi", "Hello", "  heyyy ", "hiii", "what's up", "Good Morning", "thank you"] {
            assert!(is_casual_conversation(input), "{input:?} should be casual");
        }
    }

    #[test]
    fn test_noise_is_casual() {
        assert!(is_casual_conversation("k"));
        assert!(is_casual_conversation("zzzzzz"));
        assert!(is_casual_conversation("abc"));
    }

    #[test]
    fn test_short_topic_word_is_not_casual() {
        assert!(!is_casual_conversation("job"));
    }

    #[test]
    fn test_real_questions_are_not_casual() {
        assert!(!is_casual_conversation("What courses are good for AI?"));
        assert!(!is_casual_conversation("hi, what are the prerequisites for CS301?"));
    }

    #[test]
    fn test_repeated_char() {
        assert!(is_repeated_char("aaa"));
        assert!(!is_repeated_char("aa"));
        assert!(!is_repeated_char("aab"));
        assert!(!is_repeated_char(""));
    }

    #[test]
    fn test_intent_terms() {
        assert!(is_job_query("what careers suit me"));
        assert!(!is_job_query("courses in physics"));
        assert!(is_prerequisite_query("what do i need before cs301"));
        assert!(is_prerequisite_query("pre-reqs for ml"));
    }

    #[test]
    fn test_canned_responses() {
        assert!(conversational_response("hey", "Test U").starts_with("Hi there!"));
        assert!(conversational_response("sup", "Test U").starts_with("Not much!"));
        let other = conversational_response("ok", "Test U");
        assert!(other.starts_with("I'm not sure what you meant"));
        assert!(other.contains("Test U students"));
    }
}
