//! Sliding-window conversation memory.
//!
//! Builds the context block sent ahead of each query. A lightweight student
//! profile (name, interests, course codes) is pulled from the user's own
//! messages with regexes, and the tail of the conversation is attached verbatim.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::chat::{ChatTurn, Role};

pub const RECENT_MESSAGES: usize = 6;
const SNIPPET_CHARS: usize = 150;

/// Words that follow "i am" / "i'm" but are not names.
const NOT_NAMES: &[&str] = &["interested", "learning", "studying"];

static NAME_RES: OnceLock<Vec<Regex>> = OnceLock::new();
static INTEREST_RES: OnceLock<Vec<(Regex, f64)>> = OnceLock::new();
static COURSE_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn name_patterns() -> &'static [Regex] {
    NAME_RES.get_or_init(|| {
        [
            r"\bmy name is (\w+)",
            r"\bi am (\w+)(?:\s|$|[,.])",
            r"\bi'm (\w+)(?:\s|$|[,.])",
            r"\bcall me (\w+)",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

fn interest_patterns() -> &'static [(Regex, f64)] {
    INTEREST_RES.get_or_init(|| {
        [
            (r"interested in ([^.!?\n]+)", 0.9),
            (r"want to learn (?:about )?([^.!?\n]+)", 0.8),
            (r"studying ([^.!?\n]+)", 0.85),
            (r"passionate about ([^.!?\n]+)", 0.95),
        ]
        .iter()
        .map(|(p, c)| (Regex::new(p).unwrap(), *c))
        .collect()
    })
}

fn course_code_re() -> &'static Regex {
    COURSE_CODE_RE.get_or_init(|| Regex::new(r"\b([A-Z]{2,4}[-\s]?\d{2,3})\b").unwrap())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentProfile {
    pub name: Option<String>,
    /// Interest phrase with the highest confidence it was stated with, in first-seen order.
    pub interests: Vec<(String, f64)>,
    /// Course codes in first-mention order, normalized to `ABC-123` / `ABC123`.
    pub mentioned_courses: Vec<String>,
}

impl StudentProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.interests.is_empty()
    }

    /// Highest-confidence interests; ties keep first-seen order.
    pub fn top_interests(&self, n: usize) -> Vec<&str> {
        let mut ranked: Vec<&(String, f64)> = self.interests.iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.into_iter().take(n).map(|(i, _)| i.as_str()).collect()
    }

    fn record_interest(&mut self, interest: String, confidence: f64) {
        match self.interests.iter_mut().find(|(i, _)| *i == interest) {
            Some(existing) => existing.1 = existing.1.max(confidence),
            None => self.interests.push((interest, confidence)),
        }
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn extract_name(content_lower: &str) -> Option<String> {
    for pattern in name_patterns() {
        let Some(caps) = pattern.captures(content_lower) else {
            continue;
        };
        let name = caps[1].trim();
        if name.chars().count() > 1
            && name.chars().all(char::is_alphabetic)
            && !NOT_NAMES.contains(&name)
        {
            return Some(title_case(name));
        }
    }
    None
}

/// Scans user messages (assistant output is ignored) for profile facts.
pub fn extract_user_profile(messages: &[ChatTurn]) -> StudentProfile {
    let mut profile = StudentProfile::default();

    for msg in messages.iter().filter(|m| m.role == Role::User) {
        let content_lower = msg.content.to_lowercase();

        if profile.name.is_none() {
            profile.name = extract_name(&content_lower);
        }

        for (pattern, confidence) in interest_patterns() {
            for caps in pattern.captures_iter(&content_lower) {
                let interest = caps[1].trim();
                let len = interest.chars().count();
                if len > 2 && len < 50 {
                    profile.record_interest(interest.to_string(), *confidence);
                }
            }
        }

        for caps in course_code_re().captures_iter(&msg.content) {
            let code = caps[1].to_uppercase().replace(' ', "-");
            if !profile.mentioned_courses.contains(&code) {
                profile.mentioned_courses.push(code);
            }
        }
    }

    profile
}

fn snippet(content: &str) -> String {
    if content.chars().count() > SNIPPET_CHARS {
        let cut: String = content.chars().take(SNIPPET_CHARS).collect();
        format!("{cut}...")
    } else {
        content.to_string()
    }
}

fn transcript(header: &str, messages: &[ChatTurn]) -> String {
    let mut lines = vec![header.to_string()];
    for msg in messages.iter().filter(|m| !m.is_code) {
        let speaker = match msg.role {
            Role::User => "Student",
            Role::Assistant => "Assistant",
        };
        lines.push(format!("{speaker}: {}", snippet(&msg.content)));
    }
    lines.join("\n")
}

/// Keeps the last `recent_messages` turns verbatim and summarizes the student from all of them.
#[derive(Debug, Clone)]
pub struct SlidingWindowMemory {
    pub recent_messages: usize,
}

impl Default for SlidingWindowMemory {
    fn default() -> Self {
        Self {
            recent_messages: RECENT_MESSAGES,
        }
    }
}

impl SlidingWindowMemory {
    /// Context block for the LLM: session status, student profile, conversation tail.
    pub fn build_context(&self, messages: &[ChatTurn]) -> String {
        let mut parts = Vec::new();

        let user_messages = messages
            .iter()
            .filter(|m| m.role == Role::User && !m.is_code)
            .count();
        if user_messages <= 1 {
            parts.push("SESSION: First message".to_string());
        } else {
            parts.push(format!("SESSION: {user_messages} messages so far"));
        }

        let profile = extract_user_profile(messages);
        if !profile.is_empty() {
            let mut lines = vec!["STUDENT PROFILE:".to_string()];
            if let Some(name) = &profile.name {
                lines.push(format!("Name: {name}"));
            }
            if !profile.interests.is_empty() {
                lines.push(format!("Interests: {}", profile.top_interests(3).join(", ")));
            }
            if !profile.mentioned_courses.is_empty() {
                let start = profile.mentioned_courses.len().saturating_sub(3);
                lines.push(format!(
                    "Courses discussed: {}",
                    profile.mentioned_courses[start..].join(", ")
                ));
            }
            parts.push(lines.join("\n"));
        }

        if messages.len() > self.recent_messages {
            let tail = &messages[messages.len() - self.recent_messages..];
            parts.push(transcript("RECENT MESSAGES:", tail));
        } else if !messages.is_empty() {
            parts.push(transcript("CONVERSATION HISTORY:", messages));
        }

        parts.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_my_name_is() {
        let profile = extract_user_profile(&[ChatTurn::user("Hello, my name is PRIYA and I like maths")]);
        assert_eq!(profile.name.as_deref(), Some("Priya"));
    }

    #[test]
    fn test_filler_words_are_not_names() {
        let profile = extract_user_profile(&[ChatTurn::user("I am interested in robotics")]);
        assert_eq!(profile.name, None);
        assert_eq!(profile.interests, vec![("robotics".to_string(), 0.9)]);
    }

    #[test]
    fn test_first_name_wins() {
        let profile = extract_user_profile(&[
            ChatTurn::user("call me ravi"),
            ChatTurn::user("my name is arjun"),
        ]);
        assert_eq!(profile.name.as_deref(), Some("Ravi"));
    }

    #[test]
    fn test_assistant_messages_ignored() {
        let profile = extract_user_profile(&[ChatTurn::assistant("I am Advisor. Try CS101.")]);
        assert!(profile.is_empty());
        assert!(profile.mentioned_courses.is_empty());
    }

    #[test]
    fn test_interest_keeps_highest_confidence() {
        let profile = extract_user_profile(&[
            ChatTurn::user("I want to learn about data science."),
            ChatTurn::user("I'm passionate about data science!"),
        ]);
        assert_eq!(profile.interests, vec![("data science".to_string(), 0.95)]);
    }

    #[test]
    fn test_short_and_long_interests_dropped() {
        let long = format!("I am interested in {}", "x".repeat(60));
        let profile = extract_user_profile(&[ChatTurn::user("interested in ai"), ChatTurn::user(long)]);
        assert!(profile.interests.is_empty());
    }

    #[test]
    fn test_course_codes_normalized() {
        let profile = extract_user_profile(&[ChatTurn::user("Is CS 101 before MATH-201? And CS 101 again")]);
        assert_eq!(profile.mentioned_courses, vec!["CS-101", "MATH-201"]);
    }

    #[test]
    fn test_top_interests_ranked() {
        let profile = extract_user_profile(&[ChatTurn::user(
            "I'm studying physics. I want to learn chemistry. I'm passionate about music.",
        )]);
        assert_eq!(profile.top_interests(2), vec!["music", "physics"]);
    }

    #[test]
    fn test_first_message_context() {
        let ctx = SlidingWindowMemory::default().build_context(&[ChatTurn::user("hello")]);
        assert_eq!(ctx, "SESSION: First message\n\nCONVERSATION HISTORY:\nStudent: hello");
    }

    #[test]
    fn test_context_with_profile() {
        let messages = vec![
            ChatTurn::user("my name is meera"),
            ChatTurn::assistant("Nice to meet you!"),
            ChatTurn::user("I am interested in biology. What about BIO110?"),
        ];
        let ctx = SlidingWindowMemory::default().build_context(&messages);
        let expected = "\
SESSION: 2 messages so far

STUDENT PROFILE:
Name: Meera
Interests: biology
Courses discussed: BIO110

CONVERSATION HISTORY:
Student: my name is meera
Assistant: Nice to meet you!
Student: I am interested in biology. What about BIO110?";
        assert_eq!(ctx, expected);
    }

    #[test]
    fn test_window_keeps_last_six() {
        let messages: Vec<_> = (0..8).map(|i| ChatTurn::user(format!("msg {i}"))).collect();
        let ctx = SlidingWindowMemory::default().build_context(&messages);
        assert!(ctx.contains("RECENT MESSAGES:"));
        assert!(!ctx.contains("msg 1\n"));
        assert!(ctx.contains("Student: msg 2"));
        assert!(ctx.ends_with("Student: msg 7"));
        assert!(ctx.starts_with("SESSION: 8 messages so far"));
    }

    #[test]
    fn test_long_and_code_messages() {
        let mut code = ChatTurn::user("fn main() {}");
        code.is_code = true;
        let messages = vec![ChatTurn::user("a".repeat(200)), code];
        let ctx = SlidingWindowMemory::default().build_context(&messages);
        assert!(ctx.contains(&format!("Student: {}...", "a".repeat(150))));
        assert!(!ctx.contains("fn main"));
        assert!(ctx.starts_with("SESSION: First message"));
    }
}
