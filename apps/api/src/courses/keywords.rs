use std::sync::OnceLock;

use regex::Regex;

static COURSE_CODE_RE: OnceLock<Regex> = OnceLock::new();

/// Words that carry intent rather than topic; they never narrow a search.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "what", "which", "who", "how", "can", "get", "with", "about",
    "that", "this", "there", "their", "you", "your", "have", "has", "from", "into", "some",
    "any", "all", "give", "show", "tell", "list", "find", "need", "want", "like", "would",
    "should", "could", "good", "best", "available", "learn", "study", "studying", "take",
    "course", "courses", "class", "classes", "subject", "subjects", "degree", "program",
    "job", "jobs", "career", "careers", "work", "employment", "opportunity", "opportunities",
    "hire", "hiring", "prerequisite", "prerequisites", "prereq", "prereqs", "require",
    "required", "requires", "requirement", "requirements", "dependency", "dependencies",
    "before", "after", "does", "did", "will", "more", "most", "also", "please", "me",
    "interested", "related", "options", "a", "an", "i", "in", "is", "to", "of", "on", "at",
    "be", "do", "my", "or", "as", "by", "so", "we", "us", "am", "if", "up", "no",
];

/// Keywords this short only match whole words; "ai" must not hit "training".
const WHOLE_WORD_MAX_LEN: usize = 3;

/// Course codes mentioned in free text, compacted to lowercase letters+digits ("cs101").
pub fn course_codes(text: &str) -> Vec<String> {
    let re = COURSE_CODE_RE
        .get_or_init(|| Regex::new(r"\b([A-Za-z]{2,4})[-\s]?(\d{2,3})\b").unwrap());
    let mut codes: Vec<String> = Vec::new();
    for caps in re.captures_iter(text) {
        let code = format!("{}{}", caps[1].to_lowercase(), &caps[2]);
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

/// Search keywords for a free-text query: course codes first, then topical words.
/// Order-preserving and deduplicated.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let mut keywords = course_codes(query);

    let lower = query.to_lowercase();
    for word in lower.split(|c: char| !c.is_alphanumeric()) {
        if word.chars().count() < 2 || word.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if STOP_WORDS.contains(&word) {
            continue;
        }
        if keywords.iter().any(|k| k == word) {
            continue;
        }
        keywords.push(word.to_string());
    }
    keywords
}

/// Postgres regex (`~`) matching a keyword inside a lowercased text field.
/// Keywords are alphanumeric, so nothing needs escaping.
pub fn match_pattern(keyword: &str) -> String {
    if keyword.chars().count() <= WHOLE_WORD_MAX_LEN {
        format!(r"\m{keyword}\M")
    } else {
        keyword.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_codes_compacted() {
        assert_eq!(
            course_codes("Is CS-101 needed for cs 201 or MATH250?"),
            vec!["cs101", "cs201", "math250"]
        );
    }

    #[test]
    fn test_stop_words_dropped() {
        assert_eq!(
            extract_keywords("What courses are available in Computer Science?"),
            vec!["computer", "science"]
        );
    }

    #[test]
    fn test_codes_lead_keywords() {
        let keywords = extract_keywords("prerequisites for Machine Learning CS301");
        assert_eq!(keywords, vec!["cs301", "machine", "learning"]);
    }

    #[test]
    fn test_duplicates_removed() {
        assert_eq!(extract_keywords("data data DATA analytics"), vec!["data", "analytics"]);
    }

    #[test]
    fn test_generic_query_has_no_keywords() {
        assert!(extract_keywords("what jobs can I get?").is_empty());
    }

    #[test]
    fn test_short_topics_survive() {
        assert_eq!(extract_keywords("What courses are good for AI?"), vec!["ai"]);
        assert_eq!(
            extract_keywords("What jobs can I get with an AI degree?"),
            vec!["ai"]
        );
        assert_eq!(extract_keywords("courses in ML and IT"), vec!["ml", "it"]);
    }

    #[test]
    fn test_single_letters_dropped() {
        assert!(extract_keywords("what's a b c?").is_empty());
    }

    #[test]
    fn test_short_keywords_match_whole_words() {
        assert_eq!(match_pattern("ai"), r"\mai\M");
        assert_eq!(match_pattern("cs101"), "cs101");
        assert_eq!(match_pattern("data"), "data");
    }
}
