use serde::Serialize;

use crate::riasec::RiasecTrait::{self, *};

/// One survey statement, answered yes (1) or no (0).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub text: &'static str,
    #[serde(rename = "trait")]
    pub trait_code: RiasecTrait,
}

const fn q(text: &'static str, trait_code: RiasecTrait) -> Question {
    Question { text, trait_code }
}

/// The fixed question bank. Answers are keyed by the exact question text.
pub const QUESTIONS: &[Question] = &[
    q("I like to work on cars", Realistic),
    q("I like to build things", Realistic),
    q("I like putting things together or assembling things.", Realistic),
    q("I like to take care of animals", Realistic),
    q("I like to cook", Realistic),
    q("I am a practical person", Realistic),
    q("I like working outdoors", Realistic),
    q("I like working with numbers or charts", Investigative),
    q("I'm good at math", Investigative),
    q("I enjoy trying to figure out how things work", Investigative),
    q("I like to analyze things (problems/situations)", Investigative),
    q("I like to do puzzles", Investigative),
    q("I enjoy science", Investigative),
    q("I like to do experiments", Investigative),
    q("I like to teach or train people", Social),
    q("I like to play instruments or sing", Artistic),
    q("I like to read about art and music", Artistic),
    q("I like to draw", Artistic),
    q("I enjoy creative writing", Artistic),
    q("I am a creative person", Artistic),
    q("I like acting in plays", Artistic),
    q("I like helping people", Social),
    q("I like to get into discussions about issues", Social),
    q("I enjoy learning about other cultures", Social),
    q("I am interested in healing people", Social),
    q("I like trying to help people solve their problems", Social),
    q("I like to work in teams", Social),
    q("I am an ambitious person, I set goals for myself", Enterprising),
    q("I would like to start my own business", Enterprising),
    q("I am quick to take on new responsibilities", Enterprising),
    q("I like selling things", Enterprising),
    q("I like to lead", Enterprising),
    q("I like to try to influence or persuade people", Enterprising),
    q("I like to give speeches", Enterprising),
    q("I like to organize things, (files, desks/offices)", Conventional),
    q("I like to have clear instructions to follow", Conventional),
    q("I wouldn't mind working 8 hours per day in an office", Conventional),
    q("I pay attention to details", Conventional),
    q("I like to do filing or typing", Conventional),
    q("I am good at keeping records of my work", Conventional),
    q("I would like to work in an office", Conventional),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bank_size() {
        assert_eq!(QUESTIONS.len(), 41);
    }

    #[test]
    fn test_question_texts_unique() {
        let texts: HashSet<_> = QUESTIONS.iter().map(|q| q.text).collect();
        assert_eq!(texts.len(), QUESTIONS.len());
    }

    #[test]
    fn test_every_trait_has_questions() {
        for t in RiasecTrait::ALL {
            let n = QUESTIONS.iter().filter(|q| q.trait_code == t).count();
            assert!(n >= 6, "{t:?} has only {n} questions");
        }
    }
}
