// Academic marks entry: the first onboarding step.

pub mod handlers;
pub mod store;
pub mod validation;

pub const DEFAULT_SUBJECTS: &[&str] = &[
    "English",
    "Mathematics",
    "Language",
    "Science",
    "Physics",
    "Chemistry",
    "Biology",
    "Zoology",
    "Home Science",
    "History",
    "Geography",
    "Computer Science",
    "Economics",
    "Business Studies",
    "Accountancy",
    "Psychology",
    "Sociology",
];
