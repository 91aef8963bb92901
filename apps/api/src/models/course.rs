use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A course node together with its direct graph neighbours.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default)]
pub struct CourseHit {
    pub course_code: String,
    pub title: String,
    pub subject_area: Option<String>,
    pub prereq_codes: Vec<String>,
    pub score: f64,
    pub direct_prerequisites: Vec<String>,
    pub postrequisites: Vec<String>,
    pub subject_areas: Vec<String>,
    pub job_matches: Vec<String>,
}

/// A job node together with the courses and subjects that lead to it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default)]
pub struct JobHit {
    pub job_id: String,
    pub job_title: String,
    pub skills_description: Option<String>,
    pub score: f64,
    pub related_courses: Vec<String>,
    pub course_titles: Vec<String>,
    pub related_subjects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlaylistEntry {
    pub course_code: String,
    pub course_title: String,
    pub subject_area: Option<String>,
    pub added_at: chrono::DateTime<chrono::Utc>,
}
