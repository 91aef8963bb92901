//! Keyword ranking over the course graph.
//!
//! A node's score is the fraction of query keywords found in its text fields.
//! Short keywords must match a whole word.
//! Nodes scoring zero are not returned.

use sqlx::PgPool;
use tracing::debug;

use crate::courses::keywords::{extract_keywords, match_pattern};
use crate::errors::AppError;
use crate::models::course::{CourseHit, JobHit};

pub const COURSE_TOP_K: i64 = 10;
pub const JOB_TOP_K: i64 = 8;

pub async fn search_courses(
    pool: &PgPool,
    query: &str,
    top_k: i64,
) -> Result<Vec<CourseHit>, AppError> {
    let keywords = extract_keywords(query);
    if keywords.is_empty() {
        return Ok(Vec::new());
    }
    debug!("Course search keywords: {keywords:?}");
    let patterns: Vec<String> = keywords.iter().map(|k| match_pattern(k)).collect();

    Ok(sqlx::query_as::<_, CourseHit>(
        r#"
        WITH ranked AS (
            SELECT c.*,
                   (SELECT COUNT(*) FROM unnest($1::text[]) AS k(word)
                    WHERE LOWER(c.course_title) ~ k.word
                       OR regexp_replace(LOWER(c.course_code), '[^a-z0-9]', '', 'g') ~ k.word
                       OR LOWER(COALESCE(c.subject_area, '')) ~ k.word
                   )::float8 / cardinality($1::text[]) AS score
            FROM courses c
        )
        SELECT r.course_code,
               r.course_title AS title,
               r.subject_area,
               r.prereq_course_codes AS prereq_codes,
               r.score,
               ARRAY(SELECT cr.prereq_code FROM course_requires cr
                     WHERE cr.course_code = r.course_code ORDER BY 1) AS direct_prerequisites,
               ARRAY(SELECT cr.course_code FROM course_requires cr
                     WHERE cr.prereq_code = r.course_code ORDER BY 1) AS postrequisites,
               ARRAY(SELECT csa.subject_area FROM course_subject_areas csa
                     WHERE csa.course_code = r.course_code ORDER BY 1) AS subject_areas,
               ARRAY(SELECT j.job_title FROM course_jobs cj JOIN jobs j ON j.job_id = cj.job_id
                     WHERE cj.course_code = r.course_code ORDER BY 1) AS job_matches
        FROM ranked r
        WHERE r.score > 0
        ORDER BY r.score DESC, r.course_code
        LIMIT $2
        "#,
    )
    .bind(&patterns)
    .bind(top_k)
    .fetch_all(pool)
    .await?)
}

pub async fn search_jobs(pool: &PgPool, query: &str, top_k: i64) -> Result<Vec<JobHit>, AppError> {
    let keywords = extract_keywords(query);
    if keywords.is_empty() {
        return Ok(Vec::new());
    }
    let patterns: Vec<String> = keywords.iter().map(|k| match_pattern(k)).collect();

    Ok(sqlx::query_as::<_, JobHit>(
        r#"
        WITH ranked AS (
            SELECT j.*,
                   (SELECT COUNT(*) FROM unnest($1::text[]) AS k(word)
                    WHERE LOWER(j.job_title) ~ k.word
                       OR LOWER(COALESCE(j.skills_description, '')) ~ k.word
                   )::float8 / cardinality($1::text[]) AS score
            FROM jobs j
        )
        SELECT r.job_id,
               r.job_title,
               r.skills_description,
               r.score,
               ARRAY(SELECT cj.course_code FROM course_jobs cj
                     WHERE cj.job_id = r.job_id ORDER BY 1) AS related_courses,
               ARRAY(SELECT c.course_title FROM course_jobs cj JOIN courses c ON c.course_code = cj.course_code
                     WHERE cj.job_id = r.job_id ORDER BY cj.course_code) AS course_titles,
               ARRAY(SELECT saj.subject_area FROM subject_area_jobs saj
                     WHERE saj.job_id = r.job_id ORDER BY 1) AS related_subjects
        FROM ranked r
        WHERE r.score > 0
        ORDER BY r.score DESC, r.job_title
        LIMIT $2
        "#,
    )
    .bind(&patterns)
    .bind(top_k)
    .fetch_all(pool)
    .await?)
}
