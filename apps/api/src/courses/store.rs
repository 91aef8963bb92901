use std::collections::HashMap;

use sqlx::PgPool;

use crate::courses::tree::{
    adjacency, build_forest, collect_codes, walk_paths, DependencyTree, MAX_DEPTH,
};
use crate::errors::AppError;
use crate::models::course::CourseHit;

/// A course node and its direct neighbours. Codes match ignoring case and punctuation,
/// so "cs101" finds "CS-101".
pub async fn get_course(pool: &PgPool, code: &str) -> Result<Option<CourseHit>, AppError> {
    Ok(sqlx::query_as::<_, CourseHit>(
        r#"
        SELECT c.course_code,
               c.course_title AS title,
               c.subject_area,
               c.prereq_course_codes AS prereq_codes,
               1.0::float8 AS score,
               ARRAY(SELECT cr.prereq_code FROM course_requires cr
                     WHERE cr.course_code = c.course_code ORDER BY 1) AS direct_prerequisites,
               ARRAY(SELECT cr.course_code FROM course_requires cr
                     WHERE cr.prereq_code = c.course_code ORDER BY 1) AS postrequisites,
               ARRAY(SELECT csa.subject_area FROM course_subject_areas csa
                     WHERE csa.course_code = c.course_code ORDER BY 1) AS subject_areas,
               ARRAY(SELECT j.job_title FROM course_jobs cj JOIN jobs j ON j.job_id = cj.job_id
                     WHERE cj.course_code = c.course_code ORDER BY 1) AS job_matches
        FROM courses c
        WHERE regexp_replace(UPPER(c.course_code), '[^A-Z0-9]', '', 'g')
            = regexp_replace(UPPER($1), '[^A-Z0-9]', '', 'g')
        ORDER BY c.course_code
        LIMIT 1
        "#,
    )
    .bind(code.trim())
    .fetch_optional(pool)
    .await?)
}

/// Which end of a REQUIRES edge the walk follows.
#[derive(Debug, Clone, Copy)]
enum Direction {
    /// course -> what it requires
    Prerequisites,
    /// course <- what requires it
    Postrequisites,
}

/// REQUIRES edges reachable from `code` within `depth` hops, oriented in the
/// walk direction. Cycles terminate because UNION dedups (code, depth) rows.
async fn reachable_edges(
    pool: &PgPool,
    code: &str,
    depth: u32,
    direction: Direction,
) -> Result<Vec<(String, String)>, AppError> {
    let (from_col, to_col) = match direction {
        Direction::Prerequisites => ("course_code", "prereq_code"),
        Direction::Postrequisites => ("prereq_code", "course_code"),
    };
    let sql = format!(
        r#"
        WITH RECURSIVE reach(code, depth) AS (
            SELECT $1::text, 0
          UNION
            SELECT r.{to_col}, reach.depth + 1
            FROM reach
            JOIN course_requires r ON r.{from_col} = reach.code
            WHERE reach.depth < $2
        )
        SELECT DISTINCT r.{from_col}, r.{to_col}
        FROM course_requires r
        JOIN reach ON r.{from_col} = reach.code
        WHERE reach.depth < $2
        "#
    );

    Ok(sqlx::query_as::<_, (String, String)>(&sql)
        .bind(code)
        .bind(depth as i32)
        .fetch_all(pool)
        .await?)
}

/// All simple REQUIRES paths from `code` up to `depth` hops, root excluded.
async fn requirement_paths(
    pool: &PgPool,
    code: &str,
    depth: u32,
    direction: Direction,
) -> Result<Vec<Vec<String>>, AppError> {
    let depth = depth.clamp(1, MAX_DEPTH);
    let edges = reachable_edges(pool, code, depth, direction).await?;
    Ok(walk_paths(&adjacency(edges), code, depth))
}

pub async fn course_titles(
    pool: &PgPool,
    codes: &[String],
) -> Result<HashMap<String, String>, AppError> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT course_code, course_title FROM courses WHERE course_code = ANY($1)",
    )
    .bind(codes)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().collect())
}

/// Builds the dependency tree for a course along with a code → title map
/// covering every node in it. None if the course does not exist.
pub async fn dependency_tree(
    pool: &PgPool,
    code: &str,
    depth: u32,
) -> Result<Option<(DependencyTree, HashMap<String, String>)>, AppError> {
    let Some(course) = get_course(pool, code).await? else {
        return Ok(None);
    };

    let pre = requirement_paths(pool, &course.course_code, depth, Direction::Prerequisites).await?;
    let post =
        requirement_paths(pool, &course.course_code, depth, Direction::Postrequisites).await?;

    let tree = DependencyTree {
        course_code: course.course_code,
        course_title: course.title,
        prerequisites: build_forest(&pre),
        postrequisites: build_forest(&post),
    };

    let mut codes = Vec::new();
    collect_codes(&tree.prerequisites, &mut codes);
    collect_codes(&tree.postrequisites, &mut codes);
    codes.sort();
    codes.dedup();
    let titles = course_titles(pool, &codes).await?;

    Ok(Some((tree, titles)))
}
