use chrono::{DateTime, Utc};
use lesson_algo::ProgressSummary;
use serde::{Deserialize, Serialize};
use sqlx::Row;

use crate::db::{Database, DbPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub user_id: String,
    pub exercise_id: String,
    pub lesson_id: String,
    pub completed: bool,
    pub correct: bool,
    pub attempts: i32,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

/// Outcome of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub completed: bool,
    pub correct: bool,
}

pub async fn get_progress(
    db: &Database,
    user_id: &str,
    exercise_id: &str,
) -> Result<Option<ProgressRecord>, sqlx::Error> {
    match db.pool() {
        DbPool::Postgres(pool) => {
            let row = sqlx::query(
                r#"SELECT * FROM "user_progress" WHERE "userId" = $1 AND "exerciseId" = $2"#,
            )
            .bind(user_id)
            .bind(exercise_id)
            .fetch_optional(pool)
            .await?;
            row.as_ref().map(map_postgres_progress).transpose()
        }
        DbPool::Sqlite(pool) => {
            let rows = sqlx::query(
                r#"SELECT * FROM "user_progress" WHERE "userId" = ? AND "exerciseId" = ?"#,
            )
            .bind(user_id)
            .bind(exercise_id)
            .fetch_all(pool)
            .await?;
            rows.first().map(map_sqlite_progress).transpose()
        }
    }
}

pub async fn list_progress_for_user(
    db: &Database,
    user_id: &str,
    lesson_id: Option<&str>,
) -> Result<Vec<ProgressRecord>, sqlx::Error> {
    match db.pool() {
        DbPool::Postgres(pool) => {
            let rows = sqlx::query(
                r#"
                SELECT * FROM "user_progress"
                WHERE "userId" = $1 AND ($2::TEXT IS NULL OR "lessonId" = $2)
                "#,
            )
            .bind(user_id)
            .bind(lesson_id)
            .fetch_all(pool)
            .await?;
            rows.iter().map(map_postgres_progress).collect()
        }
        DbPool::Sqlite(pool) => {
            let rows = sqlx::query(
                r#"
                SELECT * FROM "user_progress"
                WHERE "userId" = ? AND (? IS NULL OR "lessonId" = ?)
                "#,
            )
            .bind(user_id)
            .bind(lesson_id)
            .bind(lesson_id)
            .fetch_all(pool)
            .await?;
            rows.iter().map(map_sqlite_progress).collect()
        }
    }
}

/// Insert the first attempt or bump the existing counter in one statement.
///
/// The increment is evaluated by the database against the stored row, so
/// concurrent submissions for the same pair serialize on the row instead of
/// overwriting each other. The lesson is taken from the exercise row; `None`
/// means `exercise_id` does not exist in `lesson_id`.
///
/// SQLite statements are stepped to completion (`fetch_all`) so the implicit
/// transaction commits before the connection goes back to the pool.
pub async fn upsert_progress(
    db: &Database,
    user_id: &str,
    lesson_id: &str,
    exercise_id: &str,
    update: ProgressUpdate,
    attempted_at: DateTime<Utc>,
) -> Result<Option<ProgressRecord>, sqlx::Error> {
    match db.pool() {
        DbPool::Postgres(pool) => {
            let row = sqlx::query(
                r#"
                INSERT INTO "user_progress" (
                    "userId", "exerciseId", "lessonId", "completed", "correct",
                    "attempts", "lastAttemptAt"
                )
                SELECT $1::TEXT, e."id", e."lessonId", $4::BOOLEAN, $5::BOOLEAN, 1, $6::TIMESTAMPTZ
                FROM "exercises" e
                WHERE e."id" = $2 AND e."lessonId" = $3
                ON CONFLICT ("userId", "exerciseId") DO UPDATE SET
                    "completed" = EXCLUDED."completed",
                    "correct" = EXCLUDED."correct",
                    "attempts" = "user_progress"."attempts" + 1,
                    "lastAttemptAt" = EXCLUDED."lastAttemptAt"
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(exercise_id)
            .bind(lesson_id)
            .bind(update.completed)
            .bind(update.correct)
            .bind(attempted_at)
            .fetch_optional(pool)
            .await?;
            row.as_ref().map(map_postgres_progress).transpose()
        }
        DbPool::Sqlite(pool) => {
            let rows = sqlx::query(
                r#"
                INSERT INTO "user_progress" (
                    "userId", "exerciseId", "lessonId", "completed", "correct",
                    "attempts", "lastAttemptAt"
                )
                SELECT ?, e."id", e."lessonId", ?, ?, 1, ?
                FROM "exercises" e
                WHERE e."id" = ? AND e."lessonId" = ?
                ON CONFLICT ("userId", "exerciseId") DO UPDATE SET
                    "completed" = excluded."completed",
                    "correct" = excluded."correct",
                    "attempts" = "attempts" + 1,
                    "lastAttemptAt" = excluded."lastAttemptAt"
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(update.completed)
            .bind(update.correct)
            .bind(attempted_at)
            .bind(exercise_id)
            .bind(lesson_id)
            .fetch_all(pool)
            .await?;
            rows.first().map(map_sqlite_progress).transpose()
        }
    }
}

/// Counters feeding skill estimation; `lesson_id = None` covers the whole account
pub async fn summarize_progress(
    db: &Database,
    user_id: &str,
    lesson_id: Option<&str>,
) -> Result<ProgressSummary, sqlx::Error> {
    match db.pool() {
        DbPool::Postgres(pool) => {
            let row = sqlx::query(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM "exercises"
                        WHERE ($2::TEXT IS NULL OR "lessonId" = $2)) AS "totalExercises",
                    (SELECT COUNT(*) FROM "user_progress"
                        WHERE "userId" = $1 AND "completed"
                        AND ($2::TEXT IS NULL OR "lessonId" = $2)) AS "completedExercises",
                    (SELECT COUNT(*) FROM "user_progress"
                        WHERE "userId" = $1 AND "correct"
                        AND ($2::TEXT IS NULL OR "lessonId" = $2)) AS "correctAnswers"
                "#,
            )
            .bind(user_id)
            .bind(lesson_id)
            .fetch_one(pool)
            .await?;
            Ok(ProgressSummary {
                total_exercises: row.try_get("totalExercises")?,
                completed_exercises: row.try_get("completedExercises")?,
                correct_answers: row.try_get("correctAnswers")?,
            })
        }
        DbPool::Sqlite(pool) => {
            let rows = sqlx::query(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM "exercises"
                        WHERE (? IS NULL OR "lessonId" = ?)) AS "totalExercises",
                    (SELECT COUNT(*) FROM "user_progress"
                        WHERE "userId" = ? AND "completed" = 1
                        AND (? IS NULL OR "lessonId" = ?)) AS "completedExercises",
                    (SELECT COUNT(*) FROM "user_progress"
                        WHERE "userId" = ? AND "correct" = 1
                        AND (? IS NULL OR "lessonId" = ?)) AS "correctAnswers"
                "#,
            )
            .bind(lesson_id)
            .bind(lesson_id)
            .bind(user_id)
            .bind(lesson_id)
            .bind(lesson_id)
            .bind(user_id)
            .bind(lesson_id)
            .bind(lesson_id)
            .fetch_all(pool)
            .await?;
            let row = rows.first().ok_or(sqlx::Error::RowNotFound)?;
            Ok(ProgressSummary {
                total_exercises: row.try_get("totalExercises")?,
                completed_exercises: row.try_get("completedExercises")?,
                correct_answers: row.try_get("correctAnswers")?,
            })
        }
    }
}

fn map_postgres_progress(row: &sqlx::postgres::PgRow) -> Result<ProgressRecord, sqlx::Error> {
    Ok(ProgressRecord {
        user_id: row.try_get("userId")?,
        exercise_id: row.try_get("exerciseId")?,
        lesson_id: row.try_get("lessonId")?,
        completed: row.try_get("completed")?,
        correct: row.try_get("correct")?,
        attempts: row.try_get("attempts")?,
        last_attempt_at: row.try_get("lastAttemptAt")?,
    })
}

fn map_sqlite_progress(row: &sqlx::sqlite::SqliteRow) -> Result<ProgressRecord, sqlx::Error> {
    Ok(ProgressRecord {
        user_id: row.try_get("userId")?,
        exercise_id: row.try_get("exerciseId")?,
        lesson_id: row.try_get("lessonId")?,
        completed: row.try_get("completed")?,
        correct: row.try_get("correct")?,
        attempts: row.try_get("attempts")?,
        last_attempt_at: row.try_get("lastAttemptAt")?,
    })
}
