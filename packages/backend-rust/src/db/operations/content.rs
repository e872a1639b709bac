use lesson_algo::{parse_options, parse_options_str, Difficulty, Exercise, ExerciseType, Lesson};
use serde::Deserialize;
use serde_json::Value;
use sqlx::Row;

use crate::db::{Database, DbPool};

/// Exercise as authored, with the options payload in either stored shape
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    pub id: String,
    pub lesson_id: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub difficulty: Difficulty,
    pub question: String,
    #[serde(default)]
    pub options: Option<Value>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
    pub order_index: i32,
}

pub async fn list_lessons(db: &Database) -> Result<Vec<Lesson>, sqlx::Error> {
    const SQL: &str = r#"
        SELECT "id", "title", "description", "orderIndex" FROM "lessons"
        ORDER BY "orderIndex" ASC, "id" ASC
    "#;

    match db.pool() {
        DbPool::Postgres(pool) => {
            let rows = sqlx::query(SQL).fetch_all(pool).await?;
            rows.iter().map(map_postgres_lesson).collect()
        }
        DbPool::Sqlite(pool) => {
            let rows = sqlx::query(SQL).fetch_all(pool).await?;
            rows.iter().map(map_sqlite_lesson).collect()
        }
    }
}

pub async fn get_lesson(db: &Database, lesson_id: &str) -> Result<Option<Lesson>, sqlx::Error> {
    match db.pool() {
        DbPool::Postgres(pool) => {
            let row = sqlx::query(
                r#"SELECT "id", "title", "description", "orderIndex" FROM "lessons" WHERE "id" = $1"#,
            )
            .bind(lesson_id)
            .fetch_optional(pool)
            .await?;
            row.as_ref().map(map_postgres_lesson).transpose()
        }
        DbPool::Sqlite(pool) => {
            let rows = sqlx::query(
                r#"SELECT "id", "title", "description", "orderIndex" FROM "lessons" WHERE "id" = ?"#,
            )
            .bind(lesson_id)
            .fetch_all(pool)
            .await?;
            rows.first().map(map_sqlite_lesson).transpose()
        }
    }
}

pub async fn get_exercise(db: &Database, exercise_id: &str) -> Result<Option<Exercise>, sqlx::Error> {
    match db.pool() {
        DbPool::Postgres(pool) => {
            let row = sqlx::query(r#"SELECT * FROM "exercises" WHERE "id" = $1"#)
                .bind(exercise_id)
                .fetch_optional(pool)
                .await?;
            row.as_ref().map(map_postgres_exercise).transpose()
        }
        DbPool::Sqlite(pool) => {
            let rows = sqlx::query(r#"SELECT * FROM "exercises" WHERE "id" = ?"#)
                .bind(exercise_id)
                .fetch_all(pool)
                .await?;
            rows.first().map(map_sqlite_exercise).transpose()
        }
    }
}

pub async fn list_exercises_for_lesson(
    db: &Database,
    lesson_id: &str,
) -> Result<Vec<Exercise>, sqlx::Error> {
    match db.pool() {
        DbPool::Postgres(pool) => {
            let rows = sqlx::query(
                r#"SELECT * FROM "exercises" WHERE "lessonId" = $1 ORDER BY "orderIndex" ASC"#,
            )
            .bind(lesson_id)
            .fetch_all(pool)
            .await?;
            rows.iter().map(map_postgres_exercise).collect()
        }
        DbPool::Sqlite(pool) => {
            let rows = sqlx::query(
                r#"SELECT * FROM "exercises" WHERE "lessonId" = ? ORDER BY "orderIndex" ASC"#,
            )
            .bind(lesson_id)
            .fetch_all(pool)
            .await?;
            rows.iter().map(map_sqlite_exercise).collect()
        }
    }
}

pub async fn list_all_exercises(db: &Database) -> Result<Vec<Exercise>, sqlx::Error> {
    const SQL: &str = r#"SELECT * FROM "exercises" ORDER BY "lessonId" ASC, "orderIndex" ASC"#;

    match db.pool() {
        DbPool::Postgres(pool) => {
            let rows = sqlx::query(SQL).fetch_all(pool).await?;
            rows.iter().map(map_postgres_exercise).collect()
        }
        DbPool::Sqlite(pool) => {
            let rows = sqlx::query(SQL).fetch_all(pool).await?;
            rows.iter().map(map_sqlite_exercise).collect()
        }
    }
}

pub async fn insert_lesson(db: &Database, lesson: &Lesson) -> Result<(), sqlx::Error> {
    match db.pool() {
        DbPool::Postgres(pool) => {
            sqlx::query(
                r#"
                INSERT INTO "lessons" ("id", "title", "description", "orderIndex")
                VALUES ($1, $2, $3, $4)
                ON CONFLICT ("id") DO NOTHING
                "#,
            )
            .bind(&lesson.id)
            .bind(&lesson.title)
            .bind(&lesson.description)
            .bind(lesson.order_index)
            .execute(pool)
            .await?;
        }
        DbPool::Sqlite(pool) => {
            sqlx::query(
                r#"
                INSERT INTO "lessons" ("id", "title", "description", "orderIndex")
                VALUES (?, ?, ?, ?)
                ON CONFLICT ("id") DO NOTHING
                "#,
            )
            .bind(&lesson.id)
            .bind(&lesson.title)
            .bind(&lesson.description)
            .bind(lesson.order_index)
            .execute(pool)
            .await?;
        }
    }
    Ok(())
}

pub async fn insert_exercise(db: &Database, exercise: &NewExercise) -> Result<(), sqlx::Error> {
    match db.pool() {
        DbPool::Postgres(pool) => {
            sqlx::query(
                r#"
                INSERT INTO "exercises" (
                    "id", "lessonId", "type", "difficulty", "question", "options",
                    "correctAnswer", "explanation", "orderIndex"
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT ("id") DO NOTHING
                "#,
            )
            .bind(&exercise.id)
            .bind(&exercise.lesson_id)
            .bind(exercise.exercise_type.as_str())
            .bind(exercise.difficulty.as_str())
            .bind(&exercise.question)
            .bind(&exercise.options)
            .bind(&exercise.correct_answer)
            .bind(&exercise.explanation)
            .bind(exercise.order_index)
            .execute(pool)
            .await?;
        }
        DbPool::Sqlite(pool) => {
            sqlx::query(
                r#"
                INSERT INTO "exercises" (
                    "id", "lessonId", "type", "difficulty", "question", "options",
                    "correctAnswer", "explanation", "orderIndex"
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT ("id") DO NOTHING
                "#,
            )
            .bind(&exercise.id)
            .bind(&exercise.lesson_id)
            .bind(exercise.exercise_type.as_str())
            .bind(exercise.difficulty.as_str())
            .bind(&exercise.question)
            .bind(exercise.options.as_ref().map(|value| value.to_string()))
            .bind(&exercise.correct_answer)
            .bind(&exercise.explanation)
            .bind(exercise.order_index)
            .execute(pool)
            .await?;
        }
    }
    Ok(())
}

fn map_postgres_lesson(row: &sqlx::postgres::PgRow) -> Result<Lesson, sqlx::Error> {
    Ok(Lesson {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        order_index: row.try_get("orderIndex")?,
    })
}

fn map_sqlite_lesson(row: &sqlx::sqlite::SqliteRow) -> Result<Lesson, sqlx::Error> {
    Ok(Lesson {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        order_index: row.try_get("orderIndex")?,
    })
}

fn map_postgres_exercise(row: &sqlx::postgres::PgRow) -> Result<Exercise, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let raw_type: String = row.try_get("type")?;
    let raw_difficulty: String = row.try_get("difficulty")?;
    let raw_options: Option<Value> = row.try_get("options")?;

    Ok(Exercise {
        exercise_type: ExerciseType::parse(&raw_type),
        difficulty: resolve_difficulty(&id, &raw_difficulty),
        options: resolve_options(&id, raw_options.as_ref()),
        lesson_id: row.try_get("lessonId")?,
        question: row.try_get("question")?,
        correct_answer: row.try_get("correctAnswer")?,
        explanation: row.try_get("explanation")?,
        order_index: row.try_get("orderIndex")?,
        id,
    })
}

fn map_sqlite_exercise(row: &sqlx::sqlite::SqliteRow) -> Result<Exercise, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let raw_type: String = row.try_get("type")?;
    let raw_difficulty: String = row.try_get("difficulty")?;
    let raw_options: Option<String> = row.try_get("options")?;

    let options = match raw_options.as_deref() {
        None => Vec::new(),
        Some(raw) => parse_options_str(raw).unwrap_or_else(|err| {
            tracing::warn!(exercise_id = %id, error = %err, "malformed options payload, using empty list");
            Vec::new()
        }),
    };

    Ok(Exercise {
        exercise_type: ExerciseType::parse(&raw_type),
        difficulty: resolve_difficulty(&id, &raw_difficulty),
        options,
        lesson_id: row.try_get("lessonId")?,
        question: row.try_get("question")?,
        correct_answer: row.try_get("correctAnswer")?,
        explanation: row.try_get("explanation")?,
        order_index: row.try_get("orderIndex")?,
        id,
    })
}

/// JSON column value to option list. Text holding JSON is unwrapped once.
fn resolve_options(exercise_id: &str, raw: Option<&Value>) -> Vec<lesson_algo::AnswerOption> {
    let result = match raw {
        None => Ok(Vec::new()),
        Some(Value::String(text)) => parse_options_str(text),
        Some(value) => parse_options(value),
    };

    result.unwrap_or_else(|err| {
        tracing::warn!(exercise_id, error = %err, "malformed options payload, using empty list");
        Vec::new()
    })
}

fn resolve_difficulty(exercise_id: &str, raw: &str) -> Difficulty {
    Difficulty::parse(raw).unwrap_or_else(|| {
        tracing::warn!(exercise_id, difficulty = raw, "unknown difficulty, treating as medium");
        Difficulty::Medium
    })
}
