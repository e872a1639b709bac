use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use chrono::{DateTime, Utc};
use lesson_algo::{skill, Exercise, Lesson, ProgressSummary};
use serde::Serialize;

use crate::db::operations::{self, ProgressRecord, ProgressUpdate};
use crate::db::Database;
use crate::error::{is_missing_reference, is_write_conflict, EngineError};

const CONFLICT_RETRY_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgress {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub completed: bool,
    pub correct: bool,
    pub attempts: i32,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl ExerciseProgress {
    fn join(exercise: Exercise, record: Option<&ProgressRecord>) -> Self {
        match record {
            Some(record) => Self {
                exercise,
                completed: record.completed,
                correct: record.correct,
                attempts: record.attempts,
                last_attempt_at: record.last_attempt_at,
            },
            None => Self {
                exercise,
                completed: false,
                correct: false,
                attempts: 0,
                last_attempt_at: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    pub lesson: Lesson,
    pub exercises: Vec<ExerciseProgress>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryScope<'a> {
    Lesson(&'a str),
    Account,
}

impl<'a> SummaryScope<'a> {
    fn lesson_id(&self) -> Option<&'a str> {
        match self {
            Self::Lesson(id) => Some(*id),
            Self::Account => None,
        }
    }
}

/// Every lesson keyed by id, each exercise joined with the user's record.
///
/// Exercises the user never touched come back with zeroed progress.
pub async fn get_user_progress(
    db: &Database,
    user_id: &str,
) -> Result<BTreeMap<String, LessonProgress>, EngineError> {
    require_id("user id", user_id)?;

    let lessons = operations::list_lessons(db).await?;
    let exercises = operations::list_all_exercises(db).await?;
    let records = operations::list_progress_for_user(db, user_id, None).await?;

    let by_exercise: HashMap<&str, &ProgressRecord> = records
        .iter()
        .map(|record| (record.exercise_id.as_str(), record))
        .collect();

    let mut result: BTreeMap<String, LessonProgress> = lessons
        .into_iter()
        .map(|lesson| {
            (
                lesson.id.clone(),
                LessonProgress {
                    lesson,
                    exercises: Vec::new(),
                },
            )
        })
        .collect();

    for exercise in exercises {
        let record = by_exercise.get(exercise.id.as_str()).copied();
        match result.get_mut(&exercise.lesson_id) {
            Some(entry) => entry.exercises.push(ExerciseProgress::join(exercise, record)),
            None => {
                tracing::warn!(exercise_id = %exercise.id, lesson_id = %exercise.lesson_id, "exercise without lesson skipped");
            }
        }
    }

    Ok(result)
}

pub async fn get_lesson_progress(
    db: &Database,
    user_id: &str,
    lesson_id: &str,
) -> Result<LessonProgress, EngineError> {
    require_id("user id", user_id)?;
    require_id("lesson id", lesson_id)?;

    let lesson = operations::get_lesson(db, lesson_id)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("lesson {lesson_id}")))?;
    let exercises = operations::list_exercises_for_lesson(db, lesson_id).await?;
    let records = operations::list_progress_for_user(db, user_id, Some(lesson_id)).await?;

    let by_exercise: HashMap<&str, &ProgressRecord> = records
        .iter()
        .map(|record| (record.exercise_id.as_str(), record))
        .collect();

    let exercises = exercises
        .into_iter()
        .map(|exercise| {
            let record = by_exercise.get(exercise.id.as_str()).copied();
            ExerciseProgress::join(exercise, record)
        })
        .collect();

    Ok(LessonProgress { lesson, exercises })
}

/// Record one submission: create the row or increment `attempts` by one.
///
/// The exercise must belong to `lesson_id`. A write conflict is retried once
/// after a short pause; a second conflict is surfaced.
pub async fn record_attempt(
    db: &Database,
    user_id: &str,
    lesson_id: &str,
    exercise_id: &str,
    update: ProgressUpdate,
) -> Result<ProgressRecord, EngineError> {
    require_id("user id", user_id)?;
    require_id("lesson id", lesson_id)?;
    require_id("exercise id", exercise_id)?;

    let first = operations::upsert_progress(db, user_id, lesson_id, exercise_id, update, Utc::now()).await;

    let err = match first {
        Ok(record) => return require_record(record, lesson_id, exercise_id),
        Err(err) if is_write_conflict(&err) => err,
        Err(err) => return Err(map_write_error(err, lesson_id, exercise_id)),
    };

    tracing::warn!(error = %err, user_id, exercise_id, "progress upsert conflicted, retrying once");
    tokio::time::sleep(CONFLICT_RETRY_DELAY).await;

    match operations::upsert_progress(db, user_id, lesson_id, exercise_id, update, Utc::now()).await {
        Ok(record) => require_record(record, lesson_id, exercise_id),
        Err(err) if is_write_conflict(&err) => {
            tracing::error!(error = %err, user_id, exercise_id, "progress upsert conflicted twice");
            Err(EngineError::ConcurrencyConflict(format!(
                "progress for exercise {exercise_id}"
            )))
        }
        Err(err) => Err(map_write_error(err, lesson_id, exercise_id)),
    }
}

pub async fn progress_summary(
    db: &Database,
    user_id: &str,
    scope: SummaryScope<'_>,
) -> Result<ProgressSummary, EngineError> {
    require_id("user id", user_id)?;
    Ok(operations::summarize_progress(db, user_id, scope.lesson_id()).await?)
}

pub async fn estimate_skill(
    db: &Database,
    user_id: &str,
    scope: SummaryScope<'_>,
) -> Result<f64, EngineError> {
    let summary = progress_summary(db, user_id, scope).await?;
    Ok(skill::estimate(&summary))
}

fn require_record(
    record: Option<ProgressRecord>,
    lesson_id: &str,
    exercise_id: &str,
) -> Result<ProgressRecord, EngineError> {
    record.ok_or_else(|| {
        EngineError::NotFound(format!("exercise {exercise_id} in lesson {lesson_id}"))
    })
}

fn map_write_error(err: sqlx::Error, lesson_id: &str, exercise_id: &str) -> EngineError {
    if is_missing_reference(&err) {
        EngineError::NotFound(format!("exercise {exercise_id} in lesson {lesson_id}"))
    } else {
        EngineError::Store(err)
    }
}

pub(crate) fn require_id(label: &str, value: &str) -> Result<(), EngineError> {
    if value.trim().is_empty() {
        return Err(EngineError::Validation(format!("{label} is required")));
    }
    Ok(())
}
