use lesson_algo::{
    evaluate, group_by_type, select_for_difficulty, AnswerOption, Difficulty, Exercise,
    ExerciseType,
};
use rand::Rng;
use serde::Serialize;

use crate::db::operations::{self, ProgressUpdate};
use crate::db::Database;
use crate::error::EngineError;
use crate::services::progress::{self, require_id, SummaryScope};

/// Exercise as shown to the learner, answer key withheld
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePrompt {
    pub id: String,
    pub lesson_id: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub difficulty: Difficulty,
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub order_index: i32,
}

impl From<Exercise> for ExercisePrompt {
    fn from(exercise: Exercise) -> Self {
        Self {
            id: exercise.id,
            lesson_id: exercise.lesson_id,
            exercise_type: exercise.exercise_type,
            difficulty: exercise.difficulty,
            question: exercise.question,
            options: exercise.options,
            order_index: exercise.order_index,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExercises {
    pub lesson_id: String,
    pub skill_level: f64,
    pub target_difficulty: Difficulty,
    pub exercises: Vec<ExercisePrompt>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub exercise_id: String,
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub attempts: i32,
}

/// Build a practice session for one lesson.
///
/// Skill is estimated from the learner's progress in this lesson. An empty
/// exercise list is a valid outcome (nothing fits the learner's tier).
pub async fn select_session<R: Rng + ?Sized>(
    db: &Database,
    lesson_id: &str,
    user_id: &str,
    rng: &mut R,
) -> Result<SessionExercises, EngineError> {
    require_id("lesson id", lesson_id)?;
    require_id("user id", user_id)?;

    if operations::get_lesson(db, lesson_id).await?.is_none() {
        return Err(EngineError::NotFound(format!("lesson {lesson_id}")));
    }

    let skill_level = progress::estimate_skill(db, user_id, SummaryScope::Lesson(lesson_id)).await?;
    let exercises = operations::list_exercises_for_lesson(db, lesson_id).await?;

    let target_difficulty = Difficulty::for_skill(skill_level);
    let pool = group_by_type(exercises);
    let picked = select_for_difficulty(&pool, target_difficulty, rng);

    if picked.is_empty() {
        tracing::info!(lesson_id, user_id, %target_difficulty, "no exercises available for session");
    } else {
        tracing::debug!(
            lesson_id,
            user_id,
            skill_level,
            %target_difficulty,
            count = picked.len(),
            "session selected"
        );
    }

    Ok(SessionExercises {
        lesson_id: lesson_id.to_string(),
        skill_level,
        target_difficulty,
        exercises: picked.into_iter().map(ExercisePrompt::from).collect(),
    })
}

/// Check an answer and record the attempt
pub async fn submit_answer(
    db: &Database,
    exercise_id: &str,
    user_id: &str,
    submitted_answer: Option<&str>,
) -> Result<EvaluationResult, EngineError> {
    require_id("exercise id", exercise_id)?;
    require_id("user id", user_id)?;
    if submitted_answer.map_or(true, |answer| answer.trim().is_empty()) {
        return Err(EngineError::Validation("submitted answer is required".to_string()));
    }

    let exercise = operations::get_exercise(db, exercise_id)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("exercise {exercise_id}")))?;

    let evaluation = evaluate(&exercise, submitted_answer)?;

    let record = progress::record_attempt(
        db,
        user_id,
        &exercise.lesson_id,
        &exercise.id,
        ProgressUpdate {
            completed: true,
            correct: evaluation.is_correct,
        },
    )
    .await?;

    tracing::debug!(
        exercise_id,
        user_id,
        is_correct = evaluation.is_correct,
        attempts = record.attempts,
        "answer recorded"
    );

    Ok(EvaluationResult {
        exercise_id: exercise.id,
        is_correct: evaluation.is_correct,
        correct_answer: evaluation.correct_answer,
        explanation: evaluation.explanation,
        attempts: record.attempts,
    })
}
