//! Answer evaluation.
//!
//! Choice exercises (multiple choice, matching) compare the raw option id.
//! Every other type is free text and is compared after [`normalize`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::normalize;
use crate::types::Exercise;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("submitted answer is missing")]
    MissingAnswer,
}

pub fn evaluate(exercise: &Exercise, submitted: Option<&str>) -> Result<Evaluation, EvaluationError> {
    let submitted = match submitted {
        Some(answer) if !answer.trim().is_empty() => answer,
        _ => return Err(EvaluationError::MissingAnswer),
    };

    if exercise.exercise_type.is_choice() {
        Ok(evaluate_choice(exercise, submitted))
    } else {
        Ok(Evaluation {
            is_correct: normalize(submitted) == normalize(&exercise.correct_answer),
            correct_answer: exercise.correct_answer.clone(),
            explanation: exercise.explanation.clone(),
        })
    }
}

fn evaluate_choice(exercise: &Exercise, submitted: &str) -> Evaluation {
    let is_correct = submitted == exercise.correct_answer;

    let explanation = if is_correct {
        exercise.explanation.clone()
    } else {
        let display = exercise
            .option_text(&exercise.correct_answer)
            .unwrap_or(exercise.correct_answer.as_str());
        let hint = format!("The correct answer is \"{display}\".");
        Some(match exercise.explanation.as_deref() {
            Some(text) if !text.trim().is_empty() => format!("{hint} {text}"),
            _ => hint,
        })
    };

    Evaluation {
        is_correct,
        correct_answer: exercise.correct_answer.clone(),
        explanation,
    }
}
