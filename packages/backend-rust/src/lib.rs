pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod seed;
pub mod services;

pub use db::Database;
pub use error::EngineError;
pub use services::progress::{
    get_lesson_progress, get_user_progress, record_attempt, LessonProgress, SummaryScope,
};
pub use services::session::{
    select_session, submit_answer, EvaluationResult, ExercisePrompt, SessionExercises,
};
