use lesson_algo::Lesson;
use serde_json::json;

use crate::db::operations::{self, NewExercise};
use crate::db::Database;

pub const SAMPLE_LESSON_ID: &str = "korean-greetings";

pub fn sample_lesson() -> Lesson {
    Lesson {
        id: SAMPLE_LESSON_ID.to_string(),
        title: "Korean Greetings".to_string(),
        description: Some("Everyday greetings and polite expressions".to_string()),
        order_index: 1,
    }
}

pub fn sample_exercises() -> Result<Vec<NewExercise>, serde_json::Error> {
    serde_json::from_value(json!([
        {
            "id": "greet-mc-hello",
            "lessonId": SAMPLE_LESSON_ID,
            "type": "multiple_choice",
            "difficulty": "easy",
            "question": "Which phrase means \"hello\"?",
            "options": [
                {"id": "a", "text": "안녕하세요"},
                {"id": "b", "text": "감사합니다"},
                {"id": "c", "text": "죄송합니다"}
            ],
            "correctAnswer": "a",
            "explanation": "안녕하세요 is the standard polite greeting.",
            "orderIndex": 1
        },
        {
            "id": "greet-mc-thanks",
            "lessonId": SAMPLE_LESSON_ID,
            "type": "multiple_choice",
            "difficulty": "medium",
            "question": "How do you say \"thank you\" politely?",
            "options": {"a": "안녕히 가세요", "b": "감사합니다", "c": "괜찮아요"},
            "correctAnswer": "b",
            "explanation": "감사합니다 is the formal way to thank someone.",
            "orderIndex": 2
        },
        {
            "id": "greet-text-romanize",
            "lessonId": SAMPLE_LESSON_ID,
            "type": "text",
            "difficulty": "easy",
            "question": "Romanize 안녕하세요.",
            "correctAnswer": "annyeonghaseyo",
            "explanation": "Revised Romanization of 안녕하세요.",
            "orderIndex": 3
        },
        {
            "id": "greet-text-goodbye",
            "lessonId": SAMPLE_LESSON_ID,
            "type": "text",
            "difficulty": "hard",
            "question": "Write the goodbye you say to someone who is leaving.",
            "correctAnswer": "안녕히 가세요",
            "explanation": "Said by the person staying behind.",
            "orderIndex": 4
        },
        {
            "id": "greet-match-pairs",
            "lessonId": SAMPLE_LESSON_ID,
            "type": "matching",
            "difficulty": "medium",
            "question": "Match 감사합니다 with its meaning.",
            "options": {"x": "thank you", "y": "sorry", "z": "goodbye"},
            "correctAnswer": "x",
            "orderIndex": 5
        },
        {
            "id": "greet-listen-hello",
            "lessonId": SAMPLE_LESSON_ID,
            "type": "listening",
            "difficulty": "hard",
            "question": "Type what you hear.",
            "correctAnswer": "안녕하세요",
            "orderIndex": 6
        },
        {
            "id": "greet-speak-sorry",
            "lessonId": SAMPLE_LESSON_ID,
            "type": "speaking",
            "difficulty": "medium",
            "question": "Say \"I'm sorry\" formally.",
            "correctAnswer": "죄송합니다",
            "orderIndex": 7
        }
    ]))
}

/// Insert the sample lesson. Existing rows are left untouched.
pub async fn seed_sample_content(db: &Database) -> Result<usize, sqlx::Error> {
    let exercises = sample_exercises().map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

    operations::insert_lesson(db, &sample_lesson()).await?;
    for exercise in &exercises {
        operations::insert_exercise(db, exercise).await?;
    }

    tracing::info!(lesson_id = SAMPLE_LESSON_ID, count = exercises.len(), "seeded sample lesson");
    Ok(exercises.len())
}
