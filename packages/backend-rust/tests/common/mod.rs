#![allow(dead_code)]

use lesson_algo::Lesson;
use lesson_backend::db::config::DbConfig;
use lesson_backend::db::operations::{self, NewExercise};
use lesson_backend::db::{Database, DbPool};
use serde_json::{json, Value};
use tempfile::TempDir;

pub struct TestDb {
    pub db: Database,
    _dir: TempDir,
}

pub async fn create_test_db() -> TestDb {
    create_test_db_with(|_| {}).await
}

pub async fn create_test_db_with(configure: impl FnOnce(&mut DbConfig)) -> TestDb {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db_path = dir.path().join("lessons.db");

    let mut config =
        DbConfig::for_url(format!("sqlite:{}", db_path.display())).expect("sqlite url");
    config.max_connections = 5;
    configure(&mut config);

    let db = Database::connect(config).await.expect("failed to connect");
    db.migrate().await.expect("migration failed");

    TestDb { db, _dir: dir }
}

pub fn new_user_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub async fn insert_lesson(db: &Database, lesson_id: &str, order_index: i32) {
    operations::insert_lesson(
        db,
        &Lesson {
            id: lesson_id.to_string(),
            title: format!("Lesson {lesson_id}"),
            description: None,
            order_index,
        },
    )
    .await
    .expect("insert lesson");
}

pub struct ExerciseFixture<'a> {
    pub id: &'a str,
    pub exercise_type: &'a str,
    pub difficulty: &'a str,
    pub correct_answer: &'a str,
    pub options: Option<Value>,
}

impl<'a> ExerciseFixture<'a> {
    pub fn new(id: &'a str, exercise_type: &'a str, difficulty: &'a str) -> Self {
        Self {
            id,
            exercise_type,
            difficulty,
            correct_answer: "a",
            options: Some(json!([
                {"id": "a", "text": "안녕하세요"},
                {"id": "b", "text": "감사합니다"}
            ])),
        }
    }

    pub fn answer(mut self, correct_answer: &'a str) -> Self {
        self.correct_answer = correct_answer;
        self
    }

    pub fn options(mut self, options: Option<Value>) -> Self {
        self.options = options;
        self
    }
}

pub async fn insert_exercises(db: &Database, lesson_id: &str, fixtures: Vec<ExerciseFixture<'_>>) {
    for (index, fixture) in fixtures.into_iter().enumerate() {
        let exercise: NewExercise = serde_json::from_value(json!({
            "id": fixture.id,
            "lessonId": lesson_id,
            "type": fixture.exercise_type,
            "difficulty": fixture.difficulty,
            "question": format!("Question for {}", fixture.id),
            "options": fixture.options,
            "correctAnswer": fixture.correct_answer,
            "explanation": "Polite form.",
            "orderIndex": index as i32 + 1,
        }))
        .expect("exercise json");
        operations::insert_exercise(db, &exercise).await.expect("insert exercise");
    }
}

pub fn sqlite_pool(db: &Database) -> &sqlx::SqlitePool {
    match db.pool() {
        DbPool::Sqlite(pool) => pool,
        DbPool::Postgres(_) => panic!("tests run against sqlite"),
    }
}
