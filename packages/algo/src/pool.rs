//! Exercise pool grouped by type.
//!
//! Groups keep first-appearance order and each group keeps the relative
//! order of the source list, so selection over a pool is reproducible for a
//! given random seed.

use serde::Serialize;

use crate::types::{Difficulty, Exercise, ExerciseType};

#[derive(Clone, Debug, Default, Serialize)]
pub struct ExercisePool {
    groups: Vec<(ExerciseType, Vec<Exercise>)>,
}

impl ExercisePool {
    pub fn group_by_type(exercises: impl IntoIterator<Item = Exercise>) -> Self {
        let mut groups: Vec<(ExerciseType, Vec<Exercise>)> = Vec::new();

        for exercise in exercises {
            match groups
                .iter_mut()
                .find(|(exercise_type, _)| *exercise_type == exercise.exercise_type)
            {
                Some((_, members)) => members.push(exercise),
                None => groups.push((exercise.exercise_type.clone(), vec![exercise])),
            }
        }

        Self { groups }
    }

    pub fn get(&self, exercise_type: &ExerciseType) -> Option<&[Exercise]> {
        self.groups
            .iter()
            .find(|(t, _)| t == exercise_type)
            .map(|(_, members)| members.as_slice())
    }

    /// Groups in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&ExerciseType, &[Exercise])> {
        self.groups.iter().map(|(t, members)| (t, members.as_slice()))
    }

    /// Exercises of one type acceptable for the target difficulty
    pub fn candidates(&self, exercise_type: &ExerciseType, target: Difficulty) -> Vec<&Exercise> {
        acceptable(self.get(exercise_type).unwrap_or_default(), target)
    }

    pub fn type_count(&self) -> usize {
        self.groups.len()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, members)| members.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub(crate) fn acceptable(members: &[Exercise], target: Difficulty) -> Vec<&Exercise> {
    members
        .iter()
        .filter(|exercise| exercise.difficulty.accepted_for(target))
        .collect()
}

/// Convenience wrapper over [`ExercisePool::group_by_type`]
pub fn group_by_type(exercises: impl IntoIterator<Item = Exercise>) -> ExercisePool {
    ExercisePool::group_by_type(exercises)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::{AnswerOption, Difficulty, Exercise, ExerciseType};

    pub fn exercise(id: &str, exercise_type: ExerciseType, difficulty: Difficulty) -> Exercise {
        Exercise {
            id: id.to_string(),
            lesson_id: "lesson-1".to_string(),
            exercise_type,
            difficulty,
            question: format!("question {id}"),
            options: vec![
                AnswerOption {
                    id: "a".to_string(),
                    text: "안녕하세요".to_string(),
                },
                AnswerOption {
                    id: "b".to_string(),
                    text: "감사합니다".to_string(),
                },
            ],
            correct_answer: "a".to_string(),
            explanation: Some("Standard polite greeting.".to_string()),
            order_index: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::exercise;
    use super::*;

    #[test]
    fn test_groups_preserve_order() {
        let pool = group_by_type(vec![
            exercise("1", ExerciseType::Text, Difficulty::Easy),
            exercise("2", ExerciseType::MultipleChoice, Difficulty::Easy),
            exercise("3", ExerciseType::Text, Difficulty::Hard),
            exercise("4", ExerciseType::MultipleChoice, Difficulty::Medium),
        ]);

        let types: Vec<&ExerciseType> = pool.iter().map(|(t, _)| t).collect();
        assert_eq!(types, vec![&ExerciseType::Text, &ExerciseType::MultipleChoice]);

        let text_ids: Vec<&str> = pool
            .get(&ExerciseType::Text)
            .unwrap()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(text_ids, vec!["1", "3"]);
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.type_count(), 2);
    }

    #[test]
    fn test_unknown_type_kept_literally() {
        let custom = ExerciseType::Other("word_order".to_string());
        let pool = group_by_type(vec![exercise("1", custom.clone(), Difficulty::Easy)]);
        assert_eq!(pool.get(&custom).map(|g| g.len()), Some(1));
    }

    #[test]
    fn test_candidates_apply_fallback() {
        let pool = group_by_type(vec![
            exercise("e", ExerciseType::Text, Difficulty::Easy),
            exercise("m", ExerciseType::Text, Difficulty::Medium),
            exercise("h", ExerciseType::Text, Difficulty::Hard),
        ]);

        let ids = |target| -> Vec<String> {
            pool.candidates(&ExerciseType::Text, target)
                .into_iter()
                .map(|e| e.id.clone())
                .collect()
        };

        assert_eq!(ids(Difficulty::Easy), vec!["e"]);
        assert_eq!(ids(Difficulty::Medium), vec!["e", "m"]);
        assert_eq!(ids(Difficulty::Hard), vec!["h"]);
        assert!(pool.candidates(&ExerciseType::Speaking, Difficulty::Easy).is_empty());
    }

    #[test]
    fn test_empty_pool() {
        let pool = group_by_type(Vec::new());
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
    }
}
