//! Adaptive Exercise Selection
//!
//! For every exercise type in the pool, one exercise matching the learner's
//! difficulty tier is drawn uniformly at random:
//! - skill < 0.3 -> easy
//! - 0.3 <= skill < 0.7 -> medium (easy accepted as fallback)
//! - skill >= 0.7 -> hard
//!
//! Types without an acceptable exercise are skipped. The picks are then
//! shuffled (Fisher-Yates) so presentation order says nothing about type.
//!
//! The random source is always passed in. [`ExerciseSelector`] bundles a
//! seedable ChaCha generator for callers that want reproducible sessions.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::pool::{acceptable, ExercisePool};
use crate::types::{Difficulty, Exercise};

/// Pick one exercise per type for the skill level, then shuffle
pub fn select<R: Rng + ?Sized>(pool: &ExercisePool, skill: f64, rng: &mut R) -> Vec<Exercise> {
    select_for_difficulty(pool, Difficulty::for_skill(skill), rng)
}

pub fn select_for_difficulty<R: Rng + ?Sized>(
    pool: &ExercisePool,
    target: Difficulty,
    rng: &mut R,
) -> Vec<Exercise> {
    let mut picks: Vec<Exercise> = Vec::with_capacity(pool.type_count());

    for (_, members) in pool.iter() {
        let candidates = acceptable(members, target);
        if let Some(pick) = candidates.choose(rng) {
            picks.push((*pick).clone());
        }
    }

    picks.shuffle(rng);
    picks
}

/// Selector owning its random generator
#[derive(Clone, Debug)]
pub struct ExerciseSelector {
    rng: ChaCha8Rng,
}

impl ExerciseSelector {
    /// Seeded from the thread-local generator
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a selector with a specific seed (for testing)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn select(&mut self, pool: &ExercisePool, skill: f64) -> Vec<Exercise> {
        select(pool, skill, &mut self.rng)
    }
}

impl Default for ExerciseSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::fixtures::exercise;
    use crate::pool::group_by_type;
    use crate::types::ExerciseType;

    fn ids(exercises: &[Exercise]) -> Vec<String> {
        exercises.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_low_skill_skips_types_without_easy_items() {
        let pool = group_by_type(vec![
            exercise("mc-easy", ExerciseType::MultipleChoice, Difficulty::Easy),
            exercise("mc-hard", ExerciseType::MultipleChoice, Difficulty::Hard),
            exercise("text-medium", ExerciseType::Text, Difficulty::Medium),
        ]);

        let mut selector = ExerciseSelector::with_seed(7);
        let picked = selector.select(&pool, 0.1);

        assert_eq!(ids(&picked), vec!["mc-easy"]);
    }

    #[test]
    fn test_medium_falls_back_to_easy_never_hard() {
        let pool = group_by_type(vec![
            exercise("text-easy", ExerciseType::Text, Difficulty::Easy),
            exercise("mc-hard", ExerciseType::MultipleChoice, Difficulty::Hard),
        ]);

        for seed in 0..20 {
            let picked = ExerciseSelector::with_seed(seed).select(&pool, 0.5);
            assert_eq!(ids(&picked), vec!["text-easy"]);
        }
    }

    #[test]
    fn test_high_skill_never_substitutes_down() {
        let pool = group_by_type(vec![
            exercise("text-easy", ExerciseType::Text, Difficulty::Easy),
            exercise("text-medium", ExerciseType::Text, Difficulty::Medium),
        ]);

        assert!(ExerciseSelector::with_seed(1).select(&pool, 0.9).is_empty());
    }

    #[test]
    fn test_one_pick_per_type() {
        let pool = group_by_type(vec![
            exercise("t1", ExerciseType::Text, Difficulty::Easy),
            exercise("t2", ExerciseType::Text, Difficulty::Easy),
            exercise("m1", ExerciseType::MultipleChoice, Difficulty::Easy),
            exercise("l1", ExerciseType::Listening, Difficulty::Easy),
            exercise("s1", ExerciseType::Speaking, Difficulty::Easy),
        ]);

        let picked = ExerciseSelector::with_seed(3).select(&pool, 0.0);
        assert_eq!(picked.len(), 4);

        let mut types: Vec<ExerciseType> = picked.iter().map(|e| e.exercise_type.clone()).collect();
        types.sort();
        types.dedup();
        assert_eq!(types.len(), 4);
    }

    #[test]
    fn test_same_seed_same_session() {
        let pool = group_by_type(vec![
            exercise("t1", ExerciseType::Text, Difficulty::Hard),
            exercise("t2", ExerciseType::Text, Difficulty::Hard),
            exercise("m1", ExerciseType::MultipleChoice, Difficulty::Hard),
            exercise("m2", ExerciseType::MultipleChoice, Difficulty::Hard),
            exercise("l1", ExerciseType::Listening, Difficulty::Hard),
        ]);

        let first = ExerciseSelector::with_seed(42).select(&pool, 0.8);
        let second = ExerciseSelector::with_seed(42).select(&pool, 0.8);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_shuffle_varies_type_order() {
        let pool = group_by_type(vec![
            exercise("t", ExerciseType::Text, Difficulty::Easy),
            exercise("m", ExerciseType::MultipleChoice, Difficulty::Easy),
            exercise("l", ExerciseType::Listening, Difficulty::Easy),
            exercise("s", ExerciseType::Speaking, Difficulty::Easy),
        ]);

        let mut selector = ExerciseSelector::with_seed(11);
        let mut first_ids = std::collections::HashSet::new();
        for _ in 0..50 {
            let picked = selector.select(&pool, 0.0);
            first_ids.insert(picked[0].id.clone());
        }
        assert!(first_ids.len() > 1);
    }

    #[test]
    fn test_empty_pool_yields_empty_session() {
        let pool = group_by_type(Vec::new());
        assert!(ExerciseSelector::with_seed(0).select(&pool, 0.5).is_empty());
    }
}
