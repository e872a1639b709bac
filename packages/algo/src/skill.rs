//! Skill estimation from aggregate progress.
//!
//! `skill = (completion_rate + accuracy_rate) / 2`, each rate clamped to
//! [0, 1] first. A scope with no exercises yields 0.

use crate::sanitize::{safe_ratio, sanitize_rate};
use crate::types::{Difficulty, ProgressSummary};

pub fn estimate(summary: &ProgressSummary) -> f64 {
    if summary.total_exercises <= 0 {
        return 0.0;
    }

    let completion_rate = safe_ratio(summary.completed_exercises, summary.total_exercises);
    let accuracy_rate = safe_ratio(summary.correct_answers, summary.completed_exercises);

    sanitize_rate((completion_rate + accuracy_rate) / 2.0)
}

/// Difficulty tier for a summary
pub fn target_difficulty(summary: &ProgressSummary) -> Difficulty {
    Difficulty::for_skill(estimate(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: i64, completed: i64, correct: i64) -> ProgressSummary {
        ProgressSummary {
            total_exercises: total,
            completed_exercises: completed,
            correct_answers: correct,
        }
    }

    #[test]
    fn test_new_learner_is_zero() {
        assert_eq!(estimate(&summary(0, 0, 0)), 0.0);
        assert_eq!(estimate(&summary(0, 5, 5)), 0.0);
        assert_eq!(target_difficulty(&summary(0, 0, 0)), Difficulty::Easy);
    }

    #[test]
    fn test_nothing_completed_in_populated_lesson() {
        assert_eq!(estimate(&summary(10, 0, 0)), 0.0);
    }

    #[test]
    fn test_half_completed_all_correct() {
        let skill = estimate(&summary(10, 5, 5));
        assert!((skill - 0.75).abs() < 1e-9);
        assert_eq!(target_difficulty(&summary(10, 5, 5)), Difficulty::Hard);
    }

    #[test]
    fn test_mixed_progress_is_medium() {
        let skill = estimate(&summary(10, 4, 2));
        assert!((skill - 0.45).abs() < 1e-9);
        assert_eq!(target_difficulty(&summary(10, 4, 2)), Difficulty::Medium);
    }

    #[test]
    fn test_inconsistent_counters_are_clamped() {
        // more correct than completed, more completed than total
        assert_eq!(estimate(&summary(4, 9, 20)), 1.0);
        assert_eq!(estimate(&summary(4, -3, -1)), 0.0);
    }
}
