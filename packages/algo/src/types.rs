//! Common Types and Constants
//!
//! Shared data structures used across all algorithm modules.

use std::fmt;

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Skill below this value targets easy exercises
pub const EASY_SKILL_CEILING: f64 = 0.3;

/// Skill at or above this value targets hard exercises
pub const HARD_SKILL_FLOOR: f64 = 0.7;

// ==================== Exercise Types ====================

/// Kind of exercise.
///
/// Unknown values coming from content storage are kept verbatim in
/// [`ExerciseType::Other`] so newer content never fails to load.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExerciseType {
    MultipleChoice,
    Text,
    Matching,
    Listening,
    Speaking,
    Other(String),
}

impl ExerciseType {
    pub fn parse(value: &str) -> Self {
        match value {
            "multiple_choice" => Self::MultipleChoice,
            "text" => Self::Text,
            "matching" => Self::Matching,
            "listening" => Self::Listening,
            "speaking" => Self::Speaking,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::Text => "text",
            Self::Matching => "matching",
            Self::Listening => "listening",
            Self::Speaking => "speaking",
            Self::Other(value) => value,
        }
    }

    /// Answers are opaque option identifiers rather than free text.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::MultipleChoice | Self::Matching)
    }
}

impl From<String> for ExerciseType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ExerciseType> for String {
    fn from(value: ExerciseType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Tier targeted for a learner with the given skill level.
    ///
    /// A non-finite skill is treated as a new learner.
    pub fn for_skill(skill: f64) -> Self {
        let skill = if skill.is_finite() { skill } else { 0.0 };
        if skill < EASY_SKILL_CEILING {
            Self::Easy
        } else if skill < HARD_SKILL_FLOOR {
            Self::Medium
        } else {
            Self::Hard
        }
    }

    /// Whether an exercise of `self` difficulty may be served when `target` is wanted.
    ///
    /// Medium sessions fall back to easy items; nothing else substitutes.
    pub fn accepted_for(&self, target: Difficulty) -> bool {
        *self == target || (target == Difficulty::Medium && *self == Difficulty::Easy)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Content ====================

/// One selectable answer option
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

/// Lesson metadata
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
}

/// Exercise with its answer key
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub lesson_id: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub difficulty: Difficulty,
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub order_index: i32,
}

impl Exercise {
    /// Display text of the option with the given id
    pub fn option_text(&self, option_id: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.id == option_id)
            .map(|option| option.text.as_str())
    }
}

// ==================== Progress ====================

/// Aggregate progress counters for one scope (a lesson or a whole account)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_exercises: i64,
    pub completed_exercises: i64,
    pub correct_answers: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_type_round_trips_known_and_unknown() {
        assert_eq!(ExerciseType::parse("multiple_choice"), ExerciseType::MultipleChoice);
        assert_eq!(
            ExerciseType::parse("drag_and_drop"),
            ExerciseType::Other("drag_and_drop".to_string())
        );
        assert_eq!(ExerciseType::Other("drag_and_drop".into()).as_str(), "drag_and_drop");

        let json = serde_json::to_string(&ExerciseType::Listening).unwrap();
        assert_eq!(json, "\"listening\"");
        let parsed: ExerciseType = serde_json::from_str("\"fill_blank\"").unwrap();
        assert_eq!(parsed, ExerciseType::Other("fill_blank".to_string()));
    }

    #[test]
    fn test_difficulty_tiers() {
        assert_eq!(Difficulty::for_skill(0.0), Difficulty::Easy);
        assert_eq!(Difficulty::for_skill(0.29), Difficulty::Easy);
        assert_eq!(Difficulty::for_skill(0.3), Difficulty::Medium);
        assert_eq!(Difficulty::for_skill(0.69), Difficulty::Medium);
        assert_eq!(Difficulty::for_skill(0.7), Difficulty::Hard);
        assert_eq!(Difficulty::for_skill(1.0), Difficulty::Hard);
        assert_eq!(Difficulty::for_skill(f64::NAN), Difficulty::Easy);
    }

    #[test]
    fn test_difficulty_fallback_only_medium_to_easy() {
        assert!(Difficulty::Easy.accepted_for(Difficulty::Medium));
        assert!(!Difficulty::Hard.accepted_for(Difficulty::Medium));
        assert!(!Difficulty::Medium.accepted_for(Difficulty::Easy));
        assert!(!Difficulty::Medium.accepted_for(Difficulty::Hard));
        assert!(!Difficulty::Easy.accepted_for(Difficulty::Hard));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse(" Hard "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("expert"), None);
    }
}
