//! # Question Intent Classification
//!
//! Routes a question to one of the answerable topics via keyword containment.
//! No ML, no confidence scores: checks run in a fixed priority order
//! (calories, then ingredients, then cost) and the first hit wins, so a
//! question mentioning both calories and price is treated as a calorie
//! question.

use lazy_static::lazy_static;
use regex::Regex;

/// Default serving count assumed when a cost question names none.
pub const DEFAULT_SERVINGS: u32 = 4;

lazy_static! {
    /// Serving-count clause: "สำหรับ 4 คน".
    static ref SERVINGS_PATTERN: Regex =
        Regex::new(r"(\d+)\s*คน").expect("serving-count pattern should be valid");
}

/// The coarse category of what a question asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionIntent {
    Calories,
    Ingredients,
    Cost,
    Other,
}

/// Classify a question by keyword containment, first match wins.
pub fn classify_intent(question: &str) -> QuestionIntent {
    let lower = question.to_lowercase();

    if lower.contains("calorie") || question.contains("แคลอรี") {
        QuestionIntent::Calories
    } else if question.contains("ส่วนผสม")
        || lower.contains("ingredient")
        || question.contains("วัตถุดิบ")
    {
        QuestionIntent::Ingredients
    } else if question.contains("ราคา")
        || lower.contains("price")
        || lower.contains("cost")
        || question.contains("งบประมาณ")
    {
        QuestionIntent::Cost
    } else {
        QuestionIntent::Other
    }
}

/// Pull a serving count out of a cost question ("สำหรับ 4 คน"); defaults to
/// [`DEFAULT_SERVINGS`] when absent or unparseable.
pub fn extract_servings(question: &str) -> u32 {
    if question.contains("สำหรับ") {
        if let Some(captures) = SERVINGS_PATTERN.captures(question) {
            if let Ok(n) = captures[1].parse::<u32>() {
                return n;
            }
        }
    }
    DEFAULT_SERVINGS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calorie_intent() {
        assert_eq!(classify_intent("แคลอรี่ของต้มยำกุ้ง"), QuestionIntent::Calories);
        assert_eq!(classify_intent("How many calories in pad thai"), QuestionIntent::Calories);
    }

    #[test]
    fn test_ingredient_intent() {
        assert_eq!(
            classify_intent("ส่วนผสมของแกงเขียวหวานไก่มีอะไรบ้าง"),
            QuestionIntent::Ingredients
        );
        assert_eq!(classify_intent("วัตถุดิบผัดไทย"), QuestionIntent::Ingredients);
    }

    #[test]
    fn test_cost_intent() {
        assert_eq!(
            classify_intent("ราคาในการทำผัดไทยสำหรับ 4 คน"),
            QuestionIntent::Cost
        );
        assert_eq!(classify_intent("งบประมาณทำต้มยำกุ้ง"), QuestionIntent::Cost);
    }

    #[test]
    fn test_priority_order() {
        // Calories outranks cost when both keywords appear.
        assert_eq!(
            classify_intent("แคลอรี่และราคาของผัดไทย"),
            QuestionIntent::Calories
        );
    }

    #[test]
    fn test_other_intent() {
        assert_eq!(classify_intent("สวัสดีครับ"), QuestionIntent::Other);
    }

    #[test]
    fn test_servings_extraction() {
        assert_eq!(extract_servings("ราคาในการทำผัดไทยสำหรับ 6 คน"), 6);
        assert_eq!(extract_servings("ราคาของผัดไทย"), DEFAULT_SERVINGS);
        // The count only applies inside a "สำหรับ" clause.
        assert_eq!(extract_servings("ผัดไทย 2 คน"), DEFAULT_SERVINGS);
    }
}
