//! # Dish Resolver
//!
//! Resolves an extracted dish-name candidate against the dish table. Lookup
//! runs in two strategy layers: exact case-insensitive match first, then
//! substring containment. Each layer produces candidates in table order, so
//! when several dishes share a substring the ranking is deterministic and the
//! ambiguity is at least visible to callers via [`candidate_dishes`].

use crate::food_model::Dish;
use log::debug;

/// How a candidate matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    Exact,
    Substring,
}

/// A ranked resolver hit.
#[derive(Debug, Clone, PartialEq)]
pub struct DishMatch<'a> {
    pub dish: &'a Dish,
    pub kind: MatchKind,
}

/// All dishes matching `name`, exact matches ranked before substring matches,
/// table order within each tier.
pub fn candidate_dishes<'a>(name: &str, dishes: &'a [Dish]) -> Vec<DishMatch<'a>> {
    let query = name.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut exact = Vec::new();
    let mut partial = Vec::new();

    for dish in dishes {
        let dish_name = dish.dish_name.to_lowercase();
        if dish_name == query {
            exact.push(DishMatch {
                dish,
                kind: MatchKind::Exact,
            });
        } else if dish_name.contains(&query) {
            partial.push(DishMatch {
                dish,
                kind: MatchKind::Substring,
            });
        }
    }

    exact.extend(partial);
    exact
}

/// Best match for `name`, or `None` when the table has no dish containing it.
///
/// Multiple matches are not disambiguated beyond the exact-before-substring
/// ranking; the first candidate wins.
pub fn resolve_dish<'a>(name: &str, dishes: &'a [Dish]) -> Option<&'a Dish> {
    let candidates = candidate_dishes(name, dishes);
    if candidates.len() > 1 {
        debug!(
            "dish name '{name}' is ambiguous: {} candidates, taking '{}'",
            candidates.len(),
            candidates[0].dish.dish_name
        );
    }
    candidates.first().map(|m| m.dish)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food_model::FoodDatabase;

    #[test]
    fn test_exact_resolution() {
        let db = FoodDatabase::sample();
        let dish = resolve_dish("ต้มยำกุ้ง", &db.dishes).unwrap();
        assert_eq!(dish.dish_id, 1);
    }

    #[test]
    fn test_substring_resolution() {
        let db = FoodDatabase::sample();
        // A partial name still finds the dish.
        let dish = resolve_dish("แกงเขียวหวาน", &db.dishes).unwrap();
        assert_eq!(dish.dish_id, 2);
    }

    #[test]
    fn test_not_found() {
        let db = FoodDatabase::sample();
        assert!(resolve_dish("เมนูที่ไม่มีอยู่จริง", &db.dishes).is_none());
        assert!(resolve_dish("   ", &db.dishes).is_none());
    }

    #[test]
    fn test_exact_ranked_before_substring() {
        let dishes = vec![
            Dish {
                dish_id: 1,
                dish_name: "ข้าวผัดกุ้ง".to_string(),
                dish_type: "ผัด".to_string(),
                description: None,
            },
            Dish {
                dish_id: 2,
                dish_name: "กุ้ง".to_string(),
                dish_type: "อื่นๆ".to_string(),
                description: None,
            },
        ];
        // "กุ้ง" appears inside dish 1, but dish 2 matches exactly and wins
        // despite coming later in the table.
        let candidates = candidate_dishes("กุ้ง", &dishes);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].dish.dish_id, 2);
        assert_eq!(candidates[0].kind, MatchKind::Exact);
        assert_eq!(candidates[1].kind, MatchKind::Substring);
    }

    #[test]
    fn test_table_order_breaks_ties() {
        let db = FoodDatabase::sample();
        // A single-character query hits two sample dishes; both are
        // substring matches, so table order decides the ranking.
        let candidates = candidate_dishes("ไ", &db.dishes);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].dish.dish_id, 2);
        assert_eq!(candidates[1].dish.dish_id, 3);
    }
}
