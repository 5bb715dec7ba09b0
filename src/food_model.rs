//! # Food Data Model
//!
//! Row types for the three relational tables the chatbot answers over, plus
//! the [`FoodDatabase`] snapshot that bundles them.
//!
//! ## Core Concepts
//!
//! - **Dish**: a named Thai dish with a type/category (ต้ม, แกง, ผัด, ...)
//! - **Ingredient**: a raw material with per-100g calories and a purchase
//!   price denominated in a purchase unit (กิโลกรัม, ขวด, กระป๋อง, ...)
//! - **RecipeLine**: one (dish, ingredient, amount, unit) usage record; the
//!   amount is kept as text because real data contains fractions ("1/2") and
//!   phrases ("สำหรับทอด") alongside plain numbers
//!
//! The core never creates or mutates rows; tables arrive whole, once, from
//! the data-loading side and are read-only for the duration of a question.

use serde::{Deserialize, Serialize};

/// A named Thai dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub dish_id: i64,
    pub dish_name: String,
    /// Category used only to pick a cooking-method hint (e.g. "ต้ม", "แกง").
    pub dish_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An ingredient with nutrition and purchase-price data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub calories_per_100g: f64,
    pub price_per_unit: f64,
    /// The unit the price is denominated in (purchase unit), which is not
    /// necessarily the unit recipes measure the ingredient in.
    pub unit: String,
}

/// One ingredient usage within a dish's recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub dish_id: i64,
    pub ingredient_id: i64,
    /// Usually numeric text, but may be a fraction ("1/2") or free text
    /// ("สำหรับทอด"); numeric interpretation happens in the estimator.
    pub amount: String,
    /// Recipe-local unit (กรัม, ช้อนโต๊ะ, เม็ด, ใบ, ...).
    pub unit: String,
    #[serde(default)]
    pub notes: String,
}

/// An immutable snapshot of the three tables for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodDatabase {
    pub dishes: Vec<Dish>,
    pub ingredients: Vec<Ingredient>,
    pub recipe_lines: Vec<RecipeLine>,
}

impl FoodDatabase {
    /// Look up an ingredient row by id. Missing ids are a known data-quality
    /// case; callers drop the recipe line rather than failing.
    pub fn ingredient_by_id(&self, ingredient_id: i64) -> Option<&Ingredient> {
        self.ingredients
            .iter()
            .find(|i| i.ingredient_id == ingredient_id)
    }

    /// All recipe lines belonging to a dish, in table order.
    pub fn recipe_lines_for(&self, dish_id: i64) -> Vec<&RecipeLine> {
        self.recipe_lines
            .iter()
            .filter(|r| r.dish_id == dish_id)
            .collect()
    }

    /// The built-in sample dataset: 3 dishes, 10 ingredients, 14 recipe lines.
    pub fn sample() -> Self {
        let dishes = vec![
            dish(1, "ต้มยำกุ้ง", "ต้ม"),
            dish(2, "แกงเขียวหวานไก่", "แกง"),
            dish(3, "ผัดไทย", "ผัด"),
        ];

        let ingredients = vec![
            ingredient(1, "กุ้ง", 100.0, 300.0, "กิโลกรัม"),
            ingredient(2, "น้ำพริกเผา", 200.0, 80.0, "ขวด"),
            ingredient(3, "น้ำมะนาว", 5.0, 20.0, "ขวด"),
            ingredient(4, "พริกขี้หนู", 40.0, 100.0, "กิโลกรัม"),
            ingredient(5, "ข่า", 60.0, 50.0, "กิโลกรัม"),
            ingredient(6, "ไก่", 120.0, 80.0, "กิโลกรัม"),
            ingredient(7, "กะทิ", 230.0, 60.0, "กระป๋อง"),
            ingredient(8, "พริกแกง", 180.0, 90.0, "ขวด"),
            ingredient(9, "ใบมะกรูด", 30.0, 20.0, "กิโลกรัม"),
            ingredient(10, "เส้นผัดไทย", 350.0, 40.0, "กิโลกรัม"),
        ];

        let recipe_lines = vec![
            line(1, 1, "300", "กรัม", ""),
            line(1, 2, "2", "ช้อนโต๊ะ", ""),
            line(1, 3, "3", "ช้อนโต๊ะ", ""),
            line(1, 4, "5", "เม็ด", "สด"),
            line(1, 5, "50", "กรัม", "หั่นแว่น"),
            line(2, 6, "500", "กรัม", ""),
            line(2, 7, "400", "กรัม", ""),
            line(2, 8, "3", "ช้อนโต๊ะ", ""),
            line(2, 9, "5", "ใบ", "ฉีก"),
            line(2, 4, "3", "เม็ด", ""),
            line(3, 10, "200", "กรัม", ""),
            line(3, 1, "100", "กรัม", ""),
            line(3, 3, "2", "ช้อนโต๊ะ", ""),
            line(3, 4, "2", "เม็ด", ""),
        ];

        Self {
            dishes,
            ingredients,
            recipe_lines,
        }
    }
}

fn dish(dish_id: i64, name: &str, dish_type: &str) -> Dish {
    Dish {
        dish_id,
        dish_name: name.to_string(),
        dish_type: dish_type.to_string(),
        description: None,
    }
}

fn ingredient(id: i64, name: &str, calories: f64, price: f64, unit: &str) -> Ingredient {
    Ingredient {
        ingredient_id: id,
        ingredient_name: name.to_string(),
        calories_per_100g: calories,
        price_per_unit: price,
        unit: unit.to_string(),
    }
}

fn line(dish_id: i64, ingredient_id: i64, amount: &str, unit: &str, notes: &str) -> RecipeLine {
    RecipeLine {
        dish_id,
        ingredient_id,
        amount: amount.to_string(),
        unit: unit.to_string(),
        notes: notes.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_table_sizes() {
        let db = FoodDatabase::sample();
        assert_eq!(db.dishes.len(), 3);
        assert_eq!(db.ingredients.len(), 10);
        assert_eq!(db.recipe_lines.len(), 14);
    }

    #[test]
    fn test_recipe_lines_for_dish() {
        let db = FoodDatabase::sample();
        let lines = db.recipe_lines_for(1);
        assert_eq!(lines.len(), 5);
        // Table order is preserved
        assert_eq!(lines[0].ingredient_id, 1);
        assert_eq!(lines[4].ingredient_id, 5);
    }

    #[test]
    fn test_ingredient_lookup() {
        let db = FoodDatabase::sample();
        assert_eq!(db.ingredient_by_id(7).unwrap().ingredient_name, "กะทิ");
        assert!(db.ingredient_by_id(99).is_none());
    }
}
