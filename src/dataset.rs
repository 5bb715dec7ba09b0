//! # Dataset Loading
//!
//! Reads the three tables from a single JSON document. Real exports of this
//! dataset are sloppy about column types (numbers arrive as strings and the
//! `amount` column mixes numbers with phrases), so numeric columns accept
//! either JSON form and `amount` is always kept as text for the estimator to
//! interpret.
//!
//! Expected shape:
//!
//! ```json
//! {
//!   "dishes": [{"dish_id": 1, "dish_name": "...", "dish_type": "..."}],
//!   "ingredients": [{"ingredient_id": 1, "ingredient_name": "...",
//!                    "calories_per_100g": "100", "price_per_unit": 300,
//!                    "unit": "กิโลกรัม"}],
//!   "recipe_ingredients": [{"dish_id": 1, "ingredient_id": 1,
//!                           "amount": "1/2", "unit": "ช้อนโต๊ะ", "notes": ""}]
//! }
//! ```

use crate::food_model::{Dish, FoodDatabase, Ingredient, RecipeLine};
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

/// Load a [`FoodDatabase`] from a JSON file.
pub fn load_database(path: &Path) -> Result<FoodDatabase> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;
    let db = parse_database(&content)
        .with_context(|| format!("Failed to parse dataset file: {}", path.display()))?;
    info!(
        "Loaded dataset: {} dishes, {} ingredients, {} recipe lines",
        db.dishes.len(),
        db.ingredients.len(),
        db.recipe_lines.len()
    );
    Ok(db)
}

/// Parse a [`FoodDatabase`] from a JSON string.
pub fn parse_database(json: &str) -> Result<FoodDatabase> {
    let raw: RawDatabase = serde_json::from_str(json).context("Malformed dataset JSON")?;

    Ok(FoodDatabase {
        dishes: raw.dishes.into_iter().map(Dish::from).collect(),
        ingredients: raw.ingredients.into_iter().map(Ingredient::from).collect(),
        recipe_lines: raw
            .recipe_ingredients
            .into_iter()
            .map(RecipeLine::from)
            .collect(),
    })
}

#[derive(Deserialize)]
struct RawDatabase {
    #[serde(default)]
    dishes: Vec<RawDish>,
    #[serde(default)]
    ingredients: Vec<RawIngredient>,
    #[serde(default)]
    recipe_ingredients: Vec<RawRecipeLine>,
}

#[derive(Deserialize)]
struct RawDish {
    #[serde(deserialize_with = "flexible_i64")]
    dish_id: i64,
    dish_name: String,
    dish_type: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawIngredient {
    #[serde(deserialize_with = "flexible_i64")]
    ingredient_id: i64,
    ingredient_name: String,
    #[serde(deserialize_with = "flexible_f64")]
    calories_per_100g: f64,
    #[serde(deserialize_with = "flexible_f64")]
    price_per_unit: f64,
    unit: String,
}

#[derive(Deserialize)]
struct RawRecipeLine {
    #[serde(deserialize_with = "flexible_i64")]
    dish_id: i64,
    #[serde(deserialize_with = "flexible_i64")]
    ingredient_id: i64,
    #[serde(deserialize_with = "flexible_text")]
    amount: String,
    unit: String,
    #[serde(default)]
    notes: String,
}

impl From<RawDish> for Dish {
    fn from(raw: RawDish) -> Self {
        Dish {
            dish_id: raw.dish_id,
            dish_name: raw.dish_name,
            dish_type: raw.dish_type,
            description: raw.description,
        }
    }
}

impl From<RawIngredient> for Ingredient {
    fn from(raw: RawIngredient) -> Self {
        Ingredient {
            ingredient_id: raw.ingredient_id,
            ingredient_name: raw.ingredient_name,
            calories_per_100g: raw.calories_per_100g,
            price_per_unit: raw.price_per_unit,
            unit: raw.unit,
        }
    }
}

impl From<RawRecipeLine> for RecipeLine {
    fn from(raw: RawRecipeLine) -> Self {
        RecipeLine {
            dish_id: raw.dish_id,
            ingredient_id: raw.ingredient_id,
            amount: raw.amount,
            unit: raw.unit,
            notes: raw.notes,
        }
    }
}

/// Accept a number or numeric-looking string.
fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("not a number: {s:?}"))),
    }
}

/// Accept an integer or integer-looking string.
fn flexible_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = flexible_f64(deserializer)?;
    Ok(value as i64)
}

/// Accept any scalar and keep it as text; the estimator decides what it means.
fn flexible_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Number(f64),
        Text(String),
    }

    match Scalar::deserialize(deserializer)? {
        // Render whole numbers without a trailing ".0" so "2" stays "2".
        Scalar::Number(n) if n.fract() == 0.0 => Ok(format!("{}", n as i64)),
        Scalar::Number(n) => Ok(n.to_string()),
        Scalar::Text(s) => Ok(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_mixed_column_types() {
        let json = r#"{
            "dishes": [{"dish_id": "1", "dish_name": "ต้มยำกุ้ง", "dish_type": "ต้ม"}],
            "ingredients": [{
                "ingredient_id": 1, "ingredient_name": "กุ้ง",
                "calories_per_100g": "100", "price_per_unit": 300.0,
                "unit": "กิโลกรัม"
            }],
            "recipe_ingredients": [
                {"dish_id": 1, "ingredient_id": 1, "amount": 300, "unit": "กรัม"},
                {"dish_id": 1, "ingredient_id": 1, "amount": "1/2", "unit": "ช้อนโต๊ะ", "notes": "สด"}
            ]
        }"#;

        let db = parse_database(json).unwrap();
        assert_eq!(db.dishes[0].dish_id, 1);
        assert_eq!(db.ingredients[0].calories_per_100g, 100.0);
        assert_eq!(db.recipe_lines[0].amount, "300");
        assert_eq!(db.recipe_lines[1].amount, "1/2");
        assert_eq!(db.recipe_lines[1].notes, "สด");
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let db = parse_database("{}").unwrap();
        assert!(db.dishes.is_empty());
        assert!(db.recipe_lines.is_empty());
    }

    #[test]
    fn test_non_numeric_price_is_an_error() {
        let json = r#"{
            "ingredients": [{
                "ingredient_id": 1, "ingredient_name": "กุ้ง",
                "calories_per_100g": 100, "price_per_unit": "แพง",
                "unit": "กิโลกรัม"
            }]
        }"#;
        assert!(parse_database(json).is_err());
    }
}
