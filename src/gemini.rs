//! # Gemini-Backed Responder
//!
//! The alternative answer path: instead of the heuristic pipeline, serialize
//! the table structure plus a row sample into a fixed prompt template and let
//! the model do the reasoning. The model's text comes back verbatim; nothing
//! here parses it.
//!
//! API failures are folded into a Thai error string, matching the heuristic
//! responder's contract that no failure escapes as an error.

use crate::food_model::{Dish, FoodDatabase, Ingredient, RecipeLine};
use anyhow::{anyhow, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

/// How many rows of each table the prompt carries.
const DISH_SAMPLE_ROWS: usize = 5;
const INGREDIENT_SAMPLE_ROWS: usize = 5;
const RECIPE_SAMPLE_ROWS: usize = 10;

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// Build the full prompt for a question over the loaded tables.
pub fn build_prompt(question: &str, db: &FoodDatabase) -> String {
    let mut prompt = format!(
        "You are a Thai food expert with access to a database of Thai dishes, \
         ingredients and recipes.\n\
         Answer the following question based on the data provided below.\n\n\
         QUESTION: {question}\n\n\
         DATABASE STRUCTURE:\n\
         1. Thai Dishes:\n{}\n\n\
         2. Ingredients:\n{}\n\n\
         3. Recipe Ingredients:\n{}\n\n\
         DATABASE CONTENT:\n\
         1. Thai Dishes (First {DISH_SAMPLE_ROWS} rows):\n{}\n\n\
         2. Ingredients (First {INGREDIENT_SAMPLE_ROWS} rows):\n{}\n\n\
         3. Recipe Ingredients (First {RECIPE_SAMPLE_ROWS} rows):\n{}\n\n\
         Provide a thorough answer based on the data. Do not include any code in your response.\n\
         If you need to calculate something, perform the calculation yourself and provide the result.\n\
         If the information is not in the database, politely say so.\n\
         Always respond in Thai language.",
        dish_structure(),
        ingredient_structure(),
        recipe_structure(),
        dish_sample(&db.dishes),
        ingredient_sample(&db.ingredients),
        recipe_sample(&db.recipe_lines),
    );

    // Calorie questions get a step-by-step analysis guide naming the dish.
    if question.to_lowercase().contains("calorie") || question.contains("แคลอรี") {
        if let Some(dish_name) = crate::dish_extractor::extract_dish_name(question) {
            prompt.push_str(&format!(
                "\n\nANALYSIS GUIDE:\n\
                 To calculate the calories of {dish_name}, you should:\n\
                 1. Find the dish_id for \"{dish_name}\" in the Thai dishes table\n\
                 2. Use that dish_id to find all ingredients in the recipe ingredients table\n\
                 3. For each ingredient, look up its calories_per_100g in the ingredients table\n\
                 4. Calculate total calories based on the amount of each ingredient used\n\
                 5. Convert units appropriately (e.g., spoons to grams)\n\
                 6. Present the total calories and breakdown by main ingredients"
            ));
        }
    }

    prompt
}

fn dish_structure() -> &'static str {
    "dish_id: integer\ndish_name: text\ndish_type: text"
}

fn ingredient_structure() -> &'static str {
    "ingredient_id: integer\ningredient_name: text\ncalories_per_100g: number\n\
     price_per_unit: number\nunit: text"
}

fn recipe_structure() -> &'static str {
    "dish_id: integer\ningredient_id: integer\namount: text\nunit: text\nnotes: text"
}

fn dish_sample(dishes: &[Dish]) -> String {
    rows_or_unavailable(dishes.iter().take(DISH_SAMPLE_ROWS).map(|d| {
        format!("{} | {} | {}", d.dish_id, d.dish_name, d.dish_type)
    }))
}

fn ingredient_sample(ingredients: &[Ingredient]) -> String {
    rows_or_unavailable(ingredients.iter().take(INGREDIENT_SAMPLE_ROWS).map(|i| {
        format!(
            "{} | {} | {} | {} | {}",
            i.ingredient_id, i.ingredient_name, i.calories_per_100g, i.price_per_unit, i.unit
        )
    }))
}

fn recipe_sample(lines: &[RecipeLine]) -> String {
    rows_or_unavailable(lines.iter().take(RECIPE_SAMPLE_ROWS).map(|r| {
        format!(
            "{} | {} | {} | {} | {}",
            r.dish_id, r.ingredient_id, r.amount, r.unit, r.notes
        )
    }))
}

fn rows_or_unavailable(rows: impl Iterator<Item = String>) -> String {
    let joined = rows.collect::<Vec<_>>().join("\n");
    if joined.is_empty() {
        "Not available".to_string()
    } else {
        joined
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<TextPart>,
}

#[derive(Serialize, Deserialize)]
struct TextPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

/// Thin client for the Generative Language REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Answer a question through the model. The model text is returned
    /// verbatim; any transport or shape failure becomes a Thai error string.
    pub async fn answer_question(&self, question: &str, db: &FoodDatabase) -> String {
        let prompt = build_prompt(question, db);
        info!("Sending {}-char prompt to Gemini", prompt.len());

        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => format!("เกิดข้อผิดพลาดในการเรียกใช้ Gemini API: {e}"),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![TextPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(GEMINI_ENDPOINT)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .context("Gemini request failed")?
            .error_for_status()
            .context("Gemini returned an error status")?;

        let body: GenerateResponse = response
            .json()
            .await
            .context("Gemini response was not valid JSON")?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| anyhow!("Gemini response contained no candidates"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_question_and_samples() {
        let db = FoodDatabase::sample();
        let prompt = build_prompt("ส่วนผสมของผัดไทย", &db);
        assert!(prompt.contains("QUESTION: ส่วนผสมของผัดไทย"));
        assert!(prompt.contains("ต้มยำกุ้ง"));
        assert!(prompt.contains("Always respond in Thai language."));
    }

    #[test]
    fn test_recipe_sample_truncated_to_ten() {
        let db = FoodDatabase::sample();
        let sample = recipe_sample(&db.recipe_lines);
        assert_eq!(sample.lines().count(), 10);
    }

    #[test]
    fn test_calorie_question_gets_analysis_guide() {
        let db = FoodDatabase::sample();
        let prompt = build_prompt("แคลอรี่ของต้มยำกุ้ง", &db);
        assert!(prompt.contains("ANALYSIS GUIDE:"));
        assert!(prompt.contains("To calculate the calories of ต้มยำกุ้ง"));

        let prompt = build_prompt("ส่วนผสมของผัดไทย", &db);
        assert!(!prompt.contains("ANALYSIS GUIDE:"));
    }

    #[test]
    fn test_empty_tables_marked_unavailable() {
        let prompt = build_prompt("สวัสดี", &FoodDatabase::default());
        assert!(prompt.contains("Not available"));
    }
}
