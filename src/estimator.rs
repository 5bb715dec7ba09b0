//! # Quantity Estimation
//!
//! Turns free-text recipe amounts into numbers and aggregates them into
//! per-dish calorie and cost estimates.
//!
//! The conversion tables are empirical estimates carried over from the
//! dataset's conventions (a tablespoon of a typical ingredient ≈ 15 g, a
//! 700 mL bottle ≈ 46 tablespoons), kept as named constants rather than
//! derived physics. Amount normalization runs in one of two contexts with
//! different fallback constants: calorie math is gram-denominated while cost
//! math is denominated in the purchase unit.

use crate::food_model::FoodDatabase;

/// Free-text amount used for frying oil, with no usable number.
const FOR_FRYING: &str = "สำหรับทอด";

/// Fallback grams for "สำหรับทอด" in the calorie context.
const FRYING_GRAMS: f64 = 50.0;
/// Fallback purchase-unit fraction for "สำหรับทอด" in the cost context
/// (≈ 50 mL of a liter-denominated unit).
const FRYING_PURCHASE_UNITS: f64 = 0.05;
/// Default amounts when the text is neither numeric nor a fraction.
const DEFAULT_CALORIE_AMOUNT: f64 = 10.0;
const DEFAULT_COST_AMOUNT: f64 = 0.1;

/// Estimated ingredient weight per spoon, in grams.
const TABLESPOON_GRAMS: f64 = 15.0;
const TEASPOON_GRAMS: f64 = 5.0;

const GRAMS_PER_KILOGRAM: f64 = 1000.0;
/// One 700 mL bottle holds about 46 tablespoons (15 mL each).
const TABLESPOONS_PER_BOTTLE: f64 = 46.0;
/// One 700 mL bottle holds about 140 teaspoons (5 mL each).
const TEASPOONS_PER_BOTTLE: f64 = 140.0;
/// Generic divisor for unit pairs with no known conversion ratio.
const GENERIC_UNIT_DIVISOR: f64 = 10.0;

/// A recipe line counts as a "main" cost item above this many baht (strict).
const MAIN_ITEM_THRESHOLD: f64 = 5.0;
/// Marginal cost of each additional person relative to the first.
const MARGINAL_SERVING_FACTOR: f64 = 0.7;

/// Which fallback-constant table [`normalize_amount`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountContext {
    Calories,
    Cost,
}

/// Parse a free-text recipe amount into a number.
///
/// Tries a direct numeric parse, then the "สำหรับทอด" fixed fallback, then a
/// `numerator/denominator` fraction, then the context default. Never fails.
pub fn normalize_amount(amount_text: &str, ctx: AmountContext) -> f64 {
    let text = amount_text.trim();

    if let Ok(amount) = text.parse::<f64>() {
        return amount;
    }

    if text == FOR_FRYING {
        return match ctx {
            AmountContext::Calories => FRYING_GRAMS,
            AmountContext::Cost => FRYING_PURCHASE_UNITS,
        };
    }

    if text.contains('/') {
        if let Some(value) = parse_fraction(text) {
            return value;
        }
    }

    match ctx {
        AmountContext::Calories => DEFAULT_CALORIE_AMOUNT,
        AmountContext::Cost => DEFAULT_COST_AMOUNT,
    }
}

fn parse_fraction(text: &str) -> Option<f64> {
    let mut parts = text.splitn(2, '/');
    let numerator: f64 = parts.next()?.trim().parse().ok()?;
    let denominator: f64 = parts.next()?.trim().parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// A dish's estimated calories with a per-ingredient breakdown in
/// recipe-row order.
#[derive(Debug, Clone, PartialEq)]
pub struct CalorieEstimate {
    pub total: f64,
    /// (ingredient name, calorie contribution) per resolvable recipe line.
    pub breakdown: Vec<(String, f64)>,
}

/// Sum estimated calories over a dish's recipe lines.
///
/// Lines whose ingredient id has no master row are silently dropped; that is
/// accepted lossy behavior for this dataset, not an error.
pub fn total_calories(dish_id: i64, db: &FoodDatabase) -> CalorieEstimate {
    let mut total = 0.0;
    let mut breakdown = Vec::new();

    for line in db.recipe_lines_for(dish_id) {
        let Some(ingredient) = db.ingredient_by_id(line.ingredient_id) else {
            continue;
        };
        let amount = normalize_amount(&line.amount, AmountContext::Calories);
        let calories = match line.unit.as_str() {
            "กรัม" => amount / 100.0 * ingredient.calories_per_100g,
            "ช้อนโต๊ะ" => amount * TABLESPOON_GRAMS / 100.0 * ingredient.calories_per_100g,
            "ช้อนชา" => amount * TEASPOON_GRAMS / 100.0 * ingredient.calories_per_100g,
            _ => amount / GENERIC_UNIT_DIVISOR * ingredient.calories_per_100g,
        };
        total += calories;
        breakdown.push((ingredient.ingredient_name.clone(), calories));
    }

    CalorieEstimate { total, breakdown }
}

/// A dish's estimated batch cost with its high-cost line items.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    /// Unscaled cost of one batch, in baht.
    pub total: f64,
    /// (ingredient name, line cost) for lines strictly above the main-item
    /// threshold, in recipe-row order.
    pub main_items: Vec<(String, f64)>,
}

/// Sum estimated ingredient costs over a dish's recipe lines.
///
/// Unit conversion is a lookup on (purchase unit, recipe unit) pairs with
/// known ratios; anything else gets the generic divisor. Matching is by
/// containment so variants like "ขวดเล็ก" still hit the bottle ratios.
pub fn total_cost(dish_id: i64, db: &FoodDatabase) -> CostEstimate {
    let mut total = 0.0;
    let mut main_items = Vec::new();

    for line in db.recipe_lines_for(dish_id) {
        let Some(ingredient) = db.ingredient_by_id(line.ingredient_id) else {
            continue;
        };
        let amount = normalize_amount(&line.amount, AmountContext::Cost);
        let purchase_unit = ingredient.unit.as_str();
        let recipe_unit = line.unit.as_str();

        let unit_cost = if purchase_unit.contains("กิโลกรัม") && recipe_unit.contains("กรัม") {
            amount / GRAMS_PER_KILOGRAM * ingredient.price_per_unit
        } else if purchase_unit.contains("ขวด") && recipe_unit.contains("ช้อนโต๊ะ") {
            amount / TABLESPOONS_PER_BOTTLE * ingredient.price_per_unit
        } else if purchase_unit.contains("ขวด") && recipe_unit.contains("ช้อนชา") {
            amount / TEASPOONS_PER_BOTTLE * ingredient.price_per_unit
        } else {
            amount / GENERIC_UNIT_DIVISOR * ingredient.price_per_unit
        };

        total += unit_cost;
        if unit_cost > MAIN_ITEM_THRESHOLD {
            main_items.push((ingredient.ingredient_name.clone(), unit_cost));
        }
    }

    CostEstimate { total, main_items }
}

/// Economy-of-scale adjustment: per-person cost for `servings` people.
///
/// Each additional person adds [`MARGINAL_SERVING_FACTOR`] of the first
/// person's cost, so per-person cost falls as the group grows while the
/// group total still rises. Identity at one serving.
pub fn scale_for_servings(total_cost: f64, servings: u32) -> f64 {
    if servings > 1 {
        total_cost * (1.0 + (servings as f64 - 1.0) * MARGINAL_SERVING_FACTOR) / servings as f64
    } else {
        total_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food_model::FoodDatabase;

    #[test]
    fn test_normalize_numeric() {
        assert_eq!(normalize_amount("300", AmountContext::Calories), 300.0);
        assert_eq!(normalize_amount(" 2.5 ", AmountContext::Cost), 2.5);
    }

    #[test]
    fn test_normalize_fraction() {
        assert_eq!(normalize_amount("1/2", AmountContext::Calories), 0.5);
        assert_eq!(normalize_amount("1/2", AmountContext::Cost), 0.5);
        assert_eq!(normalize_amount("3/4", AmountContext::Calories), 0.75);
    }

    #[test]
    fn test_normalize_frying_fallback_is_context_dependent() {
        assert_eq!(normalize_amount("สำหรับทอด", AmountContext::Calories), 50.0);
        assert_eq!(normalize_amount("สำหรับทอด", AmountContext::Cost), 0.05);
    }

    #[test]
    fn test_normalize_default_fallbacks() {
        assert_eq!(normalize_amount("ตามชอบ", AmountContext::Calories), 10.0);
        assert_eq!(normalize_amount("ตามชอบ", AmountContext::Cost), 0.1);
        // Malformed fractions fall back to the default too.
        assert_eq!(normalize_amount("1/0", AmountContext::Calories), 10.0);
    }

    #[test]
    fn test_gram_lines_are_exact() {
        let db = FoodDatabase::sample();
        let estimate = total_calories(1, &db);
        // First line of ต้มยำกุ้ง: 300 g of กุ้ง at 100 kcal/100g.
        assert_eq!(estimate.breakdown[0], ("กุ้ง".to_string(), 300.0));
    }

    #[test]
    fn test_spoon_conversions() {
        let db = FoodDatabase::sample();
        let estimate = total_calories(1, &db);
        // Second line: 2 tablespoons of น้ำพริกเผา at 200 kcal/100g.
        let (name, calories) = &estimate.breakdown[1];
        assert_eq!(name, "น้ำพริกเผา");
        assert!((calories - 2.0 * 15.0 / 100.0 * 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_calorie_breakdown_order_and_total() {
        let db = FoodDatabase::sample();
        let estimate = total_calories(1, &db);
        assert_eq!(estimate.breakdown.len(), 5);
        let sum: f64 = estimate.breakdown.iter().map(|(_, c)| c).sum();
        assert!((estimate.total - sum).abs() < 1e-9);
    }

    #[test]
    fn test_cost_kilogram_gram_conversion() {
        let db = FoodDatabase::sample();
        let estimate = total_cost(1, &db);
        // 300 g of กุ้ง at 300 baht/kg = 90 baht, well over the threshold.
        assert_eq!(estimate.main_items[0], ("กุ้ง".to_string(), 90.0));
    }

    #[test]
    fn test_main_item_threshold_is_strict() {
        let mut db = FoodDatabase::sample();
        // Force the first line to cost exactly 5 baht: 50 g at 100 baht/kg.
        db.recipe_lines[0].amount = "50".to_string();
        db.ingredients[0].price_per_unit = 100.0;
        let estimate = total_cost(1, &db);
        assert!(estimate
            .main_items
            .iter()
            .all(|(name, _)| name != "กุ้ง"));
    }

    #[test]
    fn test_join_miss_drops_line() {
        let mut db = FoodDatabase::sample();
        db.recipe_lines.push(crate::food_model::RecipeLine {
            dish_id: 1,
            ingredient_id: 999,
            amount: "100".to_string(),
            unit: "กรัม".to_string(),
            notes: String::new(),
        });
        let with_orphan = total_calories(1, &db);
        let baseline = total_calories(1, &FoodDatabase::sample());
        assert_eq!(with_orphan.total, baseline.total);
        assert_eq!(with_orphan.breakdown.len(), baseline.breakdown.len());
    }

    #[test]
    fn test_scaling_identity_at_one_serving() {
        assert_eq!(scale_for_servings(120.0, 1), 120.0);
    }

    #[test]
    fn test_scaling_per_person_decreases() {
        let per_four = scale_for_servings(100.0, 4);
        assert!(per_four < 100.0);
    }

    #[test]
    fn test_scaling_group_total_monotone() {
        let total = 87.5;
        let mut previous = 0.0;
        for n in 1..=10u32 {
            let group_total = scale_for_servings(total, n) * n as f64;
            assert!(group_total >= previous, "not monotone at n={n}");
            previous = group_total;
        }
    }
}
