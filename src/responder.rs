//! # Heuristic Responder
//!
//! The no-LLM answer path: classify the question, extract and resolve the
//! dish, aggregate over the tables, and render a canned Thai answer. Every
//! failure degrades to a textual message; [`answer_question`] never returns
//! an error and holds no state between calls, so identical inputs always
//! produce identical output.

use crate::dish_extractor::extract_dish_name;
use crate::dish_resolver::resolve_dish;
use crate::estimator::{scale_for_servings, total_calories, total_cost};
use crate::food_model::{Dish, FoodDatabase};
use crate::intent::{classify_intent, extract_servings, QuestionIntent};
use anyhow::Result;
use log::debug;

/// At most this many breakdown/main-item entries are rendered.
const MAX_LISTED_ITEMS: usize = 5;

/// Answer a question against a table snapshot. Pure function of its inputs;
/// all failure paths come back as user-facing text.
pub fn answer_question(question: &str, db: &FoodDatabase) -> String {
    let intent = classify_intent(question);
    let dish_name = extract_dish_name(question);
    debug!("question: {question:?}, intent: {intent:?}, extracted dish: {dish_name:?}");

    match intent {
        QuestionIntent::Calories => match dish_name {
            Some(name) => with_resolved_dish(&name, db, |dish| calorie_answer(dish, db)),
            None => usage_hint_calories(),
        },
        QuestionIntent::Ingredients => match dish_name {
            Some(name) => with_resolved_dish(&name, db, |dish| ingredients_answer(dish, db)),
            None => usage_hint_ingredients(),
        },
        QuestionIntent::Cost => {
            let servings = extract_servings(question);
            debug!("cost question, servings: {servings}");
            match dish_name {
                Some(name) => {
                    with_resolved_dish(&name, db, |dish| cost_answer(dish, db, servings))
                }
                None => usage_hint_cost(),
            }
        }
        QuestionIntent::Other => capability_summary(question),
    }
}

/// Resolve the dish and run the answer builder, folding a resolution miss
/// into the not-found message and any internal fault into the generic error
/// string.
fn with_resolved_dish<F>(name: &str, db: &FoodDatabase, build: F) -> String
where
    F: FnOnce(&Dish) -> Result<String>,
{
    match resolve_dish(name, &db.dishes) {
        Some(dish) => build(dish).unwrap_or_else(|e| analysis_error(&e)),
        None => dish_not_found(name),
    }
}

fn calorie_answer(dish: &Dish, db: &FoodDatabase) -> Result<String> {
    let estimate = total_calories(dish.dish_id, db);

    let breakdown = estimate
        .breakdown
        .iter()
        .take(MAX_LISTED_ITEMS)
        .map(|(name, calories)| format!("- {name}: {} แคลอรี่", calories.round()))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        "{} มีแคลอรี่ประมาณ {} แคลอรี่ต่อจาน\n\n\
         แคลอรี่จากวัตถุดิบหลัก:\n{}\n\n\
         โปรดทราบว่านี่เป็นการประมาณการเท่านั้น \
         ค่าแคลอรี่ที่แท้จริงอาจแตกต่างกันไปขึ้นอยู่กับขนาดของการเสิร์ฟและวิธีการปรุง",
        dish.dish_name,
        estimate.total.round(),
        breakdown
    ))
}

fn ingredients_answer(dish: &Dish, db: &FoodDatabase) -> Result<String> {
    let mut items = Vec::new();
    for line in db.recipe_lines_for(dish.dish_id) {
        // Lines with no master ingredient row are silently skipped.
        let Some(ingredient) = db.ingredient_by_id(line.ingredient_id) else {
            continue;
        };
        let mut item = format!(
            "- {} {} {}",
            ingredient.ingredient_name, line.amount, line.unit
        );
        if !line.notes.is_empty() {
            item.push_str(&format!(" ({})", line.notes));
        }
        items.push(item);
    }

    Ok(format!(
        "ส่วนผสมของ{}:\n\n{}\n\n\
         ขั้นตอนการทำ:\n\
         เนื่องจากในฐานข้อมูลนี้ไม่มีขั้นตอนการทำโดยละเอียด \
         แต่โดยทั่วไป{}มีวิธีทำคร่าวๆ ดังนี้:\n\
         - เตรียมส่วนผสมทั้งหมดให้พร้อม\n- {}",
        dish.dish_name,
        items.join("\n"),
        dish.dish_name,
        cooking_method_hint(&dish.dish_type)
    ))
}

fn cost_answer(dish: &Dish, db: &FoodDatabase, servings: u32) -> Result<String> {
    let estimate = total_cost(dish.dish_id, db);
    let per_person = scale_for_servings(estimate.total, servings);
    let displayed_total = (per_person * servings as f64).round();

    let main_items = estimate
        .main_items
        .iter()
        .take(MAX_LISTED_ITEMS)
        .map(|(name, cost)| format!("- {name}: {} บาท", cost.round()))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        "ราคาวัตถุดิบสำหรับการทำ{} สำหรับ {} คน โดยประมาณคือ {} บาท\n\n\
         วัตถุดิบหลักที่มีราคาสูง:\n{}\n\n\
         หมายเหตุ:\n\
         - ราคานี้เป็นเพียงการประมาณการจากราคาวัตถุดิบในฐานข้อมูลเท่านั้น\n\
         - ราคาอาจแตกต่างกันตามแหล่งที่ซื้อและฤดูกาล\n\
         - ไม่รวมค่าเครื่องปรุงพื้นฐานที่บ้านอาจมีอยู่แล้ว เช่น เกลือ น้ำตาล น้ำปลา",
        dish.dish_name, servings, displayed_total, main_items
    ))
}

/// Rough cooking-method hint keyed on the dish category.
fn cooking_method_hint(dish_type: &str) -> &'static str {
    match dish_type {
        "ต้ม" => "ต้มน้ำให้เดือด แล้วใส่วัตถุดิบลงไป ปรุงรสตามชอบ",
        "แกง" => "ผัดเครื่องแกงให้หอม เติมกะทิหรือน้ำ ใส่เนื้อสัตว์และผัก ปรุงรสตามชอบ",
        "ผัด" => "ตั้งกระทะให้ร้อน ใส่น้ำมัน แล้วผัดวัตถุดิบทั้งหมดให้สุก ปรุงรสตามชอบ",
        "ทอด" => "ตั้งกระทะน้ำมันให้ร้อน ทอดวัตถุดิบให้สุกกรอบ",
        "ยำ" => "เตรียมวัตถุดิบทั้งหมดให้พร้อม คลุกเคล้ากับน้ำยำรสเปรี้ยวหวานเผ็ด",
        "นึ่ง" => "เตรียมหม้อนึ่ง ใส่วัตถุดิบลงไปนึ่งจนสุก",
        "ตุ๋น" => "ใส่วัตถุดิบทั้งหมดลงในหม้อ แล้วตุ๋นไฟอ่อนเป็นเวลานาน",
        "ปิ้ง/ย่าง" => "หมักวัตถุดิบให้เข้าเครื่อง แล้วนำไปปิ้งหรือย่างให้สุก",
        "น้ำพริก" => "โขลกเครื่องปรุงทั้งหมดให้ละเอียด ปรุงรสตามชอบ",
        _ => "เตรียมและปรุงอาหารตามขั้นตอนมาตรฐานของอาหารประเภทนี้",
    }
}

fn dish_not_found(name: &str) -> String {
    format!(
        "ขออภัย ไม่พบข้อมูลอาหารชื่อ '{name}' ในฐานข้อมูล \
         กรุณาตรวจสอบการสะกดชื่ออาหารและลองใหม่อีกครั้ง"
    )
}

fn usage_hint_calories() -> String {
    "กรุณาระบุชื่ออาหารที่ต้องการทราบแคลอรี่ เช่น 'แคลอรี่ของต้มยำกุ้ง'".to_string()
}

fn usage_hint_ingredients() -> String {
    "กรุณาระบุชื่ออาหารที่ต้องการทราบส่วนผสม เช่น 'ส่วนผสมของต้มยำกุ้ง'".to_string()
}

fn usage_hint_cost() -> String {
    "กรุณาระบุชื่ออาหารที่ต้องการทราบราคา เช่น 'ราคาของต้มยำกุ้ง'".to_string()
}

fn capability_summary(question: &str) -> String {
    format!(
        "ขอบคุณสำหรับคำถามเกี่ยวกับ \"{question}\"\n\n\
         ฐานข้อมูลของเราสามารถตอบคำถามเกี่ยวกับ:\n\
         1. แคลอรี่ของอาหารไทย (เช่น \"แคลอรี่ของต้มยำกุ้ง\")\n\
         2. ส่วนผสมของอาหารไทย (เช่น \"ส่วนผสมของแกงเขียวหวาน\")\n\
         3. ราคาโดยประมาณในการทำอาหารไทย (เช่น \"ราคาในการทำผัดไทยสำหรับ 4 คน\")\n\n\
         กรุณาถามคำถามใหม่โดยระบุหัวข้อและชื่ออาหารที่ต้องการทราบข้อมูล"
    )
}

pub(crate) fn analysis_error(error: &anyhow::Error) -> String {
    format!("เกิดข้อผิดพลาดในการวิเคราะห์ข้อมูล: {error}")
}
