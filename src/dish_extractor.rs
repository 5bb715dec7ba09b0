//! # Dish Name Extractor
//!
//! Pulls a candidate dish name out of a free-form question using an ordered
//! cascade of pattern rules. The cascade is layered: multi-keyword rules for
//! compound questions run before single-keyword rules and the generic regex
//! fallback, so a price question with a serving clause ("ราคาในการทำผัดไทย
//! สำหรับ 4 คน") is not truncated as a plain "ราคาของ X" question.
//!
//! Each rule is a standalone function returning `Option<String>`; the cascade
//! evaluates them in order and stops at the first hit. This keeps rule
//! priority explicit and lets every rule be tested on its own.
//!
//! Extraction is best-effort by design: `None` is an expected, user-facing
//! outcome ("please name a dish"), not a defect.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    /// Generic fallback templates: text after a possessive/topic marker and
    /// before a terminator, text after a "to make" marker, text before a
    /// verb/property marker. Tried in order, first capture wins.
    static ref FALLBACK_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?:ของ|about|of|for|อาหาร|ชื่อ|เมนู)\s+([^\?\.]+?)(?:\s+and|\s*$|\s+สำหรับ|\s+ราคา|\s+แคลอรี่|\s+มีอะไร)"
        )
        .expect("topic-marker pattern should be valid"),
        Regex::new(r"(?:ทำ)([^\?\.]+?)(?:\s+and|\s*$|\s+สำหรับ|\s+ยังไง|\s+อย่างไร)")
            .expect("to-make pattern should be valid"),
        Regex::new(r"([^\?\.]+?)(?:\s+มี|\s+ประกอบด้วย|\s+ทำยังไง|\s+ราคา|\s+แคลอรี่)")
            .expect("property-marker pattern should be valid"),
    ];
}

/// One extraction rule: takes the normalized question, returns a dish-name
/// candidate or passes.
type ExtractionRule = fn(&str) -> Option<String>;

/// The cascade, in priority order. First match wins.
const RULES: &[ExtractionRule] = &[
    rule_price_with_servings,
    rule_calories_of,
    rule_ingredients_of,
    rule_ingredients_with_tail,
    rule_bare_calories,
    rule_price_of,
    rule_price_how_much,
    rule_regex_fallback,
    rule_short_question,
];

/// Extract a dish-name candidate from a free-form question.
///
/// Normalizes first (lowercase, strip `?` and the Thai repetition mark `ๆ`,
/// trim), then runs the rule cascade.
pub fn extract_dish_name(question: &str) -> Option<String> {
    let normalized = normalize(question);

    for rule in RULES {
        if let Some(name) = rule(&normalized) {
            let name = name.trim().to_string();
            if !name.is_empty() {
                return Some(name);
            }
        }
    }

    debug!("no dish name extracted from question: {question}");
    None
}

fn normalize(question: &str) -> String {
    question
        .to_lowercase()
        .replace('?', "")
        .replace('ๆ', "")
        .trim()
        .to_string()
}

/// Text after the first occurrence of `marker`, or `None` if absent.
fn after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    text.splitn(2, marker).nth(1).map(str::trim)
}

/// Text before the first occurrence of `marker`, or the whole text.
fn before<'a>(text: &'a str, marker: &str) -> &'a str {
    text.split(marker).next().unwrap_or(text).trim()
}

/// Price question with a serving-count clause: isolate the part before
/// "สำหรับ" and peel the price phrasing off it.
fn rule_price_with_servings(q: &str) -> Option<String> {
    if !(q.contains("ราคา") && q.contains("สำหรับ")) {
        return None;
    }
    let head = before(q, "สำหรับ");

    if head.contains("ราคาในการทำ") {
        return Some(head.replace("ราคาในการทำ", "").trim().to_string());
    }
    if head.contains("ราคา") && head.contains("ทำ") {
        return after(head, "ทำ").map(str::to_string);
    }
    if head.contains("ของ") {
        return after(head, "ของ").map(str::to_string);
    }
    // Assume the leading token is the price keyword and drop it.
    let parts: Vec<&str> = head.split_whitespace().collect();
    if parts.len() > 1 {
        return Some(parts[1..].join(" "));
    }
    None
}

fn rule_calories_of(q: &str) -> Option<String> {
    after(q, "แคลอรี่ของ").map(str::to_string)
}

fn rule_ingredients_of(q: &str) -> Option<String> {
    let rest = after(q, "ส่วนผสมของ")?;
    Some(before(rest, "มีอะไรบ้าง").to_string())
}

/// "ส่วนผสม ... มีอะไรบ้าง" without the possessive marker directly after the
/// keyword.
fn rule_ingredients_with_tail(q: &str) -> Option<String> {
    if !(q.contains("ส่วนผสม") && q.contains("มีอะไรบ้าง")) {
        return None;
    }
    let rest = after(q, "ส่วนผสม")?;
    let rest = before(rest, "มีอะไรบ้าง");
    if rest.contains("ของ") {
        return after(rest, "ของ").map(str::to_string);
    }
    Some(rest.to_string())
}

/// Standalone calorie keyword; only fires when a possessive marker remains,
/// otherwise falls through to the later rules.
fn rule_bare_calories(q: &str) -> Option<String> {
    if !q.contains("แคลอรี่") {
        return None;
    }
    let text = q.replace("แคลอรี่", "");
    after(text.trim(), "ของ").map(str::to_string)
}

fn rule_price_of(q: &str) -> Option<String> {
    after(q, "ราคาของ").map(str::to_string)
}

fn rule_price_how_much(q: &str) -> Option<String> {
    if !(q.contains("ราคา") && q.contains("เท่าไหร่")) {
        return None;
    }
    let text = q.replace("ราคา", "").replace("เท่าไหร่", "");
    after(text.trim(), "ของ").map(str::to_string)
}

fn rule_regex_fallback(q: &str) -> Option<String> {
    for pattern in FALLBACK_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(q) {
            if let Some(m) = captures.get(1) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }
    None
}

/// Short questions are often a bare dish name ("ต้มยำกุ้ง").
fn rule_short_question(q: &str) -> Option<String> {
    if q.split_whitespace().count() <= 3 {
        Some(q.to_string())
    } else {
        None
    }
}
