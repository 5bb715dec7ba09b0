//! # Thai Food Q&A Chatbot
//!
//! Answers natural-language questions about Thai dishes (calories,
//! ingredients, estimated cost) over a small relational dataset, either with
//! a heuristic pipeline or by prompting Gemini with the table contents.

pub mod dataset;
pub mod dish_extractor;
pub mod dish_resolver;
pub mod estimator;
pub mod food_model;
pub mod gemini;
pub mod intent;
pub mod responder;
