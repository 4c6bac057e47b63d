//! # Pantry Match
//!
//! Ingredient normalization and matching engine: splits noisy ingredient lines
//! into `(amount, unit, name)` and matches recipe ingredients against a user's
//! pantry to classify and rank recipes.

pub mod config;
pub mod db;
pub mod display;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod localization;
pub mod matcher;
pub mod measurement_patterns;
pub mod recipe_fixer;
pub mod text_processing;
