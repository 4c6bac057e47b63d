//! # Structured Ingredient Data Model
//!
//! This module defines the structured ingredient record persisted with each recipe,
//! the closed classification vocabularies (category and match type), and the
//! aggregate values the matcher computes per query.
//!
//! ## Core Concepts
//!
//! - **StructuredIngredient**: `(amount, unit, name)` plus recipe metadata
//! - **RecipeRecord**: a stored recipe and its ingredient list
//! - **Category**: how important an ingredient is to the recipe (`base` = pantry staple)
//! - **MatchType**: transient availability annotation for display
//! - **MatchDetails / MatchPercentage / MatchTypeCounts**: per-query aggregates, never persisted
//!
//! ## Usage
//!
//! ```rust
//! use pantry_match::ingredient_model::{Category, MatchType, StructuredIngredient};
//!
//! let garlic = StructuredIngredient::new("garlic")
//!     .with_amount("2", "clove")
//!     .with_category(Category::Flavor)
//!     .with_match_type(MatchType::Exact);
//! assert!(garlic.has_quantity());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A recipe ingredient split into amount, unit and name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredIngredient {
    /// Ingredient name without any leading quantity (e.g., "garlic", "yellow onion, diced")
    pub name: String,

    /// Numeric literal as written ("2", "1.5", "2-3", "1/2"), empty when unspecified
    #[serde(default)]
    pub amount: String,

    /// Canonical unit from the fixed vocabulary, empty when there is none
    #[serde(default)]
    pub unit: String,

    /// Importance of the ingredient; unset when missing or unrecognized
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<Category>,

    /// Acceptable substitutes, in order of preference
    #[serde(default)]
    pub substitutes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,

    /// Rendering-only copy of `name`; never a lookup key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Availability annotation added at query time
    #[serde(
        rename = "matchType",
        default,
        deserialize_with = "lenient_match_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub match_type: Option<MatchType>,
}

/// A stored recipe as seen by the engine, keyed by its store id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: i64,
    pub title: String,
    pub ingredients: Vec<StructuredIngredient>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Ingredient importance within a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Key,
    Important,
    Flavor,
    /// Pantry staple, assumed always available
    Base,
}

/// How a recipe ingredient relates to the user's pantry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// The pantry has the ingredient itself
    Exact,
    /// The pantry has one of the listed substitutes
    Substitute,
    /// The pantry has something with enough words in common
    Partial,
    /// Nothing in the pantry matches
    #[serde(rename = "none")]
    Missing,
}

/// Aggregate match result for one recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    pub exact_matches: usize,
    pub substitute_matches: usize,
    pub missing_ingredients: Vec<String>,
}

/// Share of a recipe's ingredients available in the pantry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPercentage {
    pub matching_count: usize,
    pub total_count: usize,
    /// Rounded to the nearest whole percent, 0 for an empty recipe
    pub percentage: u32,
}

/// Counts of annotated match types, excluding base ingredients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTypeCounts {
    pub exact: usize,
    pub substitute: usize,
    pub missing: usize,
    pub total: usize,
}

impl StructuredIngredient {
    /// Create a new ingredient with just a name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            amount: String::new(),
            unit: String::new(),
            category: None,
            substitutes: Vec::new(),
            notes: None,
            is_required: None,
            display_name: None,
            match_type: None,
        }
    }

    /// Set amount and unit
    pub fn with_amount(mut self, amount: &str, unit: &str) -> Self {
        self.amount = amount.to_string();
        self.unit = unit.to_string();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_substitutes<I, S>(mut self, substitutes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.substitutes = substitutes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = Some(match_type);
        self
    }

    /// Check if an amount has been recorded
    pub fn has_quantity(&self) -> bool {
        !self.amount.is_empty()
    }

    /// Check if this is a pantry staple
    pub fn is_base(&self) -> bool {
        self.category == Some(Category::Base)
    }

    /// The name to render: `display_name` when set, else `name`
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for StructuredIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.amount.is_empty() {
            write!(f, "{} ", self.amount)?;
        }
        if !self.unit.is_empty() {
            write!(f, "{} ", self.unit)?;
        }
        write!(f, "{}", self.label())
    }
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Key => "key",
            Category::Important => "important",
            Category::Flavor => "flavor",
            Category::Base => "base",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "key" => Ok(Category::Key),
            "important" => Ok(Category::Important),
            "flavor" | "flavour" => Ok(Category::Flavor),
            "base" => Ok(Category::Base),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Substitute => "substitute",
            MatchType::Partial => "partial",
            MatchType::Missing => "none",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = ParseMatchTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(MatchType::Exact),
            "substitute" => Ok(MatchType::Substitute),
            "partial" => Ok(MatchType::Partial),
            "none" | "missing" => Ok(MatchType::Missing),
            _ => Err(ParseMatchTypeError(s.to_string())),
        }
    }
}

/// Unknown category string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown ingredient category: {}", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

/// Unknown match type string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMatchTypeError(pub String);

impl fmt::Display for ParseMatchTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown match type: {}", self.0)
    }
}

impl std::error::Error for ParseMatchTypeError {}

// Unknown strings load as unset rather than failing the whole recipe.
fn lenient_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.parse() {
        Ok(category) => Some(category),
        Err(e) => {
            if !value.trim().is_empty() {
                warn!("{}, treating as unset", e);
            }
            None
        }
    }))
}

fn lenient_match_type<'de, D>(deserializer: D) -> Result<Option<MatchType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.parse() {
        Ok(match_type) => Some(match_type),
        Err(e) => {
            if !value.trim().is_empty() {
                warn!("{}, treating as unset", e);
            }
            None
        }
    }))
}
