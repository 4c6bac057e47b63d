//! # Availability Matcher
//!
//! Decides whether recipe ingredients are covered by a user's pantry and rolls
//! the per-ingredient results up into the statistics used for ranking and display.
//!
//! Availability is permissive: a pantry entry matches when either
//! string contains the other, or when the two share enough significant words.
//! A recipe calling for "yellow onion, diced" is satisfied by a pantry "onion".
//!
//! Nothing here mutates a recipe. Annotation returns copies.

use crate::ingredient_model::{
    MatchDetails, MatchPercentage, MatchType, MatchTypeCounts, RecipeRecord, StructuredIngredient,
};
use crate::text_processing::{normalize, tokens_overlap_enough};
use serde::Serialize;
use tracing::{debug, trace};

/// A recipe scored against a pantry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecipe {
    pub recipe_id: i64,
    pub title: String,
    pub match_percentage: MatchPercentage,
    pub details: MatchDetails,
    pub ingredients: Vec<StructuredIngredient>,
}

fn normalized_pantry<S: AsRef<str>>(pantry: &[S]) -> Vec<String> {
    pantry
        .iter()
        .map(|entry| normalize(entry.as_ref()))
        .collect()
}

fn contains_either_way(name: &str, entry: &str) -> bool {
    name.contains(entry) || entry.contains(name)
}

fn available_in(name: &str, pantry: &[String]) -> bool {
    pantry
        .iter()
        .any(|entry| contains_either_way(name, entry) || tokens_overlap_enough(name, entry))
}

/// Check whether an ingredient is covered by any pantry entry
///
/// Both sides are normalized first. Containment is plain substring search, so
/// a blank pantry entry covers every ingredient and a blank name is covered
/// by any entry.
///
/// # Examples
///
/// ```rust
/// use pantry_match::matcher::is_available;
///
/// assert!(is_available("yellow onion", &["onion"]));
/// assert!(!is_available("salt", &["pepper"]));
/// ```
pub fn is_available<S: AsRef<str>>(ingredient_name: &str, pantry: &[S]) -> bool {
    let name = normalize(ingredient_name);
    let result = available_in(&name, &normalized_pantry(pantry));
    trace!("'{}' available: {}", ingredient_name, result);
    result
}

/// Share of ingredients available in the pantry
pub fn match_percentage<S: AsRef<str>>(
    ingredients: &[StructuredIngredient],
    pantry: &[S],
) -> MatchPercentage {
    let pantry = normalized_pantry(pantry);
    let total_count = ingredients.len();
    let matching_count = ingredients
        .iter()
        .filter(|ingredient| available_in(&normalize(&ingredient.name), &pantry))
        .count();

    let percentage = if total_count == 0 {
        0
    } else {
        (matching_count as f64 / total_count as f64 * 100.0).round() as u32
    };

    MatchPercentage {
        matching_count,
        total_count,
        percentage,
    }
}

/// Count annotated match types, skipping base ingredients
///
/// Unset annotations count as missing. `Partial` falls in none of the buckets.
pub fn count_match_types(ingredients: &[StructuredIngredient]) -> MatchTypeCounts {
    let mut counts = MatchTypeCounts::default();

    for ingredient in ingredients.iter().filter(|i| !i.is_base()) {
        match ingredient.match_type {
            Some(MatchType::Exact) => counts.exact += 1,
            Some(MatchType::Substitute) => counts.substitute += 1,
            Some(MatchType::Missing) | None => counts.missing += 1,
            Some(MatchType::Partial) => {}
        }
    }

    counts.total = counts.exact + counts.substitute + counts.missing;
    counts
}

/// Summarize annotated ingredients, skipping base ingredients
pub fn match_details(ingredients: &[StructuredIngredient]) -> MatchDetails {
    let mut details = MatchDetails::default();

    for ingredient in ingredients.iter().filter(|i| !i.is_base()) {
        match ingredient.match_type {
            Some(MatchType::Exact) => details.exact_matches += 1,
            Some(MatchType::Substitute) => details.substitute_matches += 1,
            Some(MatchType::Missing) | None => {
                details.missing_ingredients.push(ingredient.name.clone())
            }
            Some(MatchType::Partial) => {}
        }
    }

    details
}

fn classify_in(ingredient: &StructuredIngredient, pantry: &[String]) -> MatchType {
    let name = normalize(&ingredient.name);

    if pantry.iter().any(|entry| contains_either_way(&name, entry)) {
        return MatchType::Exact;
    }

    if ingredient
        .substitutes
        .iter()
        .any(|substitute| available_in(&normalize(substitute), pantry))
    {
        return MatchType::Substitute;
    }

    if pantry.iter().any(|entry| tokens_overlap_enough(&name, entry)) {
        return MatchType::Partial;
    }

    MatchType::Missing
}

/// Classify one ingredient against the pantry
///
/// Containment is an exact match; otherwise a listed substitute being
/// available wins over a word-overlap partial match.
pub fn classify_ingredient<S: AsRef<str>>(
    ingredient: &StructuredIngredient,
    pantry: &[S],
) -> MatchType {
    classify_in(ingredient, &normalized_pantry(pantry))
}

/// Return copies of the ingredients with `match_type` filled in
pub fn annotate_match_types<S: AsRef<str>>(
    ingredients: &[StructuredIngredient],
    pantry: &[S],
) -> Vec<StructuredIngredient> {
    let pantry = normalized_pantry(pantry);
    ingredients
        .iter()
        .map(|ingredient| {
            let mut annotated = ingredient.clone();
            annotated.match_type = Some(classify_in(ingredient, &pantry));
            annotated
        })
        .collect()
}

/// Score every recipe against the pantry, best match first
///
/// Ties on percentage go to the recipe with fewer missing ingredients, then
/// to the title in alphabetical order.
pub fn rank_recipes<S: AsRef<str>>(recipes: &[RecipeRecord], pantry: &[S]) -> Vec<RankedRecipe> {
    let mut ranked: Vec<RankedRecipe> = recipes
        .iter()
        .map(|recipe| {
            let ingredients = annotate_match_types(&recipe.ingredients, pantry);
            RankedRecipe {
                recipe_id: recipe.id,
                title: recipe.title.clone(),
                match_percentage: match_percentage(&recipe.ingredients, pantry),
                details: match_details(&ingredients),
                ingredients,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.match_percentage
            .percentage
            .cmp(&a.match_percentage.percentage)
            .then_with(|| {
                a.details
                    .missing_ingredients
                    .len()
                    .cmp(&b.details.missing_ingredients.len())
            })
            .then_with(|| a.title.cmp(&b.title))
    });

    debug!(
        "Ranked {} recipes against a pantry of {} entries",
        ranked.len(),
        pantry.len()
    );
    ranked
}
