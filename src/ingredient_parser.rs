//! # Ingredient Parser
//!
//! This module splits a raw ingredient description into a structured
//! `(amount, unit, name)` triple.
//!
//! ## Features
//!
//! - Convert unicode vulgar fractions ("1½", "¾") to decimals before parsing
//! - Recognize ranges ("2-3"), decimals, slash fractions and mixed numbers,
//!   stored as the literal text
//! - Map unit spellings to one canonical unit ("cloves" -> "clove", "grams" -> "g")
//! - Idempotent: an ingredient that already has an amount is returned unchanged
//!
//! ## Usage
//!
//! ```rust
//! use pantry_match::ingredient_parser::parse_ingredient_line;
//!
//! let garlic = parse_ingredient_line("2 cloves garlic");
//! assert_eq!(garlic.amount, "2");
//! assert_eq!(garlic.unit, "clove");
//! assert_eq!(garlic.name, "garlic");
//! ```

use crate::ingredient_model::StructuredIngredient;
use crate::measurement_patterns::{
    fraction_value, FRACTION_REGEX, QUANTITY_ONLY_REGEX, QUANTITY_UNIT_REGEX, UNIT_VOCABULARY,
};
use regex::Captures;
use tracing::{debug, trace};

/// Replace unicode vulgar fractions with their decimal values
///
/// `<digits><glyph>` becomes the decimal sum ("1½" -> "1.5"), also when a
/// space separates them ("1 ½" -> "1.5"). A glyph with no digit in front
/// becomes its bare value ("¾" -> "0.75"). Glyphs outside the fixed table
/// pass through unchanged.
///
/// # Examples
///
/// ```rust
/// use pantry_match::ingredient_parser::normalize_unicode_fractions;
///
/// assert_eq!(normalize_unicode_fractions("1½ cups flour"), "1.5 cups flour");
/// assert_eq!(normalize_unicode_fractions("¾ tsp salt"), "0.75 tsp salt");
/// ```
pub fn normalize_unicode_fractions(text: &str) -> String {
    FRACTION_REGEX
        .replace_all(text, |caps: &Captures| {
            let digits = caps.get(1).map_or("", |m| m.as_str());
            let glyph = caps[2].chars().next().unwrap_or_default();
            let Some(value) = fraction_value(glyph) else {
                return caps[0].to_string();
            };
            if digits.is_empty() {
                return value.to_string();
            }
            // Every table value is "0.<decimals>", so the sum is the
            // whole part followed by the decimals.
            let whole = digits.trim_start_matches('0');
            let whole = if whole.is_empty() { "0" } else { whole };
            format!("{}{}", whole, &value[1..])
        })
        .into_owned()
}

// A remainder like "cups" or "cups: flour" means the unit pattern missed a
// unit, and splitting off the number would leave it stuck on the name.
fn leads_with_unit(rest: &str) -> bool {
    rest.split_whitespace()
        .next()
        .map(|word| word.trim_end_matches(|c: char| c.is_ascii_punctuation()))
        .and_then(canonical_unit)
        .is_some()
}

/// Map a matched unit spelling to its canonical unit
///
/// Returns `None` for words outside the fixed vocabulary.
pub fn canonical_unit(spelling: &str) -> Option<&'static str> {
    let spelling = spelling.trim().trim_end_matches('.').to_lowercase();
    UNIT_VOCABULARY
        .iter()
        .find(|(_, variants)| variants.contains(&spelling.as_str()))
        .map(|(canonical, _)| *canonical)
}

/// Separate a leading quantity and unit from an ingredient's name
///
/// Ingredients that already carry an amount are returned unchanged, which makes
/// the function safe to run repeatedly over stored data. Otherwise the name is
/// fraction-normalized and matched against `<number> <unit> <rest>` first, then
/// `<number> <rest>`. A bare quantity followed by a unit word that the first
/// pattern could not split off is left alone. When neither matches, the
/// original ingredient comes back as it was.
pub fn extract_structured(ingredient: &StructuredIngredient) -> StructuredIngredient {
    if ingredient.has_quantity() {
        trace!("Amount already present for '{}', skipping", ingredient.name);
        return ingredient.clone();
    }

    let normalized = normalize_unicode_fractions(ingredient.name.trim());

    if let Some(caps) = QUANTITY_UNIT_REGEX.captures(&normalized) {
        let rest = caps["rest"].trim();
        if let Some(unit) = canonical_unit(&caps["unit"]) {
            if !rest.is_empty() {
                let mut fixed = ingredient.clone();
                fixed.amount = caps["amount"].to_string();
                fixed.unit = unit.to_string();
                fixed.name = rest.to_string();
                fixed.display_name = Some(rest.to_string());
                debug!(
                    "Extracted quantity with unit: '{}' -> amount='{}', unit='{}', name='{}'",
                    ingredient.name, fixed.amount, fixed.unit, fixed.name
                );
                return fixed;
            }
        }
    }

    if let Some(caps) = QUANTITY_ONLY_REGEX.captures(&normalized) {
        let rest = caps["rest"].trim();
        if !rest.is_empty() && !leads_with_unit(rest) {
            let mut fixed = ingredient.clone();
            fixed.amount = caps["amount"].to_string();
            fixed.name = rest.to_string();
            fixed.display_name = Some(rest.to_string());
            debug!(
                "Extracted quantity-only ingredient: '{}' -> amount='{}', name='{}'",
                ingredient.name, fixed.amount, fixed.name
            );
            return fixed;
        }
    }

    trace!("No quantity detected in '{}'", ingredient.name);
    ingredient.clone()
}

/// Build a structured ingredient from one raw line of recipe text
pub fn parse_ingredient_line(line: &str) -> StructuredIngredient {
    extract_structured(&StructuredIngredient::new(line.trim()))
}

/// Parse every non-empty line of an ingredient block
pub fn parse_ingredient_list(text: &str) -> Vec<StructuredIngredient> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_ingredient_line)
        .collect()
}
