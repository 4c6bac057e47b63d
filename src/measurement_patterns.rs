//! # Measurement Patterns Module
//!
//! This module contains the fixed unit vocabulary, the unicode fraction table and
//! the compiled regex patterns used for quantity extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Unit vocabulary: canonical unit followed by every accepted spelling.
///
/// Spellings are matched case-insensitively and must be followed by a word
/// boundary, so "2 lemons" never reads as the unit `l`.
pub const UNIT_VOCABULARY: &[(&str, &[&str])] = &[
    // Weight
    ("g", &["g", "gr", "gram", "grams", "gramme", "grammes"]),
    ("kg", &["kg", "kgs", "kilogram", "kilograms", "kilogramme", "kilogrammes"]),
    ("oz", &["oz", "ounce", "ounces"]),
    ("lb", &["lb", "lbs", "pound", "pounds"]),
    // Volume
    ("ml", &["ml", "milliliter", "milliliters", "millilitre", "millilitres"]),
    ("l", &["l", "liter", "liters", "litre", "litres"]),
    ("tbsp", &["tbsp", "tbsps", "tbs", "tablespoon", "tablespoons"]),
    ("tsp", &["tsp", "tsps", "teaspoon", "teaspoons"]),
    ("cup", &["cup", "cups"]),
    // Count
    ("can", &["can", "cans"]),
    ("jar", &["jar", "jars"]),
    ("slice", &["slice", "slices"]),
    ("piece", &["piece", "pieces"]),
    ("clove", &["clove", "cloves"]),
    ("bunch", &["bunch", "bunches"]),
    ("sprig", &["sprig", "sprigs"]),
    ("head", &["head", "heads"]),
    ("stalk", &["stalk", "stalks"]),
    ("strip", &["strip", "strips"]),
    ("fillet", &["fillet", "fillets"]),
    ("breast", &["breast", "breasts"]),
    ("thigh", &["thigh", "thighs"]),
    ("leg", &["leg", "legs"]),
    ("sheet", &["sheet", "sheets"]),
    ("pack", &["pack", "packs"]),
    // Informal
    ("handful", &["handful", "handfuls"]),
    ("pinch", &["pinch", "pinches"]),
    ("dash", &["dash", "dashes"]),
];

/// Unicode vulgar fractions and their fixed decimal values.
///
/// The decimal part is kept as text so "1½" becomes exactly "1.5".
pub const UNICODE_FRACTIONS: &[(char, &str)] = &[
    ('½', "0.5"),
    ('⅓', "0.33"),
    ('⅔', "0.67"),
    ('¼', "0.25"),
    ('¾', "0.75"),
    ('⅕', "0.2"),
    ('⅖', "0.4"),
    ('⅗', "0.6"),
    ('⅘', "0.8"),
    ('⅙', "0.17"),
    ('⅚', "0.83"),
    ('⅛', "0.125"),
    ('⅜', "0.375"),
    ('⅝', "0.625"),
    ('⅞', "0.875"),
];

/// A single numeric literal: mixed number, slash fraction, decimal or integer.
pub const NUMBER_PATTERN: &str = r"(?:[0-9]+\s+[0-9]+/[0-9]+|[0-9]+/[0-9]+|[0-9]*\.[0-9]+|[0-9]+)";

/// Look up the decimal value for a fraction glyph
pub fn fraction_value(glyph: char) -> Option<&'static str> {
    UNICODE_FRACTIONS
        .iter()
        .find(|(g, _)| *g == glyph)
        .map(|(_, value)| *value)
}

/// Build the unit alternation, longest spellings first
fn unit_alternation() -> String {
    let mut spellings: Vec<&str> = UNIT_VOCABULARY
        .iter()
        .flat_map(|(_, variants)| variants.iter().copied())
        .collect();
    spellings.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    spellings.dedup();
    spellings
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|")
}

fn quantity_pattern() -> String {
    format!(r"{n}(?:\s*-\s*{n})?", n = NUMBER_PATTERN)
}

lazy_static! {
    /// `<digits>[ ]<fraction-glyph>` or a standalone glyph
    pub static ref FRACTION_REGEX: Regex = {
        let glyphs: String = UNICODE_FRACTIONS.iter().map(|(g, _)| *g).collect();
        Regex::new(&format!(r"(?:([0-9]+)[ \t]*)?([{}])", glyphs))
            .expect("Fraction pattern should be valid")
    };

    /// `<number>[-<number>] <unit>[.][,;] <rest>`
    pub static ref QUANTITY_UNIT_REGEX: Regex = Regex::new(&format!(
        r"(?i)^(?P<amount>{})\s*(?P<unit>{})\b\.?[,;]?\s+(?P<rest>.+)$",
        quantity_pattern(),
        unit_alternation()
    ))
    .expect("Quantity-unit pattern should be valid");

    /// `<number>[-<number>] <rest>`
    pub static ref QUANTITY_ONLY_REGEX: Regex = Regex::new(&format!(
        r"^(?P<amount>{})\s+(?P<rest>.+)$",
        quantity_pattern()
    ))
    .expect("Quantity-only pattern should be valid");
}
