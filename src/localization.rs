//! # Localization Module
//!
//! Fluent-based translations for match labels, category labels and the
//! per-recipe summary sentence. Resources are embedded at compile time.

use crate::ingredient_model::{Category, MatchDetails, MatchPercentage, MatchType};
use anyhow::{anyhow, Result};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use std::collections::HashMap;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

const DEFAULT_LANGUAGE: &str = "en";

const RESOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en/main.ftl")),
    ("fr", include_str!("../locales/fr/main.ftl")),
];

/// Localization manager for engine output
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager with every embedded language loaded
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for (language, source) in RESOURCES {
            let locale: LanguageIdentifier = language.parse()?;
            let bundle = Self::create_bundle(&locale, source)?;
            bundles.insert(language.to_string(), bundle);
        }

        debug!("Loaded {} localization bundles", bundles.len());
        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier, source: &str) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Failed to parse {} resource: {:?}", locale, errors))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Failed to add {} resource: {:?}", locale, errors))?;

        Ok(bundle)
    }

    /// Get a localized message, falling back to English for unsupported languages
    pub fn get_message_in_language(&self, key: &str, language: &str, args: Option<&FluentArgs>) -> String {
        let bundle = match self
            .bundles
            .get(detect_language(Some(language)))
            .or_else(|| self.bundles.get(DEFAULT_LANGUAGE))
        {
            Some(bundle) => bundle,
            None => return format!("Missing translation: {}", key),
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!("Errors formatting '{}' in {}: {:?}", key, language, errors);
        }
        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, language: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.get_message_in_language(key, language, Some(&fluent_args))
    }

    /// Localized availability label
    pub fn match_label(&self, match_type: Option<MatchType>, language: &str) -> String {
        let key = match match_type {
            Some(MatchType::Exact) => "match-exact",
            Some(MatchType::Substitute) => "match-substitute",
            Some(MatchType::Partial) => "match-partial",
            Some(MatchType::Missing) | None => "match-missing",
        };
        self.get_message_in_language(key, language, None)
    }

    /// Localized category label, none for an unset category
    pub fn category_label(&self, category: Option<Category>, language: &str) -> Option<String> {
        category.map(|c| self.get_message_in_language(&format!("category-{}", c.as_str()), language, None))
    }

    /// One summary line per fact: availability share, counts, shopping list
    pub fn match_summary(&self, percentage: &MatchPercentage, details: &MatchDetails, language: &str) -> String {
        let mut args = FluentArgs::new();
        args.set("matching", percentage.matching_count);
        args.set("total", percentage.total_count);
        args.set("percentage", percentage.percentage);
        let mut lines = vec![self.get_message_in_language("match-summary", language, Some(&args))];

        let mut args = FluentArgs::new();
        args.set("exact", details.exact_matches);
        args.set("substitute", details.substitute_matches);
        lines.push(self.get_message_in_language("match-counts", language, Some(&args)));

        if details.missing_ingredients.is_empty() {
            lines.push(self.get_message_in_language("match-nothing-missing", language, None));
        } else {
            let items = details.missing_ingredients.join(", ");
            lines.push(self.get_message_with_args("match-missing-list", language, &[("items", items.as_str())]));
        }

        lines.join("\n")
    }
}

/// Reduce a language tag to a supported language code
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    let primary = language_code
        .and_then(|code| code.split(['-', '_']).next())
        .map(|code| code.to_lowercase());

    match primary.as_deref() {
        Some("fr") => "fr",
        _ => DEFAULT_LANGUAGE,
    }
}
