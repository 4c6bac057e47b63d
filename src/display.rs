//! # Display Mapping
//!
//! Fixed lookup tables from the classification vocabulary to what the UI shows.

use crate::ingredient_model::{Category, MatchType};
use serde::Serialize;

/// Icon shown next to an ingredient's availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Check,
    Swap,
    Similar,
    Cart,
}

/// Icon and label for a match type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchDisplay {
    pub icon: IconKind,
    pub label: &'static str,
}

/// Map a match type (or its absence) to icon and label
pub fn match_display(match_type: Option<MatchType>) -> MatchDisplay {
    match match_type {
        Some(MatchType::Exact) => MatchDisplay {
            icon: IconKind::Check,
            label: "You have it",
        },
        Some(MatchType::Substitute) => MatchDisplay {
            icon: IconKind::Swap,
            label: "Substitute available",
        },
        Some(MatchType::Partial) => MatchDisplay {
            icon: IconKind::Similar,
            label: "Similar ingredient",
        },
        Some(MatchType::Missing) | None => MatchDisplay {
            icon: IconKind::Cart,
            label: "Need to buy",
        },
    }
}

/// Label for a category; unset categories get none
pub fn category_label(category: Option<Category>) -> Option<&'static str> {
    category.map(|c| match c {
        Category::Key => "Key",
        Category::Important => "Important",
        Category::Flavor => "Flavor",
        Category::Base => "Base",
    })
}
