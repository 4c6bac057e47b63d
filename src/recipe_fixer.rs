//! # Recipe Fixer
//!
//! Batch workflow that runs quantity extraction over every stored recipe.
//!
//! In dry-run mode nothing is written; the report says how many ingredients
//! would change and shows a bounded number of before/after examples. In apply
//! mode every recipe with at least one changed ingredient is written back.
//! Recipes are processed one after another, and a failed write is logged and
//! skipped so the remaining recipes still get fixed. Because extraction is
//! idempotent, a partially failed run can simply be repeated.

use crate::db::RecipeStore;
use crate::ingredient_model::{RecipeRecord, StructuredIngredient};
use crate::ingredient_parser::extract_structured;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{error, info};

pub const DEFAULT_EXAMPLE_LIMIT: usize = 20;

/// Whether the fixer writes its changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixMode {
    DryRun,
    Apply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixOptions {
    pub mode: FixMode,
    /// Maximum before/after examples kept in the report
    pub example_limit: usize,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            mode: FixMode::DryRun,
            example_limit: DEFAULT_EXAMPLE_LIMIT,
        }
    }
}

/// One ingredient the fixer changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientChange {
    /// Position in the recipe's ingredient list
    pub index: usize,
    pub before: StructuredIngredient,
    pub after: StructuredIngredient,
}

/// Result of fixing one ingredient list
#[derive(Debug, Clone, PartialEq)]
pub struct FixOutcome {
    pub ingredients: Vec<StructuredIngredient>,
    pub changes: Vec<IngredientChange>,
}

impl FixOutcome {
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// A change together with the recipe it belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeChange {
    pub recipe_id: i64,
    pub recipe_title: String,
    #[serde(flatten)]
    pub change: IngredientChange,
}

/// Summary of a fixer run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixReport {
    pub mode: FixMode,
    pub started_at: DateTime<Utc>,
    pub recipes_scanned: usize,
    pub ingredients_changed: usize,
    pub recipes_changed: usize,
    pub recipes_updated: usize,
    /// Titles of recipes whose update failed
    pub failed_recipes: Vec<String>,
    pub examples: Vec<RecipeChange>,
}

impl FixReport {
    fn new(mode: FixMode) -> Self {
        Self {
            mode,
            started_at: Utc::now(),
            recipes_scanned: 0,
            ingredients_changed: 0,
            recipes_changed: 0,
            recipes_updated: 0,
            failed_recipes: Vec::new(),
            examples: Vec::new(),
        }
    }

    /// Write the report as pretty JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize fix report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write fix report to {}", path.display()))?;
        info!("Fix report written to {}", path.display());
        Ok(())
    }
}

fn describe(ingredient: &StructuredIngredient) -> String {
    format!(
        "amount='{}' unit='{}' name='{}'",
        ingredient.amount, ingredient.unit, ingredient.name
    )
}

impl fmt::Display for FixReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            FixMode::DryRun => {
                writeln!(f, "DRY RUN - no changes written")?;
                writeln!(
                    f,
                    "{} ingredients would change across {} of {} recipes",
                    self.ingredients_changed, self.recipes_changed, self.recipes_scanned
                )?;
            }
            FixMode::Apply => {
                writeln!(
                    f,
                    "Fixed {} ingredients, updated {} of {} changed recipes ({} scanned)",
                    self.ingredients_changed,
                    self.recipes_updated,
                    self.recipes_changed,
                    self.recipes_scanned
                )?;
            }
        }

        if !self.examples.is_empty() {
            writeln!(f, "\nExamples:")?;
            for example in &self.examples {
                writeln!(f, "  [{}]", example.recipe_title)?;
                writeln!(f, "    before: {}", describe(&example.change.before))?;
                writeln!(f, "    after:  {}", describe(&example.change.after))?;
            }
        }

        if !self.failed_recipes.is_empty() {
            writeln!(f, "\nFailed to update {} recipes:", self.failed_recipes.len())?;
            for title in &self.failed_recipes {
                writeln!(f, "  - {}", title)?;
            }
        }

        if self.mode == FixMode::DryRun && self.ingredients_changed > 0 {
            writeln!(f, "\nRun with --apply to write these changes.")?;
        }

        Ok(())
    }
}

/// Run quantity extraction over one ingredient list
pub fn fix_ingredients(ingredients: &[StructuredIngredient]) -> FixOutcome {
    let mut changes = Vec::new();
    let fixed = ingredients
        .iter()
        .enumerate()
        .map(|(index, before)| {
            let after = extract_structured(before);
            if &after != before {
                changes.push(IngredientChange {
                    index,
                    before: before.clone(),
                    after: after.clone(),
                });
            }
            after
        })
        .collect();

    FixOutcome {
        ingredients: fixed,
        changes,
    }
}

/// Fix every recipe in the store
///
/// Only a failure to list recipes aborts the run. Update failures are logged,
/// recorded by title in the report, and processing moves on.
pub async fn run_fix<S: RecipeStore + ?Sized>(store: &S, options: FixOptions) -> Result<FixReport> {
    let mut report = FixReport::new(options.mode);
    let recipes = store.list_recipes().await.context("Failed to load recipes")?;

    info!("Checking {} recipes ({:?})", recipes.len(), options.mode);

    for recipe in &recipes {
        report.recipes_scanned += 1;
        fix_recipe(store, recipe, &options, &mut report).await;
    }

    info!(
        "Done: {} ingredients changed, {} recipes changed, {} recipes updated, {} failed",
        report.ingredients_changed,
        report.recipes_changed,
        report.recipes_updated,
        report.failed_recipes.len()
    );
    Ok(report)
}

async fn fix_recipe<S: RecipeStore + ?Sized>(
    store: &S,
    recipe: &RecipeRecord,
    options: &FixOptions,
    report: &mut FixReport,
) {
    let outcome = fix_ingredients(&recipe.ingredients);
    if !outcome.is_changed() {
        return;
    }

    report.recipes_changed += 1;
    report.ingredients_changed += outcome.changes.len();

    for change in &outcome.changes {
        info!(
            recipe_id = recipe.id,
            "[{}] {} -> {}",
            recipe.title,
            describe(&change.before),
            describe(&change.after)
        );
        if report.examples.len() < options.example_limit {
            report.examples.push(RecipeChange {
                recipe_id: recipe.id,
                recipe_title: recipe.title.clone(),
                change: change.clone(),
            });
        }
    }

    if options.mode == FixMode::DryRun {
        return;
    }

    match store.update_ingredients(recipe.id, &outcome.ingredients).await {
        Ok(()) => {
            report.recipes_updated += 1;
            info!(recipe_id = recipe.id, "Updated '{}'", recipe.title);
        }
        Err(e) => {
            error!(recipe_id = recipe.id, "Failed to update '{}': {:#}", recipe.title, e);
            report.failed_recipes.push(recipe.title.clone());
        }
    }
}
