//! # Recipe Fixer Tests
//!
//! Dry-run and apply runs against an in-memory store, including write failures.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use pantry_match::db::RecipeStore;
use pantry_match::ingredient_model::{RecipeRecord, StructuredIngredient};
use pantry_match::recipe_fixer::{run_fix, FixMode, FixOptions};
use std::collections::{BTreeMap, HashSet};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

/// In-memory store that can be told to fail updates for some recipes
struct MemoryStore {
    recipes: Mutex<BTreeMap<i64, RecipeRecord>>,
    failing: HashSet<i64>,
    updates: Mutex<Vec<i64>>,
}

impl MemoryStore {
    fn new(recipes: Vec<RecipeRecord>) -> Self {
        Self {
            recipes: Mutex::new(recipes.into_iter().map(|r| (r.id, r)).collect()),
            failing: HashSet::new(),
            updates: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(mut self, recipe_id: i64) -> Self {
        self.failing.insert(recipe_id);
        self
    }

    async fn recipe(&self, recipe_id: i64) -> RecipeRecord {
        self.recipes.lock().await[&recipe_id].clone()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn list_recipes(&self) -> Result<Vec<RecipeRecord>> {
        Ok(self.recipes.lock().await.values().cloned().collect())
    }

    async fn update_ingredients(&self, recipe_id: i64, ingredients: &[StructuredIngredient]) -> Result<()> {
        if self.failing.contains(&recipe_id) {
            return Err(anyhow!("connection reset"));
        }
        let mut recipes = self.recipes.lock().await;
        let recipe = recipes
            .get_mut(&recipe_id)
            .ok_or_else(|| anyhow!("Recipe {} not found", recipe_id))?;
        recipe.ingredients = ingredients.to_vec();
        self.updates.lock().await.push(recipe_id);
        Ok(())
    }
}

struct UnreachableStore;

#[async_trait]
impl RecipeStore for UnreachableStore {
    async fn list_recipes(&self) -> Result<Vec<RecipeRecord>> {
        Err(anyhow!("database unavailable"))
    }

    async fn update_ingredients(&self, _recipe_id: i64, _ingredients: &[StructuredIngredient]) -> Result<()> {
        unreachable!("nothing to update when listing fails")
    }
}

fn recipe(id: i64, title: &str, lines: &[&str]) -> RecipeRecord {
    RecipeRecord {
        id,
        title: title.to_string(),
        ingredients: lines.iter().map(|l| StructuredIngredient::new(l)).collect(),
        updated_at: None,
    }
}

fn sample_store() -> MemoryStore {
    MemoryStore::new(vec![
        recipe(1, "Garlic Bread", &["2 cloves garlic", "1 baguette", "butter"]),
        recipe(2, "Green Salad", &["lettuce", "olive oil"]),
        recipe(3, "Pancakes", &["1½ cups flour", "2 eggs", "1 cup milk"]),
    ])
}

fn options(mode: FixMode) -> FixOptions {
    FixOptions {
        mode,
        ..FixOptions::default()
    }
}

#[tokio::test]
async fn test_dry_run_writes_nothing() -> Result<()> {
    let store = sample_store();
    let report = run_fix(&store, options(FixMode::DryRun)).await?;

    assert_eq!(report.mode, FixMode::DryRun);
    assert_eq!(report.recipes_scanned, 3);
    assert_eq!(report.ingredients_changed, 5);
    assert_eq!(report.recipes_changed, 2);
    assert_eq!(report.recipes_updated, 0);
    assert_eq!(report.examples.len(), 5);
    assert!(store.updates.lock().await.is_empty());
    assert_eq!(store.recipe(1).await.ingredients[0].amount, "");

    Ok(())
}

#[tokio::test]
async fn test_apply_updates_changed_recipes_only() -> Result<()> {
    let store = sample_store();
    let report = run_fix(&store, options(FixMode::Apply)).await?;

    assert_eq!(report.recipes_updated, 2);
    assert_eq!(*store.updates.lock().await, vec![1, 3]);

    let pancakes = store.recipe(3).await;
    assert_eq!(pancakes.ingredients[0].amount, "1.5");
    assert_eq!(pancakes.ingredients[0].unit, "cup");
    assert_eq!(pancakes.ingredients[0].name, "flour");
    assert_eq!(pancakes.ingredients[1].amount, "2");
    assert_eq!(pancakes.ingredients[1].name, "eggs");

    Ok(())
}

#[tokio::test]
async fn test_second_apply_changes_nothing() -> Result<()> {
    let store = sample_store();
    run_fix(&store, options(FixMode::Apply)).await?;
    store.updates.lock().await.clear();

    let report = run_fix(&store, options(FixMode::Apply)).await?;
    assert_eq!(report.ingredients_changed, 0);
    assert_eq!(report.recipes_changed, 0);
    assert!(store.updates.lock().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_failed_update_does_not_stop_the_run() -> Result<()> {
    let store = sample_store().failing_on(1);
    let report = run_fix(&store, options(FixMode::Apply)).await?;

    assert_eq!(report.recipes_changed, 2);
    assert_eq!(report.recipes_updated, 1);
    assert_eq!(report.failed_recipes, vec!["Garlic Bread".to_string()]);
    assert_eq!(store.recipe(3).await.ingredients[0].amount, "1.5");
    assert_eq!(store.recipe(1).await.ingredients[0].amount, "");
    assert!(report.to_string().contains("Failed to update 1 recipes"));

    Ok(())
}

#[tokio::test]
async fn test_example_limit() -> Result<()> {
    let lines: Vec<String> = (1..=30).map(|n| format!("{} eggs", n)).collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let store = MemoryStore::new(vec![recipe(1, "Egg Mountain", &line_refs)]);

    let report = run_fix(&store, options(FixMode::DryRun)).await?;
    assert_eq!(report.ingredients_changed, 30);
    assert_eq!(report.examples.len(), 20);

    let report = run_fix(
        &store,
        FixOptions {
            mode: FixMode::DryRun,
            example_limit: 3,
        },
    )
    .await?;
    assert_eq!(report.examples.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_listing_failure_is_fatal() {
    let result = run_fix(&UnreachableStore, FixOptions::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_report_json_file() -> Result<()> {
    let store = sample_store();
    let report = run_fix(&store, options(FixMode::DryRun)).await?;

    let file = NamedTempFile::new()?;
    report.write_json(file.path())?;

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(file.path())?)?;
    assert_eq!(value["mode"], "dry_run");
    assert_eq!(value["ingredients_changed"], 5);
    assert_eq!(value["examples"][0]["recipe_title"], "Garlic Bread");
    assert_eq!(value["examples"][0]["after"]["unit"], "clove");

    Ok(())
}
