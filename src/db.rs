//! # Recipe Store
//!
//! Persistence for recipes and their structured ingredient lists. The engine
//! only needs two operations, expressed by [`RecipeStore`]; [`PgRecipeStore`]
//! implements them over Postgres with the ingredient list kept as JSONB.

use crate::ingredient_model::{RecipeRecord, StructuredIngredient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::types::Json;
use sqlx::Row;
use tracing::{debug, info};

/// Opaque recipe storage keyed by recipe id
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Every stored recipe, ordered by id
    async fn list_recipes(&self) -> Result<Vec<RecipeRecord>>;

    /// Replace a recipe's ingredient list
    async fn update_ingredients(&self, recipe_id: i64, ingredients: &[StructuredIngredient]) -> Result<()>;
}

/// Postgres-backed recipe store
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: PgPool,
}

impl PgRecipeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database and make sure the schema exists
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        init_database_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn list_recipes(&self) -> Result<Vec<RecipeRecord>> {
        list_recipes(&self.pool).await
    }

    async fn update_ingredients(&self, recipe_id: i64, ingredients: &[StructuredIngredient]) -> Result<()> {
        if update_recipe_ingredients(&self.pool, recipe_id, ingredients).await? {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Recipe {} not found", recipe_id))
        }
    }
}

/// Initialize the database schema
pub async fn init_database_schema(pool: &PgPool) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS recipes (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            ingredients JSONB NOT NULL DEFAULT '[]'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create recipes table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

fn recipe_from_row(row: &PgRow) -> Result<RecipeRecord> {
    let ingredients: Json<Vec<StructuredIngredient>> = row
        .try_get("ingredients")
        .context("Failed to decode recipe ingredients")?;
    let updated_at: Option<DateTime<Utc>> = row.try_get("updated_at")?;

    Ok(RecipeRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        ingredients: ingredients.0,
        updated_at,
    })
}

/// Create a new recipe and return its id
pub async fn create_recipe(pool: &PgPool, title: &str, ingredients: &[StructuredIngredient]) -> Result<i64> {
    info!("Creating recipe '{}' with {} ingredients", title, ingredients.len());

    let row = sqlx::query("INSERT INTO recipes (title, ingredients) VALUES ($1, $2) RETURNING id")
        .bind(title)
        .bind(Json(ingredients.to_vec()))
        .fetch_one(pool)
        .await
        .context("Failed to insert new recipe")?;

    let recipe_id: i64 = row.try_get("id")?;
    info!("Recipe created with ID: {}", recipe_id);
    Ok(recipe_id)
}

/// Read a recipe by id
pub async fn read_recipe(pool: &PgPool, recipe_id: i64) -> Result<Option<RecipeRecord>> {
    debug!("Reading recipe with ID: {}", recipe_id);

    let row = sqlx::query("SELECT id, title, ingredients, updated_at FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .fetch_optional(pool)
        .await
        .context("Failed to read recipe")?;

    row.as_ref().map(recipe_from_row).transpose()
}

/// List every recipe ordered by id
pub async fn list_recipes(pool: &PgPool) -> Result<Vec<RecipeRecord>> {
    let rows = sqlx::query("SELECT id, title, ingredients, updated_at FROM recipes ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list recipes")?;

    let recipes = rows.iter().map(recipe_from_row).collect::<Result<Vec<_>>>()?;
    debug!("Listed {} recipes", recipes.len());
    Ok(recipes)
}

/// Replace a recipe's ingredient list; returns false when the recipe does not exist
pub async fn update_recipe_ingredients(
    pool: &PgPool,
    recipe_id: i64,
    ingredients: &[StructuredIngredient],
) -> Result<bool> {
    debug!("Updating ingredients of recipe {}", recipe_id);

    let result = sqlx::query("UPDATE recipes SET ingredients = $1, updated_at = NOW() WHERE id = $2")
        .bind(Json(ingredients.to_vec()))
        .bind(recipe_id)
        .execute(pool)
        .await
        .context("Failed to update recipe ingredients")?;

    Ok(result.rows_affected() > 0)
}

/// Delete a recipe; returns false when the recipe does not exist
pub async fn delete_recipe(pool: &PgPool, recipe_id: i64) -> Result<bool> {
    info!("Deleting recipe with ID: {}", recipe_id);

    let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .execute(pool)
        .await
        .context("Failed to delete recipe")?;

    Ok(result.rows_affected() > 0)
}
