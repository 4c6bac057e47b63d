//! # Configuration Module
//!
//! Environment configuration and command-line arguments for the
//! `fix-ingredients` tool.

use crate::recipe_fixer::{FixMode, FixOptions, DEFAULT_EXAMPLE_LIMIT};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Settings read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    /// Before/after examples shown in a report
    pub example_limit: usize,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let example_limit = match lookup("FIX_EXAMPLE_LIMIT") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("FIX_EXAMPLE_LIMIT must be a number, got '{}'", value))?,
            None => DEFAULT_EXAMPLE_LIMIT,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            Some("json") => LogFormat::Json,
            Some("text") | Some("") | None => LogFormat::Text,
            Some(other) => bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", other),
        };

        Ok(Self {
            database_url,
            example_limit,
            log_format,
        })
    }
}

/// Batch fix of stored ingredient lists (dry run unless --apply)
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "fix-ingredients")]
#[command(about = "Split leading quantities and units out of stored ingredient names", long_about = None)]
pub struct CliArgs {
    /// Write the fixed ingredient lists back to the database
    #[arg(long)]
    pub apply: bool,

    /// Also write the run report as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl CliArgs {
    pub fn mode(&self) -> FixMode {
        if self.apply {
            FixMode::Apply
        } else {
            FixMode::DryRun
        }
    }

    pub fn fix_options(&self, config: &AppConfig) -> FixOptions {
        FixOptions {
            mode: self.mode(),
            example_limit: config.example_limit,
        }
    }
}
