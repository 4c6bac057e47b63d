use anyhow::Result;
use clap::Parser;
use pantry_match::config::{AppConfig, CliArgs, LogFormat};
use pantry_match::db::PgRecipeStore;
use pantry_match::recipe_fixer::run_fix;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pantry_match=info,fix_ingredients=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = AppConfig::from_env()?;

    init_tracing(config.log_format);

    info!("Starting ingredient fixer in {:?} mode", args.mode());

    let store = PgRecipeStore::connect(&config.database_url).await?;
    let report = run_fix(&store, args.fix_options(&config)).await?;

    println!("{}", report);

    if let Some(path) = &args.report {
        if let Err(e) = report.write_json(path) {
            error!("{:#}", e);
        }
    }

    Ok(())
}
