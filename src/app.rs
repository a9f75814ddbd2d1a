pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod formatter;
pub mod html;
pub mod inspector;
pub mod logging;
pub mod models;

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::{ConnectOptions, Connection};
use tracing::info;

use self::builder::DictionaryBuilder;
use self::cli::Cli;
use self::config::{AppConfig, resolve_config};
use self::export::{ExportSummary, export_artifacts};
use self::formatter::OutputGenerator;
use self::inspector::{Inspector, SchemaReader};
use self::models::Dictionary;

/// Reads every selected table through `reader` and builds the dictionary.
pub async fn collect_dictionary<R>(reader: &mut R, config: &AppConfig) -> Result<Dictionary>
where
    R: SchemaReader + ?Sized,
{
    let dictionary = DictionaryBuilder::new()
        .tables(config.tables.iter().cloned())
        .ignore_columns(config.ignore_columns.iter().cloned())
        .collect(&config.db_name, reader)
        .await
        .with_context(|| format!("Failed to read schema of `{}`", config.db_name))?;

    Ok(dictionary)
}

// Connects, Scans, and closes before anything touches the filesystem.
pub async fn generate_report(config: &AppConfig) -> Result<Dictionary> {
    // 1. Connect
    let mut conn = config
        .connect_options()?
        .connect()
        .await
        .with_context(|| format!("Failed to connect to database `{}`", config.db_name))?;
    info!(database = %config.db_name, "Connected to database");

    // 2. Scan (Inspector)
    let scanned = {
        let mut inspector = Inspector::new(&mut conn, config.db_name.clone());
        collect_dictionary(&mut inspector, config).await
    };

    // 3. Close, even when the scan failed
    let closed = conn.close().await;
    let dictionary = scanned?;
    closed.context("Failed to close database connection")?;

    Ok(dictionary)
}

/// Renders `dictionary` and writes the configured artifacts.
pub fn publish(dictionary: &Dictionary, config: &AppConfig) -> Result<ExportSummary> {
    let markdown = OutputGenerator::generate_markdown(&config.db_name, dictionary)
        .context("Failed to render markdown")?;

    if config.print {
        print!("{markdown}");
    }

    export_artifacts(
        dictionary,
        &markdown,
        &config.md_out,
        config.html_out.as_deref(),
    )
}

pub async fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Resolve Config
    let config = resolve_config(args)?;

    // 3. Generate
    let dictionary = generate_report(&config).await?;

    // 4. Output
    let summary = publish(&dictionary, &config)?;

    info!(
        tables = dictionary.table_count(),
        rows = dictionary.row_count(),
        markdown = %summary.markdown_path.display(),
        html = ?summary.html_path,
        "Data dictionary generated"
    );

    Ok(())
}
