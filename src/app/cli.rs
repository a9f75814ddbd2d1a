use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(version, about = "Generate a data dictionary from a MySQL schema", long_about = None)]
pub struct Cli {
    /// Optional database connection string. If not provided, looks for DB_URL env var.
    #[arg(short, long)]
    pub db_url: Option<String>,

    /// Database host (DB_HOST). Ignored when a URL is given.
    #[arg(long)]
    pub host: Option<String>,

    /// Database port (DB_PORT).
    #[arg(long)]
    pub port: Option<u16>,

    /// Database user (DB_USER).
    #[arg(short, long)]
    pub user: Option<String>,

    /// Database password (DB_PASSWORD).
    #[arg(long)]
    pub password: Option<String>,

    /// Database to document (DB_DATABASE).
    #[arg(long)]
    pub database: Option<String>,

    /// Tables to document; all tables when omitted (DICT_TABLES).
    #[arg(short, long = "table", value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Columns never written to the dictionary (DICT_IGNORE_COLUMNS, default: password).
    #[arg(long = "ignore-column", value_delimiter = ',')]
    pub ignore_columns: Vec<String>,

    /// Markdown output file.
    #[arg(long, default_value = "data_dictionary.md")]
    pub md_out: PathBuf,

    /// HTML output file. No HTML is produced without it.
    #[arg(long)]
    pub html_out: Option<PathBuf>,

    /// Also print the Markdown to stdout.
    #[arg(long)]
    pub print: bool,
}
