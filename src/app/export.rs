use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::app::html::HtmlExporter;
use crate::app::models::Dictionary;

/// Where the artifacts of one run ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub markdown_path: PathBuf,
    pub html_path: Option<PathBuf>,
}

/// Writes the Markdown, then the optional HTML document.
///
/// The Markdown file is written first, so a failed HTML conversion still
/// leaves it on disk.
pub fn export_artifacts(
    dictionary: &Dictionary,
    markdown: &str,
    md_out: &Path,
    html_out: Option<&Path>,
) -> Result<ExportSummary> {
    write_file(md_out, markdown)
        .with_context(|| format!("Failed to write markdown dictionary: {}", md_out.display()))?;
    info!(path = %md_out.display(), "Data dictionary markdown written");

    let html_path = match html_out {
        Some(path) => {
            let html = HtmlExporter::new(&dictionary.database)
                .to_html(markdown)
                .context("Failed to convert markdown to html")?;
            write_file(path, &html)
                .with_context(|| format!("Failed to write html dictionary: {}", path.display()))?;
            info!(path = %path.display(), "Data dictionary html written");
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok(ExportSummary {
        markdown_path: md_out.to_path_buf(),
        html_path,
    })
}

// Whole-buffer write; creates missing parent directories.
fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}
