//! Writing ROM listings.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// File name the listing is saved and downloaded under.
pub const DEFAULT_OUTPUT_NAME: &str = "logism_rom.txt";

/// Joins listing lines into a newline-terminated text artifact.
pub fn render_listing(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn write_listing(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, render_listing(lines))
        .with_context(|| format!("failed to write listing to {}", path.display()))?;
    tracing::info!("ROM listing ({} words) written to {}", lines.len(), path.display());
    Ok(())
}
