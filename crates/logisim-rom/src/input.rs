//! Reading memory dumps into hex words.

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Splits a memory dump into hex words, one per non-blank line.
pub fn parse_mem_dump(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn read_mem_dump(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read memory dump {}", path.display()))?;
    let words = parse_mem_dump(&raw);
    tracing::debug!("Read {} words from {}", words.len(), path.display());
    Ok(words)
}

pub fn read_mem_dump_from<R: Read>(mut reader: R) -> Result<Vec<String>> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .context("failed to read memory dump from stdin")?;
    Ok(parse_mem_dump(&raw))
}
