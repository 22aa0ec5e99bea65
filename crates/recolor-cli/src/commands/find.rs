//! Targeted search-and-extract.

use std::path::Path;

use anyhow::{Result, bail};
use recolor_core::archive::find_and_extract;

pub fn run(pac_dir: &str, pattern: &str, output: &str) -> Result<()> {
    let pac_dir = Path::new(pac_dir);
    if !pac_dir.is_dir() {
        bail!("Not a directory: {}", pac_dir.display());
    }
    if pattern.is_empty() {
        bail!("Search pattern must not be empty");
    }

    let names = find_and_extract(pac_dir, pattern, Path::new(output));
    if names.is_empty() {
        println!("No sprites matching '{}'", pattern);
        return Ok(());
    }

    for name in &names {
        println!("  {}", name);
    }
    println!("Extracted {} sprites matching '{}' to {}", names.len(), pattern, output);
    Ok(())
}
