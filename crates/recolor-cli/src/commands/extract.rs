//! Sprite extraction commands.

use std::path::Path;

use anyhow::{Result, bail};
use recolor_core::Archive;
use recolor_core::archive::{extract_all_matching, extract_all_matching_from_directory, is_sprite_name};

/// Extract sprites from every archive under `pac_dir`.
pub fn run(pac_dir: &str, output: &str) -> Result<()> {
    let pac_dir = Path::new(pac_dir);
    if !pac_dir.is_dir() {
        bail!("Not a directory: {}", pac_dir.display());
    }

    let count = extract_all_matching_from_directory(pac_dir, is_sprite_name, Path::new(output));
    println!("Extracted {} sprites to {}", count, output);
    Ok(())
}

/// Extract sprites from a single archive.
pub fn run_one(pac_file: &str, output: &str) -> Result<()> {
    let archive = Archive::load(pac_file)?;
    let count = extract_all_matching(&archive, is_sprite_name, Path::new(output));
    println!(
        "Extracted {} of {} entries from {} to {}",
        count,
        archive.entry_count(),
        pac_file,
        output
    );
    Ok(())
}
