//! Extract and process as one pipeline.

use std::path::Path;

use anyhow::{Result, bail};
use recolor_core::archive::{extract_all_matching_from_directory, is_sprite_name};
use recolor_core::{Config, VariantGenerator};
use tracing::info;

pub fn run(pac_dir: &str, output: &str, config: &Config) -> Result<()> {
    let pac_dir = Path::new(pac_dir);
    if !pac_dir.is_dir() {
        bail!("Not a directory: {}", pac_dir.display());
    }

    let output = Path::new(output);
    let extracted_dir = output.join("extracted_sprites");
    let data_dir = output.join("data");

    info!("Extracting sprites to {}", extracted_dir.display());
    let extracted = extract_all_matching_from_directory(pac_dir, is_sprite_name, &extracted_dir);
    if extracted == 0 {
        println!("No sprites found in {}", pac_dir.display());
        return Ok(());
    }

    info!("Generating variants in {}", data_dir.display());
    let generator = VariantGenerator::from_config(config);
    let processed = generator.process_directory(&extracted_dir, &data_dir);

    println!("Extracted: {}", extracted);
    println!("Processed: {}", processed);
    println!("Schemes:   {}", generator.schemes().len());
    Ok(())
}
