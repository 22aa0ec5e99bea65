//! Variant generation for a sprite file or directory.

use std::path::Path;

use anyhow::{Result, bail};
use recolor_core::{Config, VariantGenerator};

pub fn run(input: &str, output: &str, config: &Config) -> Result<()> {
    let input = Path::new(input);
    let output = Path::new(output);
    let generator = VariantGenerator::from_config(config);

    if input.is_file() {
        let written = generator.process_file(input, output)?;
        println!("Wrote {} variants of {}", written, input.display());
    } else if input.is_dir() {
        let processed = generator.process_directory(input, output);
        println!(
            "Processed {} sprites into {} schemes under {}",
            processed,
            generator.schemes().len(),
            output.display()
        );
    } else {
        bail!("Input not found: {}", input.display());
    }
    Ok(())
}
