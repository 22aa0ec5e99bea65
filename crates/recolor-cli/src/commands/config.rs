//! Write the default configuration.

use std::path::Path;

use anyhow::{Result, bail};
use recolor_core::Config;

pub fn run(output: &str) -> Result<()> {
    if Path::new(output).exists() {
        bail!("Refusing to overwrite {}", output);
    }
    Config::default().save(output)?;
    println!("Default configuration written to {}", output);
    Ok(())
}
