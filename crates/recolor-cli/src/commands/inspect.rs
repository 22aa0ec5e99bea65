//! Palette inspection for sprite files.

use std::fs;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use recolor_core::{Bgr, Config, PaletteReport};

pub fn run(sprite: &str, json: bool, config: &Config) -> Result<()> {
    let data = fs::read(sprite).with_context(|| format!("Failed to read {}", sprite))?;
    let report = PaletteReport::build(sprite, 0, &data, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report, config);
    Ok(())
}

fn print_report(report: &PaletteReport, config: &Config) {
    println!("{} ({} bytes)", report.source.bold(), report.size);

    match report.palette_offset {
        Some(offset) => println!("Palette offset: {:#x}", offset),
        None => println!("Palette offset: none (file too small)"),
    }
    match report.locator_offset {
        Some(offset) => println!(
            "Locator '{}': found at {:#x}",
            config.locator_signature.name(),
            offset
        ),
        None => println!(
            "Locator '{}': not found in first {} bytes",
            config.locator_signature.name(),
            config.search_limit
        ),
    }
    match &report.variant_name {
        Some(name) => println!("Variant: {} (code {})", name.green(), report.variant_code),
        None => println!("Variant: {}", "unrecognized".yellow()),
    }

    println!();
    let sentinels = config.sentinel_set();
    for (i, color) in report.entries.iter().enumerate() {
        let marker = if sentinels.contains(*color) { "  (kept)" } else { "" };
        println!("{:>3}  {}  {}{}", i, swatch(*color), color, marker);
    }

    println!();
    for line in &report.hex_dump {
        println!("{}", line);
    }

    println!();
    print!("Schemes: ");
    for scheme in &config.schemes {
        let sample = report
            .entries
            .iter()
            .copied()
            .find(|c| !sentinels.contains(*c))
            .map(|c| scheme.apply_to(c));
        match sample {
            Some(color) => print!("{} {}  ", swatch(color), scheme),
            None => print!("{}  ", scheme),
        }
    }
    println!();
}

fn swatch(color: Bgr) -> String {
    "   ".on_truecolor(color.r, color.g, color.b).to_string()
}
