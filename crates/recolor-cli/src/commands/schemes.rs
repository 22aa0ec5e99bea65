//! Built-in color scheme listing.

use anyhow::Result;
use owo_colors::OwoColorize;
use recolor_core::ColorScheme;

pub fn run() -> Result<()> {
    for scheme in ColorScheme::all() {
        let kind = match scheme.tint() {
            Some(target) => format!(
                "tint {}",
                "   ".on_truecolor(target.r, target.g, target.b)
            ),
            None if scheme.is_identity() => "identity".to_string(),
            None => "channel".to_string(),
        };
        let basic = if ColorScheme::BASIC.contains(&scheme) { "*" } else { " " };
        println!("{} {:<16} {}", basic, scheme.as_str(), kind);
    }
    println!("\n* default variant set");
    Ok(())
}
