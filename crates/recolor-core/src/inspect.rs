//! Palette inspection reports for sprite files and memory regions.

use serde::Serialize;

use crate::config::Config;
use crate::palette::{Bgr, UNRECOGNIZED, VariantClassifier, colors, find_first, find_sprite_palette};

/// What a buffer's palette window looks like and what it was recognized as.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteReport {
    pub source: String,
    pub address: u64,
    pub size: usize,
    /// Palette start in sprite-file mode.
    pub palette_offset: Option<usize>,
    /// First match of the locator signature within the search limit.
    pub locator_offset: Option<usize>,
    pub variant_code: u32,
    pub variant_name: Option<String>,
    pub entries: Vec<Bgr>,
    pub hex_dump: Vec<String>,
}

impl PaletteReport {
    /// Inspect `data`, reporting addresses relative to `address`.
    pub fn build(source: impl Into<String>, address: u64, data: &[u8], config: &Config) -> Self {
        let classifier = VariantClassifier::new(config.variants.clone());
        let palette_offset = find_sprite_palette(data);
        let locator_offset = find_first(data, &config.locator_signature, config.search_limit);

        let start = palette_offset.unwrap_or(0);
        let end = start.saturating_add(config.window_size).min(data.len());
        let window = data.get(start..end).unwrap_or_default();

        let variant_code = classifier.classify(data, start);
        let variant_name = if variant_code == UNRECOGNIZED {
            None
        } else {
            classifier.variant_name(variant_code).map(str::to_string)
        };

        Self {
            source: source.into(),
            address,
            size: data.len(),
            palette_offset,
            locator_offset,
            variant_code,
            variant_name,
            entries: colors(window).collect(),
            hex_dump: format_hex_dump(address + start as u64, window),
        }
    }
}

/// Classic 16-bytes-per-line hex dump with an ASCII column.
pub fn format_hex_dump(address: u64, bytes: &[u8]) -> Vec<String> {
    const BYTES_PER_LINE: usize = 16;

    bytes
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| {
            let addr = address + (i * BYTES_PER_LINE) as u64;
            let hex_part = chunk
                .iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>()
                .join(" ");
            let ascii_part: String = chunk
                .iter()
                .map(|&b| if (0x20..0x7F).contains(&b) { b as char } else { '.' })
                .collect();
            format!("{:08X}  {:47}  {}", addr, hex_part, ascii_part)
        })
        .collect()
}
