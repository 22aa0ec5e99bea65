//! Palette location in sprite files and memory snapshots.
//!
//! Memory snapshots are searched for an exact signature within a bounded
//! prefix of the buffer. Sprite files skip the search entirely: the exporter
//! always writes the palette at offset 0.

use crate::config::limits::{BYTES_PER_COLOR, MIN_SPRITE_PALETTE_BYTES};
use crate::palette::signature::PaletteSignature;

/// Clamp a configured search limit to the buffer length.
fn search_window<'a>(buffer: &'a [u8], search_limit: usize) -> &'a [u8] {
    &buffer[..search_limit.min(buffer.len())]
}

/// Find the first offset where `signature` matches, scanning byte by byte.
///
/// Only bytes in `buffer[..min(search_limit, buffer.len())]` are examined; a
/// match must fit entirely inside that window.
///
/// # Example
///
/// ```
/// use recolor_core::palette::{find_first, PaletteSignature};
///
/// let sig = PaletteSignature::from_pattern("brown", "17 2C 4A").unwrap();
/// let buffer = [0, 0, 0x17, 0x2C, 0x4A, 0];
/// assert_eq!(find_first(&buffer, &sig, 288), Some(2));
/// assert_eq!(find_first(&buffer, &sig, 4), None);
/// ```
pub fn find_first(buffer: &[u8], signature: &PaletteSignature, search_limit: usize) -> Option<usize> {
    let window = search_window(buffer, search_limit);
    let pattern = signature.bytes();
    if pattern.is_empty() || window.len() < BYTES_PER_COLOR || pattern.len() > window.len() {
        return None;
    }

    window.windows(pattern.len()).position(|w| w == pattern)
}

/// Find every offset where `signature` matches, in ascending order.
///
/// Same bounds as [`find_first`]. Overlapping matches are all reported.
pub fn find_all(buffer: &[u8], signature: &PaletteSignature, search_limit: usize) -> Vec<usize> {
    let window = search_window(buffer, search_limit);
    let pattern = signature.bytes();
    if pattern.is_empty() || window.len() < BYTES_PER_COLOR || pattern.len() > window.len() {
        return Vec::new();
    }

    window
        .windows(pattern.len())
        .enumerate()
        .filter_map(|(i, w)| if w == pattern { Some(i) } else { None })
        .collect()
}

/// Palette start for an exported sprite file.
///
/// Returns 0 when the buffer holds at least 16 colors, without inspecting
/// the bytes.
pub fn find_sprite_palette(buffer: &[u8]) -> Option<usize> {
    if buffer.len() >= MIN_SPRITE_PALETTE_BYTES {
        Some(0)
    } else {
        None
    }
}
