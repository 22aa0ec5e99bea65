use tracing::debug;

use crate::config::limits::{BYTES_PER_COLOR, DEFAULT_WINDOW_SIZE};
use crate::palette::Bgr;
use crate::scheme::ColorScheme;

/// Colors that are never recolored, wherever they appear in the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelSet {
    colors: Vec<Bgr>,
}

impl SentinelSet {
    pub fn new(colors: Vec<Bgr>) -> Self {
        Self { colors }
    }

    /// A set that protects nothing.
    pub fn none() -> Self {
        Self { colors: Vec::new() }
    }

    pub fn colors(&self) -> &[Bgr] {
        &self.colors
    }

    pub fn contains(&self, color: Bgr) -> bool {
        self.colors.contains(&color)
    }
}

impl Default for SentinelSet {
    fn default() -> Self {
        Self::new(vec![Bgr::BLACK, Bgr::TRANSPARENT])
    }
}

/// Rewrite the palette entries in `buffer[palette_offset..palette_offset + window_size]`.
///
/// The window is clamped to the buffer and only whole 3-byte entries are
/// visited; a trailing partial entry is left alone. Entries in `sentinels`
/// are skipped. Returns the number of entries whose bytes changed.
pub fn apply(
    buffer: &mut [u8],
    palette_offset: usize,
    scheme: ColorScheme,
    window_size: usize,
    sentinels: &SentinelSet,
) -> usize {
    if palette_offset >= buffer.len() {
        return 0;
    }
    let end = palette_offset
        .saturating_add(window_size)
        .min(buffer.len());
    let transform = scheme.transform();

    let mut modified = 0;
    for entry in buffer[palette_offset..end].chunks_exact_mut(BYTES_PER_COLOR) {
        let Some(before) = Bgr::from_slice(entry) else {
            continue;
        };
        if sentinels.contains(before) {
            continue;
        }
        let after = transform(before);
        if after != before {
            after.write_to(entry);
            modified += 1;
        }
    }

    debug!(
        "Applied {} at offset {}: {} entries changed",
        scheme, palette_offset, modified
    );
    modified
}

/// Transform settings shared by the variant generator and the region scanner.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    window_size: usize,
    sentinels: SentinelSet,
}

impl TransformEngine {
    pub fn new(window_size: usize, sentinels: SentinelSet) -> Self {
        Self {
            window_size,
            sentinels,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn sentinels(&self) -> &SentinelSet {
        &self.sentinels
    }

    pub fn apply(&self, buffer: &mut [u8], palette_offset: usize, scheme: ColorScheme) -> usize {
        apply(
            buffer,
            palette_offset,
            scheme,
            self.window_size,
            &self.sentinels,
        )
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE, SentinelSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_palette() -> Vec<u8> {
        let mut buffer = Vec::new();
        for i in 0..32u8 {
            buffer.extend_from_slice(&[0x10 + i, 0x20 + i, 0x30 + i]);
        }
        buffer
    }

    #[test]
    fn test_blue_scenario() {
        let mut buffer = vec![0x10, 0x20, 0x30];
        let changed = apply(&mut buffer, 0, ColorScheme::Blue, 96, &SentinelSet::default());
        assert_eq!(changed, 1);
        assert_eq!(buffer, vec![0x60, 0x10, 0x10]);
    }

    #[test]
    fn test_original_is_identity() {
        let mut buffer = sample_palette();
        let before = buffer.clone();
        let changed = apply(&mut buffer, 0, ColorScheme::Original, 96, &SentinelSet::default());
        assert_eq!(changed, 0);
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_red_twice_differs_from_red_once() {
        let engine = TransformEngine::default();
        let original = sample_palette();

        let mut once = original.clone();
        engine.apply(&mut once, 0, ColorScheme::Red);

        let mut twice = original.clone();
        engine.apply(&mut twice, 0, ColorScheme::Red);
        engine.apply(&mut twice, 0, ColorScheme::Red);

        assert_ne!(once, twice);
    }

    #[test]
    fn test_same_baseline_same_output() {
        let engine = TransformEngine::default();
        let original = sample_palette();

        let mut first = original.clone();
        engine.apply(&mut first, 0, ColorScheme::Red);
        let mut second = original.clone();
        engine.apply(&mut second, 0, ColorScheme::Red);

        assert_eq!(first, second);
    }

    #[test]
    fn test_sentinels_preserved_for_every_scheme() {
        for scheme in ColorScheme::all() {
            let mut buffer = vec![
                0x00, 0x00, 0xA5, // transparent
                0x10, 0x20, 0x30, //
                0x00, 0x00, 0x00, // black
                0x00, 0x00, 0xA5, // transparent, not first
            ];
            apply(&mut buffer, 0, scheme, 96, &SentinelSet::default());
            assert_eq!(&buffer[0..3], &[0x00, 0x00, 0xA5], "{}", scheme);
            assert_eq!(&buffer[6..9], &[0x00, 0x00, 0x00], "{}", scheme);
            assert_eq!(&buffer[9..12], &[0x00, 0x00, 0xA5], "{}", scheme);
        }
    }

    #[test]
    fn test_empty_sentinel_set_recolors_black_marker() {
        let mut buffer = vec![0x00, 0x00, 0xA5];
        let changed = apply(&mut buffer, 0, ColorScheme::Blue, 96, &SentinelSet::none());
        assert_eq!(changed, 1);
        assert_eq!(buffer, vec![0x50, 0x00, 0x37]);
    }

    #[test]
    fn test_window_limits_entries() {
        let mut buffer = sample_palette();
        buffer.extend_from_slice(&[0x10, 0x20, 0x30]);
        let changed = apply(&mut buffer, 0, ColorScheme::Blue, 96, &SentinelSet::default());
        assert_eq!(changed, 32);
        // Entry 33 sits outside the window
        assert_eq!(&buffer[96..99], &[0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_window_clamped_to_buffer() {
        let mut buffer = vec![0xFF, 0x10, 0x20, 0x30, 0x40];
        let changed = apply(&mut buffer, 1, ColorScheme::Blue, 96, &SentinelSet::default());
        assert_eq!(changed, 1);
        assert_eq!(buffer, vec![0xFF, 0x60, 0x10, 0x10, 0x40]);
    }

    #[test]
    fn test_offset_past_end_is_noop() {
        let mut buffer = vec![0x10, 0x20, 0x30];
        assert_eq!(apply(&mut buffer, 3, ColorScheme::Red, 96, &SentinelSet::default()), 0);
        assert_eq!(apply(&mut buffer, usize::MAX, ColorScheme::Red, 96, &SentinelSet::default()), 0);
        assert_eq!(buffer, vec![0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_unchanged_entries_not_counted() {
        // Blue on a saturated blue entry with zero green/red changes nothing
        let mut buffer = vec![0xFF, 0x00, 0x00, 0x10, 0x20, 0x30];
        let changed = apply(&mut buffer, 0, ColorScheme::Blue, 96, &SentinelSet::default());
        assert_eq!(changed, 1);
    }
}
