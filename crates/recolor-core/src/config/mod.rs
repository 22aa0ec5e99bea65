//! Configuration and process-wide constants.
//!
//! - `Config` - user-editable settings persisted as JSON
//! - `limits` - palette and archive layout constants
//! - `probe` - default address offsets probed for live palettes

mod probe;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::palette::{Bgr, PaletteSignature, SignatureTable, original_brown};
use crate::scheme::{ColorScheme, SentinelSet};

pub use probe::DEFAULT_PROBE_OFFSETS;

/// Palette and archive layout constants.
pub mod limits {
    /// Bytes per palette color (B, G, R).
    pub const BYTES_PER_COLOR: usize = 3;

    /// A sprite file shorter than 16 colors has no usable palette.
    pub const MIN_SPRITE_PALETTE_BYTES: usize = 16 * BYTES_PER_COLOR;

    /// Signature search window: 96 colors.
    pub const DEFAULT_SEARCH_LIMIT: usize = 96 * BYTES_PER_COLOR;

    /// Transform window: the first 32 colors referenced by sprite rendering.
    pub const DEFAULT_WINDOW_SIZE: usize = 32 * BYTES_PER_COLOR;

    /// Bytes read per probed memory region.
    pub const DEFAULT_REGION_SIZE: usize = 4096;

    /// Archive header: a little-endian u32 entry count.
    pub const ARCHIVE_HEADER_SIZE: usize = 4;

    /// Archive header with the `PACK` magic in front of the entry count.
    pub const PACK_HEADER_SIZE: usize = 8;

    /// Archive entry: offset (4) + size (4) + name (32).
    pub const ARCHIVE_ENTRY_SIZE: usize = 40;

    /// Null-padded name field inside an archive entry.
    pub const ARCHIVE_NAME_SIZE: usize = 32;
}

/// Watch mode polling configuration.
pub mod polling {
    /// Default delay between scan passes.
    pub const DEFAULT_INTERVAL_MS: u64 = 1000;

    /// Lower bound so a typo cannot spin the CPU.
    pub const MIN_INTERVAL_MS: u64 = 50;
}

pub const DEFAULT_PROCESS_NAME: &str = "FFT_enhanced.exe";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Executable name of the game process.
    pub process_name: String,
    /// Bytes examined per buffer when searching for a signature.
    pub search_limit: usize,
    /// Bytes rewritten per transform.
    pub window_size: usize,
    /// Bytes read per probed memory region.
    pub region_size: usize,
    /// Offsets from the module base to probe for live palettes.
    pub probe_offsets: Vec<u64>,
    /// Signature that locates palettes inside memory regions.
    pub locator_signature: PaletteSignature,
    /// Baselines the classifier recognizes, in priority order.
    pub variants: SignatureTable,
    /// Colors that are never recolored.
    pub sentinels: Vec<Bgr>,
    /// Schemes produced by the variant generator.
    pub schemes: Vec<ColorScheme>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            process_name: DEFAULT_PROCESS_NAME.to_string(),
            search_limit: limits::DEFAULT_SEARCH_LIMIT,
            window_size: limits::DEFAULT_WINDOW_SIZE,
            region_size: limits::DEFAULT_REGION_SIZE,
            probe_offsets: DEFAULT_PROBE_OFFSETS.to_vec(),
            locator_signature: original_brown(),
            variants: SignatureTable::default(),
            sentinels: SentinelSet::default().colors().to_vec(),
            schemes: ColorScheme::BASIC.to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| Error::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        // Re-run table invariants that plain deserialization skips
        SignatureTable::new(self.variants.variants.clone())?;

        if self.window_size % limits::BYTES_PER_COLOR != 0 {
            return Err(Error::ConfigParseError(format!(
                "window_size {} is not a multiple of {}",
                self.window_size,
                limits::BYTES_PER_COLOR
            )));
        }
        if self.region_size == 0 {
            return Err(Error::ConfigParseError(
                "region_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sentinel_set(&self) -> SentinelSet {
        SentinelSet::new(self.sentinels.clone())
    }
}
