//! Batch generation of recolored sprite files.
//!
//! For every sprite the generator writes one file per scheme under
//! `<output_root>/sprites_<scheme>/<file name>`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::archive::is_sprite_path;
use crate::config::Config;
use crate::discovery::discover_files;
use crate::error::{Error, Result};
use crate::palette::find_sprite_palette;
use crate::scheme::{ColorScheme, TransformEngine};

#[derive(Debug, Clone)]
pub struct VariantGenerator {
    engine: TransformEngine,
    schemes: Vec<ColorScheme>,
}

impl VariantGenerator {
    pub fn new(engine: TransformEngine, schemes: Vec<ColorScheme>) -> Self {
        Self { engine, schemes }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TransformEngine::new(config.window_size, config.sentinel_set()),
            config.schemes.clone(),
        )
    }

    pub fn schemes(&self) -> &[ColorScheme] {
        &self.schemes
    }

    /// Directory that receives the `scheme` variants.
    pub fn scheme_dir(output_root: &Path, scheme: ColorScheme) -> PathBuf {
        output_root.join(format!("sprites_{}", scheme))
    }

    /// Recolor `sprite` in memory, one owned copy per scheme.
    ///
    /// A sprite without a palette yields unmodified copies.
    pub fn render(&self, sprite: &[u8]) -> Vec<(ColorScheme, Vec<u8>)> {
        let palette = find_sprite_palette(sprite);
        self.schemes
            .iter()
            .map(|&scheme| {
                let mut data = sprite.to_vec();
                if let Some(offset) = palette {
                    self.engine.apply(&mut data, offset, scheme);
                }
                (scheme, data)
            })
            .collect()
    }

    /// Write every scheme variant of `sprite` as `file_name`.
    ///
    /// Write failures are logged and skipped. Returns the number of files written.
    pub fn generate_variants(&self, sprite: &[u8], output_root: &Path, file_name: &str) -> usize {
        if find_sprite_palette(sprite).is_none() {
            debug!("{}: no palette, writing unmodified copies", file_name);
        }

        let mut written = 0;
        for (scheme, data) in self.render(sprite) {
            let dir = Self::scheme_dir(output_root, scheme);
            if let Err(e) = fs::create_dir_all(&dir) {
                warn!("Failed to create {}: {}", dir.display(), e);
                continue;
            }
            let path = dir.join(file_name);
            match fs::write(&path, &data) {
                Ok(()) => written += 1,
                Err(e) => warn!("Failed to write {}: {}", path.display(), e),
            }
        }
        written
    }

    /// Generate variants for one sprite file.
    pub fn process_file(&self, sprite_path: &Path, output_root: &Path) -> Result<usize> {
        let file_name = sprite_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Not a file path: {}", sprite_path.display()),
                ))
            })?;
        let sprite = fs::read(sprite_path)?;
        let written = self.generate_variants(&sprite, output_root, file_name);
        debug!("{}: {} variants written", sprite_path.display(), written);
        Ok(written)
    }

    /// Generate variants for every sprite under `input_dir`, recursively.
    ///
    /// Returns the number of sprite files processed, not the number of
    /// variant files written.
    pub fn process_directory(&self, input_dir: &Path, output_root: &Path) -> usize {
        let sprites = match discover_files(input_dir, "**/*", is_sprite_path) {
            Ok(sprites) => sprites,
            Err(e) => {
                warn!("Sprite discovery failed in {}: {}", input_dir.display(), e);
                return 0;
            }
        };

        let mut processed = 0;
        for path in &sprites {
            match self.process_file(path, output_root) {
                Ok(written) if written > 0 => processed += 1,
                Ok(_) => warn!("No variants written for {}", path.display()),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        info!(
            "Processed {} of {} sprites into {} schemes",
            processed,
            sprites.len(),
            self.schemes.len()
        );
        processed
    }
}

impl Default for VariantGenerator {
    fn default() -> Self {
        Self::new(TransformEngine::default(), ColorScheme::BASIC.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite_with_palette() -> Vec<u8> {
        let mut data = vec![0x00, 0x00, 0xA5]; // transparent first entry
        for i in 0..20u8 {
            data.extend_from_slice(&[0x10 + i, 0x20, 0x30]);
        }
        data.extend_from_slice(&[0xEE; 64]); // pixel data
        data
    }

    #[test]
    fn test_scheme_dir_names() {
        let root = Path::new("out");
        assert_eq!(
            VariantGenerator::scheme_dir(root, ColorScheme::Purple),
            root.join("sprites_purple")
        );
        assert_eq!(
            VariantGenerator::scheme_dir(root, ColorScheme::OceanBlue),
            root.join("sprites_ocean_blue")
        );
    }

    #[test]
    fn test_no_palette_writes_identical_copies() {
        let dir = tempfile::tempdir().unwrap();
        let sprite = vec![0x17, 0x2C, 0x4A, 1, 2, 3, 4, 5, 6, 7];

        let written = VariantGenerator::default().generate_variants(&sprite, dir.path(), "tiny.spr");

        assert_eq!(written, 5);
        for scheme in ColorScheme::BASIC {
            let path = VariantGenerator::scheme_dir(dir.path(), scheme).join("tiny.spr");
            assert_eq!(fs::read(path).unwrap(), sprite, "{}", scheme);
        }
    }

    #[test]
    fn test_palette_recolored_per_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let sprite = sprite_with_palette();
        VariantGenerator::default().generate_variants(&sprite, dir.path(), "unit.spr");

        let read = |scheme| {
            fs::read(VariantGenerator::scheme_dir(dir.path(), scheme).join("unit.spr")).unwrap()
        };

        assert_eq!(read(ColorScheme::Original), sprite);

        let blue = read(ColorScheme::Blue);
        assert_eq!(blue.len(), sprite.len());
        assert_eq!(&blue[..3], &[0x00, 0x00, 0xA5]);
        assert_eq!(&blue[3..6], &[0x60, 0x10, 0x10]);
        // Beyond the 96-byte window nothing changes
        assert_eq!(&blue[96..], &sprite[96..]);

        assert_ne!(read(ColorScheme::Red), read(ColorScheme::Green));
    }

    #[test]
    fn test_render_does_not_alias_input() {
        let sprite = sprite_with_palette();
        let before = sprite.clone();
        let variants = VariantGenerator::default().render(&sprite);
        assert_eq!(variants.len(), 5);
        assert_eq!(sprite, before);
    }

    #[test]
    fn test_custom_scheme_set() {
        let dir = tempfile::tempdir().unwrap();
        let generator = VariantGenerator::new(
            TransformEngine::default(),
            vec![ColorScheme::IronGray, ColorScheme::RosePink],
        );
        let written = generator.generate_variants(&sprite_with_palette(), dir.path(), "a.spr");
        assert_eq!(written, 2);
        assert!(dir.path().join("sprites_iron_gray/a.spr").is_file());
        assert!(dir.path().join("sprites_rose_pink/a.spr").is_file());
    }

    #[test]
    fn test_process_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = VariantGenerator::default()
            .process_file(&dir.path().join("missing.spr"), dir.path());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_process_directory_counts_files() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        fs::create_dir_all(input.join("battle")).unwrap();
        fs::write(input.join("a.spr"), sprite_with_palette()).unwrap();
        fs::write(input.join("battle/b_spr.bin"), [1u8, 2, 3]).unwrap();
        fs::write(input.join("battle/notes.txt"), b"skip").unwrap();

        let output = root.path().join("out");
        let processed = VariantGenerator::default().process_directory(&input, &output);

        assert_eq!(processed, 2);
        assert!(output.join("sprites_red/a.spr").is_file());
        assert!(output.join("sprites_purple/b_spr.bin").is_file());
        assert!(!output.join("sprites_red/notes.txt").exists());
    }
}
