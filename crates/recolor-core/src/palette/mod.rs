//! Palette detection: color triples, signatures, location, and classification.

mod classifier;
mod color;
mod locator;
mod signature;

pub use classifier::{UNRECOGNIZED, VariantClassifier};
pub use color::{Bgr, colors};
pub use locator::{find_all, find_first, find_sprite_palette};
pub use signature::{
    PaletteSignature, SignatureTable, VariantSignature, builtin_variants, format_pattern,
    load_signatures, original_brown, parse_pattern, save_signatures,
};
