use tracing::debug;

use crate::palette::signature::SignatureTable;

/// Classification code for a palette that matches no known baseline.
pub const UNRECOGNIZED: u32 = 0;

/// Identifies which outfit baseline a located palette starts from.
///
/// Different story chapters store their unmodified colors at different byte
/// values, so a palette must be classified before it is transformed.
#[derive(Debug, Clone, Default)]
pub struct VariantClassifier {
    table: SignatureTable,
}

impl VariantClassifier {
    pub fn new(table: SignatureTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SignatureTable {
        &self.table
    }

    /// Return the code of the first table entry whose bytes sit at
    /// `palette_offset`, or [`UNRECOGNIZED`].
    pub fn classify(&self, buffer: &[u8], palette_offset: usize) -> u32 {
        match self
            .table
            .iter()
            .find(|v| v.signature.matches_at(buffer, palette_offset))
        {
            Some(variant) => {
                debug!(
                    "Palette at offset {} classified as {} (code {})",
                    palette_offset,
                    variant.signature.name(),
                    variant.code
                );
                variant.code
            }
            None => UNRECOGNIZED,
        }
    }

    /// Name of the variant with the given code.
    pub fn variant_name(&self, code: u32) -> Option<&str> {
        self.table
            .iter()
            .find(|v| v.code == code)
            .map(|v| v.signature.name())
    }
}
