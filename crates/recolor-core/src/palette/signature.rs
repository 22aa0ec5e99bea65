use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::limits::BYTES_PER_COLOR;
use crate::error::{Error, Result};
use crate::palette::color::Bgr;

/// A constant, ordered run of BGR triples that identifies a palette by exact match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSignature", into = "RawSignature")]
pub struct PaletteSignature {
    name: String,
    bytes: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct RawSignature {
    name: String,
    pattern: String,
}

impl TryFrom<RawSignature> for PaletteSignature {
    type Error = Error;

    fn try_from(raw: RawSignature) -> Result<Self> {
        PaletteSignature::from_pattern(raw.name, &raw.pattern)
    }
}

impl From<PaletteSignature> for RawSignature {
    fn from(sig: PaletteSignature) -> Self {
        RawSignature {
            pattern: format_pattern(&sig.bytes),
            name: sig.name,
        }
    }
}

impl PaletteSignature {
    pub fn new(name: impl Into<String>, colors: &[Bgr]) -> Result<Self> {
        let bytes: Vec<u8> = colors.iter().flat_map(|c| c.to_bytes()).collect();
        Self::from_bytes(name, bytes)
    }

    /// Parse a signature from hex text such as `"A0 60 40 80 50 30"`.
    pub fn from_pattern(name: impl Into<String>, pattern: &str) -> Result<Self> {
        Self::from_bytes(name, parse_pattern(pattern)?)
    }

    fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        if bytes.is_empty() || bytes.len() % BYTES_PER_COLOR != 0 {
            return Err(Error::InvalidSignature(format!(
                "'{}' must be a non-empty run of {}-byte colors, got {} bytes",
                name,
                BYTES_PER_COLOR,
                bytes.len()
            )));
        }
        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn colors(&self) -> Vec<Bgr> {
        crate::palette::color::colors(&self.bytes).collect()
    }

    /// Whether `buffer` holds this signature starting at `offset`.
    pub fn matches_at(&self, buffer: &[u8], offset: usize) -> bool {
        offset
            .checked_add(self.bytes.len())
            .and_then(|end| buffer.get(offset..end))
            .is_some_and(|window| window == self.bytes.as_slice())
    }
}

/// One baseline the Variant Classifier can recognize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSignature {
    /// Classification code reported on match. Must be non-zero; 0 means unrecognized.
    pub code: u32,
    #[serde(flatten)]
    pub signature: PaletteSignature,
}

/// Ordered table of variant baselines. The first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureTable {
    pub variants: Vec<VariantSignature>,
}

impl SignatureTable {
    pub fn new(variants: Vec<VariantSignature>) -> Result<Self> {
        if let Some(bad) = variants.iter().find(|v| v.code == 0) {
            return Err(Error::InvalidSignature(format!(
                "variant '{}' uses reserved code 0",
                bad.signature.name()
            )));
        }
        Ok(Self { variants })
    }

    pub fn entry(&self, name: &str) -> Option<&VariantSignature> {
        self.variants
            .iter()
            .find(|v| v.signature.name().eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariantSignature> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl Default for SignatureTable {
    fn default() -> Self {
        builtin_variants()
    }
}

pub fn load_signatures<P: AsRef<Path>>(path: P) -> Result<SignatureTable> {
    let content = fs::read_to_string(&path)?;
    let table: SignatureTable = serde_json::from_str(&content)?;
    SignatureTable::new(table.variants)
}

pub fn save_signatures<P: AsRef<Path>>(path: P, table: &SignatureTable) -> Result<()> {
    let content = serde_json::to_string_pretty(table)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn parse_pattern(pattern: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    for token in pattern.split_whitespace() {
        let token = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        let value = u8::from_str_radix(token, 16).map_err(|e| {
            Error::InvalidSignature(format!("Invalid signature token '{}': {}", token, e))
        })?;
        bytes.push(value);
    }

    if bytes.is_empty() {
        return Err(Error::InvalidSignature(
            "Signature pattern is empty".to_string(),
        ));
    }

    Ok(bytes)
}

pub fn format_pattern(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The brown tunic of the default sprite, used by the memory locator.
pub fn original_brown() -> PaletteSignature {
    PaletteSignature {
        name: "original_brown".to_string(),
        bytes: vec![0x17, 0x2C, 0x4A],
    }
}

/// Chapter outfit baselines observed in the game's assets.
///
/// Chapters 2 and 4 store identical bytes; the chapter 2 entry comes first and wins.
pub fn builtin_variants() -> SignatureTable {
    let variant = |code: u32, name: &str, bytes: [u8; 3]| VariantSignature {
        code,
        signature: PaletteSignature {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        },
    };

    SignatureTable {
        variants: vec![
            variant(1, "chapter1", [0xA0, 0x60, 0x40]),
            variant(2, "chapter2", [0x80, 0x40, 0x60]),
            variant(3, "chapter3", [0x40, 0x30, 0x60]),
            variant(4, "chapter4", [0x80, 0x40, 0x60]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pattern() {
        assert_eq!(parse_pattern("A0 60 40").unwrap(), vec![0xA0, 0x60, 0x40]);
        assert_eq!(parse_pattern("0x17 0x2c 0x4A").unwrap(), vec![0x17, 0x2C, 0x4A]);
    }

    #[test]
    fn test_parse_pattern_rejects_garbage() {
        assert!(parse_pattern("ZZ").is_err());
        assert!(parse_pattern("   ").is_err());
        assert!(parse_pattern("??").is_err());
    }

    #[test]
    fn test_format_pattern() {
        assert_eq!(format_pattern(&[0x00, 0x0A, 0xFF]), "00 0A FF");
    }

    #[test]
    fn test_signature_requires_whole_colors() {
        assert!(PaletteSignature::from_pattern("bad", "01 02").is_err());
        assert!(PaletteSignature::from_pattern("ok", "01 02 03 04 05 06").is_ok());
    }

    #[test]
    fn test_matches_at() {
        let sig = PaletteSignature::from_pattern("s", "01 02 03").unwrap();
        let buffer = [9, 1, 2, 3, 9];
        assert!(sig.matches_at(&buffer, 1));
        assert!(!sig.matches_at(&buffer, 0));
        assert!(!sig.matches_at(&buffer, 3));
        assert!(!sig.matches_at(&buffer, usize::MAX));
    }

    #[test]
    fn test_table_rejects_code_zero() {
        let sig = PaletteSignature::from_pattern("zero", "01 02 03").unwrap();
        let result = SignatureTable::new(vec![VariantSignature {
            code: 0,
            signature: sig,
        }]);
        assert!(result.is_err());
    }

    #[test]
    fn test_builtin_variants_order() {
        let table = builtin_variants();
        let codes: Vec<u32> = table.iter().map(|v| v.code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4]);
        assert_eq!(table.entry("CHAPTER3").map(|v| v.code), Some(3));
    }

    #[test]
    fn test_table_json_shape() {
        let json = serde_json::to_value(builtin_variants()).unwrap();
        let first = &json["variants"][0];
        assert_eq!(first["code"], 1);
        assert_eq!(first["name"], "chapter1");
        assert_eq!(first["pattern"], "A0 60 40");
    }

    #[test]
    fn test_save_and_load_signatures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("variants.json");
        save_signatures(&path, &builtin_variants()).unwrap();
        assert_eq!(load_signatures(&path).unwrap(), builtin_variants());
    }

    #[test]
    fn test_load_rejects_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("variants.json");
        fs::write(
            &path,
            r#"{"variants":[{"code":1,"name":"x","pattern":"01 02"}]}"#,
        )
        .unwrap();
        assert!(load_signatures(&path).is_err());
    }
}
