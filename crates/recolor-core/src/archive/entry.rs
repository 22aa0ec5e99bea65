use encoding_rs::SHIFT_JIS;
use serde::Serialize;
use tracing::debug;

use crate::archive::read_u32_le;
use crate::config::limits::{ARCHIVE_ENTRY_SIZE, ARCHIVE_NAME_SIZE};

/// One record of an archive's entry table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub index: usize,
    pub offset: u32,
    pub size: u32,
    pub name: String,
}

impl Entry {
    /// Parse a 40-byte table record.
    pub(crate) fn parse(index: usize, record: &[u8]) -> Option<Self> {
        if record.len() < ARCHIVE_ENTRY_SIZE {
            return None;
        }
        let offset = read_u32_le(record, 0)?;
        let size = read_u32_le(record, 4)?;
        let name = decode_name(&record[8..8 + ARCHIVE_NAME_SIZE]);
        Some(Self {
            index,
            offset,
            size,
            name,
        })
    }
}

/// Decode a null-padded name field.
///
/// Names are ASCII. When more than half of the bytes before the first null
/// are non-printable the field is decoded as Shift-JIS instead.
pub fn decode_name(field: &[u8]) -> String {
    let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    let bytes = &field[..len];

    let non_printable = bytes
        .iter()
        .filter(|b| !(b.is_ascii_graphic() || **b == b' '))
        .count();
    if non_printable * 2 > bytes.len() {
        let (decoded, _, had_errors) = SHIFT_JIS.decode(bytes);
        if had_errors {
            debug!(
                "Shift-JIS decoding had errors for name bytes: {:?}",
                &bytes[..bytes.len().min(20)]
            );
        }
        return decoded.into_owned();
    }

    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ascii_name() {
        let mut field = [0u8; 32];
        field[..9].copy_from_slice(b"ramza.spr");
        assert_eq!(decode_name(&field), "ramza.spr");
    }

    #[test]
    fn test_decode_stops_at_first_null() {
        let mut field = [0u8; 32];
        field[..5].copy_from_slice(b"a.spr");
        field[6..9].copy_from_slice(b"zzz");
        assert_eq!(decode_name(&field), "a.spr");
    }

    #[test]
    fn test_decode_full_width_field() {
        let field = [b'x'; 32];
        assert_eq!(decode_name(&field), "x".repeat(32));
    }

    #[test]
    fn test_decode_shift_jis_fallback() {
        // "あいう" in Shift-JIS
        let mut field = [0u8; 32];
        field[..6].copy_from_slice(&[0x82, 0xA0, 0x82, 0xA2, 0x82, 0xA4]);
        assert_eq!(decode_name(&field), "あいう");
    }

    #[test]
    fn test_parse_record() {
        let mut record = Vec::new();
        record.extend_from_slice(&44u32.to_le_bytes());
        record.extend_from_slice(&10u32.to_le_bytes());
        let mut field = [0u8; 32];
        field[..5].copy_from_slice(b"a.spr");
        record.extend_from_slice(&field);

        let entry = Entry::parse(3, &record).unwrap();
        assert_eq!(entry.index, 3);
        assert_eq!(entry.offset, 44);
        assert_eq!(entry.size, 10);
        assert_eq!(entry.name, "a.spr");

        assert!(Entry::parse(0, &record[..39]).is_none());
    }
}
