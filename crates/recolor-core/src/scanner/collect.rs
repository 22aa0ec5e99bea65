use tracing::{debug, trace};

use crate::palette::{PaletteSignature, SignatureTable, find_all};
use crate::process::ReadMemory;
use crate::scanner::{MemoryRegion, ScanHit};

/// Read `region_size` bytes at `base_address + offset` for every offset.
///
/// Offsets that overflow the address space or fail to read are left out.
/// Regions come back in `offsets` order.
pub fn collect_regions<R: ReadMemory + ?Sized>(
    reader: &R,
    base_address: u64,
    offsets: &[u64],
    region_size: usize,
) -> Vec<MemoryRegion> {
    let regions: Vec<MemoryRegion> = offsets
        .iter()
        .filter_map(|&offset| base_address.checked_add(offset))
        .filter_map(|address| match reader.read_bytes(address, region_size) {
            Ok(data) => Some(MemoryRegion { address, data }),
            Err(e) => {
                trace!("Skipping region at {:#x}: {}", address, e);
                None
            }
        })
        .collect();

    debug!(
        "Collected {} of {} probe regions ({} bytes each)",
        regions.len(),
        offsets.len(),
        region_size
    );
    regions
}

/// Locate `signature` in every region, in region order then offset order.
pub fn scan_all(
    regions: &[MemoryRegion],
    signature: &PaletteSignature,
    search_limit: usize,
) -> Vec<ScanHit> {
    regions
        .iter()
        .enumerate()
        .flat_map(|(region_index, region)| {
            find_all(&region.data, signature, search_limit)
                .into_iter()
                .map(move |offset| ScanHit {
                    region_index,
                    offset,
                    address: region.address + offset as u64,
                })
        })
        .collect()
}

/// Locate every signature in `table`, merged into one sorted, deduplicated list.
pub fn scan_all_table(
    regions: &[MemoryRegion],
    table: &SignatureTable,
    search_limit: usize,
) -> Vec<ScanHit> {
    let mut hits: Vec<ScanHit> = table
        .iter()
        .flat_map(|variant| scan_all(regions, &variant.signature, search_limit))
        .collect();
    hits.sort_by_key(|h| (h.region_index, h.offset));
    hits.dedup();
    hits
}
