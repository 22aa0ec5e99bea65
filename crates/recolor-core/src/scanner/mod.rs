//! Live palette scanning over probed process memory.
//!
//! A pass reads a fixed set of regions, finds variant signatures in each,
//! classifies every hit and prepares transformed copies of the palette
//! windows. Nothing here writes to the process; callers hand the results to
//! [`crate::process::write_back`].

mod baseline;
mod collect;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::palette::{UNRECOGNIZED, VariantClassifier};
use crate::process::ReadMemory;
use crate::scheme::{ColorScheme, TransformEngine};

pub use baseline::BaselineCache;
pub use collect::{collect_regions, scan_all, scan_all_table};

/// A snapshot of process memory and the address it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    pub address: u64,
    pub data: Vec<u8>,
}

impl MemoryRegion {
    pub fn contains(&self, address: u64) -> bool {
        address >= self.address && address - self.address < self.data.len() as u64
    }
}

/// A signature match inside one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanHit {
    pub region_index: usize,
    pub offset: usize,
    pub address: u64,
}

/// A recognized palette and the bytes to write back for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub address: u64,
    /// Variant code reported by the classifier; never 0.
    pub code: u32,
    pub buffer_offset: usize,
    pub region_index: usize,
    pub scheme: ColorScheme,
    /// Baseline window the transform started from.
    pub original: Vec<u8>,
    /// Transformed window, same length as `original`.
    pub patched: Vec<u8>,
    pub modified_count: usize,
}

/// Outcome of one full scan pass.
#[derive(Debug, Clone, Default)]
pub struct ScanPass {
    pub regions_read: usize,
    pub hits: usize,
    pub results: Vec<ScanResult>,
}

#[derive(Debug, Clone)]
pub struct RegionScanner {
    classifier: VariantClassifier,
    engine: TransformEngine,
    probe_offsets: Vec<u64>,
    region_size: usize,
    search_limit: usize,
}

impl RegionScanner {
    pub fn new(
        classifier: VariantClassifier,
        engine: TransformEngine,
        probe_offsets: Vec<u64>,
        region_size: usize,
        search_limit: usize,
    ) -> Self {
        Self {
            classifier,
            engine,
            probe_offsets,
            region_size,
            search_limit,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            VariantClassifier::new(config.variants.clone()),
            TransformEngine::new(config.window_size, config.sentinel_set()),
            config.probe_offsets.clone(),
            config.region_size,
            config.search_limit,
        )
    }

    pub fn classifier(&self) -> &VariantClassifier {
        &self.classifier
    }

    /// Read every probe region relative to the reader's module base.
    pub fn collect<R: ReadMemory + ?Sized>(&self, reader: &R) -> Vec<MemoryRegion> {
        collect_regions(
            reader,
            reader.base_address(),
            &self.probe_offsets,
            self.region_size,
        )
    }

    /// Find every known variant signature in `regions`.
    pub fn scan(&self, regions: &[MemoryRegion]) -> Vec<ScanHit> {
        scan_all_table(regions, self.classifier.table(), self.search_limit)
    }

    /// Classify each hit and transform a local copy of its palette window.
    ///
    /// Unrecognized hits produce no result. Each result is computed from the
    /// region bytes as read, independently of every other hit.
    pub fn classify_and_transform(
        &self,
        regions: &[MemoryRegion],
        hits: &[ScanHit],
        scheme: ColorScheme,
    ) -> Vec<ScanResult> {
        hits.iter()
            .filter_map(|hit| {
                let region = regions.get(hit.region_index)?;
                let code = self.classifier.classify(&region.data, hit.offset);
                if code == UNRECOGNIZED {
                    return None;
                }
                let window = self.window(&region.data, hit.offset)?;
                Some(self.transform(*hit, code, window.to_vec(), scheme))
            })
            .collect()
    }

    /// Like [`classify_and_transform`](Self::classify_and_transform), but
    /// transforms from cached baselines.
    ///
    /// New recognized palettes are recorded in `cache`. Cached addresses that
    /// fall inside a region are revisited even when the live bytes no longer
    /// match a signature, so switching schemes restarts from the original
    /// colors instead of compounding transforms. A cached address whose live
    /// window is neither its baseline nor its last patch is evicted and only
    /// comes back if it classifies again.
    pub fn classify_and_transform_with_baseline(
        &self,
        regions: &[MemoryRegion],
        hits: &[ScanHit],
        scheme: ColorScheme,
        cache: &mut BaselineCache,
    ) -> Vec<ScanResult> {
        let mut targets: Vec<ScanHit> = hits.to_vec();
        for address in cache.addresses() {
            if let Some((region_index, region)) =
                regions.iter().enumerate().find(|(_, r)| r.contains(address))
            {
                targets.push(ScanHit {
                    region_index,
                    offset: (address - region.address) as usize,
                    address,
                });
            }
        }
        targets.sort_by_key(|h| (h.region_index, h.offset));
        targets.dedup();

        let mut results = Vec::new();
        for hit in targets {
            let Some(region) = regions.get(hit.region_index) else {
                continue;
            };
            let Some(live) = self.window(&region.data, hit.offset) else {
                continue;
            };

            if cache.contains(hit.address) && !cache.is_current(hit.address, live) {
                cache.evict(hit.address);
                debug!("Palette at {:#x} was replaced, no longer tracked", hit.address);
            }
            let baseline = match cache.get(hit.address) {
                Some(bytes) => bytes.to_vec(),
                None => {
                    if self.classifier.classify(&region.data, hit.offset) == UNRECOGNIZED {
                        continue;
                    }
                    cache.record(hit.address, live).to_vec()
                }
            };

            let code = self.classifier.classify(&baseline, 0);
            if code == UNRECOGNIZED {
                continue;
            }
            let result = self.transform(hit, code, baseline, scheme);
            cache.record_patch(hit.address, &result.patched);
            results.push(result);
        }
        results
    }

    /// Collect, scan, classify and transform in one pass.
    pub fn run_pass<R: ReadMemory + ?Sized>(
        &self,
        reader: &R,
        scheme: ColorScheme,
        cache: Option<&mut BaselineCache>,
    ) -> ScanPass {
        let regions = self.collect(reader);
        let hits = self.scan(&regions);
        let results = match cache {
            Some(cache) => self.classify_and_transform_with_baseline(&regions, &hits, scheme, cache),
            None => self.classify_and_transform(&regions, &hits, scheme),
        };

        info!(
            "Scan pass: {} regions, {} hits, {} palettes recognized",
            regions.len(),
            hits.len(),
            results.len()
        );
        ScanPass {
            regions_read: regions.len(),
            hits: hits.len(),
            results,
        }
    }

    fn window<'a>(&self, data: &'a [u8], offset: usize) -> Option<&'a [u8]> {
        if offset >= data.len() {
            return None;
        }
        let end = offset.saturating_add(self.engine.window_size()).min(data.len());
        Some(&data[offset..end])
    }

    fn transform(&self, hit: ScanHit, code: u32, original: Vec<u8>, scheme: ColorScheme) -> ScanResult {
        let mut patched = original.clone();
        let modified_count = self.engine.apply(&mut patched, 0, scheme);
        debug!(
            "Palette at {:#x} (code {}): {} entries changed by {}",
            hit.address, code, modified_count, scheme
        );
        ScanResult {
            address: hit.address,
            code,
            buffer_offset: hit.offset,
            region_index: hit.region_index,
            scheme,
            original,
            patched,
            modified_count,
        }
    }
}

impl Default for RegionScanner {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{MockMemoryBuilder, WriteMemory, write_back};

    const CH1: [u8; 3] = [0xA0, 0x60, 0x40];
    const CH3: [u8; 3] = [0x40, 0x30, 0x60];

    fn scanner() -> RegionScanner {
        RegionScanner::new(
            VariantClassifier::default(),
            TransformEngine::default(),
            vec![0, 0x100],
            0x100,
            288,
        )
    }

    #[test]
    fn test_region_contains() {
        let region = MemoryRegion {
            address: 0x1000,
            data: vec![0; 16],
        };
        assert!(region.contains(0x1000));
        assert!(region.contains(0x100F));
        assert!(!region.contains(0x1010));
        assert!(!region.contains(0x0FFF));
    }

    #[test]
    fn test_classify_and_transform_skips_unrecognized() {
        let regions = vec![MemoryRegion {
            address: 0x1000,
            data: vec![0x17, 0x2C, 0x4A, 0xA0, 0x60, 0x40],
        }];
        let hits = vec![
            ScanHit {
                region_index: 0,
                offset: 0,
                address: 0x1000,
            },
            ScanHit {
                region_index: 0,
                offset: 3,
                address: 0x1003,
            },
        ];

        let results = scanner().classify_and_transform(&regions, &hits, ColorScheme::Blue);
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.address, 0x1003);
        assert_eq!(result.code, 1);
        assert_eq!(result.buffer_offset, 3);
        assert_eq!(result.original, CH1.to_vec());
        // A0 60 40 -> F0 30 15
        assert_eq!(result.patched, vec![0xF0, 0x30, 0x15]);
        assert_eq!(result.modified_count, 1);
    }

    #[test]
    fn test_regions_untouched_by_transform() {
        let regions = vec![MemoryRegion {
            address: 0x1000,
            data: CH1.to_vec(),
        }];
        let hits = scanner().scan(&regions);
        scanner().classify_and_transform(&regions, &hits, ColorScheme::Red);
        assert_eq!(regions[0].data, CH1.to_vec());
    }

    #[test]
    fn test_hit_for_missing_region_ignored() {
        let hits = vec![ScanHit {
            region_index: 4,
            offset: 0,
            address: 0,
        }];
        assert!(scanner().classify_and_transform(&[], &hits, ColorScheme::Red).is_empty());
    }

    #[test]
    fn test_run_pass_is_deterministic() {
        let memory = MockMemoryBuilder::new()
            .with_size(0x200)
            .write_bytes(0x10, &CH1)
            .write_bytes(0x120, &CH3)
            .build();

        let scanner = scanner();
        let first = scanner.run_pass(&memory, ColorScheme::Purple, None);
        let second = scanner.run_pass(&memory, ColorScheme::Purple, None);

        assert_eq!(first.regions_read, 2);
        assert_eq!(first.results.len(), 2);
        assert_eq!(first.results, second.results);
        assert_eq!(first.results[0].address, 0x1010);
        assert_eq!(first.results[1].address, 0x1120);
        assert_eq!(first.results[1].code, 3);
    }

    #[test]
    fn test_baseline_survives_write_back() {
        let memory = MockMemoryBuilder::new()
            .with_size(0x200)
            .write_bytes(0x10, &CH1)
            .build();
        let scanner = scanner();
        let mut cache = BaselineCache::new();

        let red = scanner.run_pass(&memory, ColorScheme::Red, Some(&mut cache));
        assert_eq!(write_back(&memory, &red.results), 1);
        assert_ne!(memory.read_bytes(0x1010, 3).unwrap(), CH1.to_vec());

        // Live bytes no longer match a signature; the cache still finds them
        let blue = scanner.run_pass(&memory, ColorScheme::Blue, Some(&mut cache));
        assert_eq!(blue.hits, 0);
        assert_eq!(blue.results.len(), 1);
        assert_eq!(blue.results[0].original[..3], CH1);
        assert_eq!(blue.results[0].patched[..3], [0xF0, 0x30, 0x15]);

        // Restoring writes the baseline back
        let original = scanner.run_pass(&memory, ColorScheme::Original, Some(&mut cache));
        write_back(&memory, &original.results);
        assert_eq!(memory.read_bytes(0x1010, 3).unwrap(), CH1.to_vec());
    }

    #[test]
    fn test_reused_memory_not_overwritten() {
        let memory = MockMemoryBuilder::new()
            .with_size(0x200)
            .write_bytes(0x20, &CH1)
            .build();
        let scanner = scanner();
        let mut cache = BaselineCache::new();

        let red = scanner.run_pass(&memory, ColorScheme::Red, Some(&mut cache));
        assert_eq!(write_back(&memory, &red.results), 1);

        // Something else now lives at the palette address
        memory.write_bytes(0x1020, &[0x11; 96]).unwrap();
        let pass = scanner.run_pass(&memory, ColorScheme::Red, Some(&mut cache));
        assert_eq!(write_back(&memory, &pass.results), 0);

        assert!(pass.results.is_empty());
        assert!(cache.is_empty());
        assert_eq!(memory.read_bytes(0x1020, 96).unwrap(), vec![0x11; 96]);
    }

    #[test]
    fn test_new_palette_at_evicted_address_tracked_again() {
        let memory = MockMemoryBuilder::new()
            .with_size(0x200)
            .write_bytes(0x20, &CH1)
            .build();
        let scanner = scanner();
        let mut cache = BaselineCache::new();

        let red = scanner.run_pass(&memory, ColorScheme::Red, Some(&mut cache));
        write_back(&memory, &red.results);

        let mut replacement = vec![0u8; 96];
        replacement[..3].copy_from_slice(&CH3);
        memory.write_bytes(0x1020, &replacement).unwrap();

        let pass = scanner.run_pass(&memory, ColorScheme::Blue, Some(&mut cache));
        assert_eq!(pass.results.len(), 1);
        assert_eq!(pass.results[0].code, 3);
        assert_eq!(cache.get(0x1020), Some(replacement.as_slice()));
    }

    #[test]
    fn test_without_cache_rescan_misses_patched_palette() {
        let memory = MockMemoryBuilder::new()
            .with_size(0x200)
            .write_bytes(0x10, &CH1)
            .build();
        let scanner = scanner();

        let pass = scanner.run_pass(&memory, ColorScheme::Red, None);
        write_back(&memory, &pass.results);
        let again = scanner.run_pass(&memory, ColorScheme::Red, None);
        assert!(again.results.is_empty());
    }

    #[test]
    fn test_result_window_clamped_to_region() {
        let mut data = vec![0u8; 0x100];
        data[0xFD..].copy_from_slice(&CH1);
        let regions = vec![MemoryRegion {
            address: 0x1000,
            data,
        }];
        let scanner = RegionScanner::new(
            VariantClassifier::default(),
            TransformEngine::default(),
            vec![0],
            0x100,
            0x100,
        );
        let hits = scanner.scan(&regions);
        let results = scanner.classify_and_transform(&regions, &hits, ColorScheme::Blue);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].original.len(), 3);
        assert_eq!(results[0].patched.len(), 3);
    }

    #[test]
    fn test_mock_memory_is_writable_through_trait_object() {
        let memory = MockMemoryBuilder::new().with_size(4).build();
        let writer: &dyn WriteMemory = &memory;
        writer.write_bytes(0x1000, &[1]).unwrap();
        assert_eq!(memory.read_bytes(0x1000, 1).unwrap(), vec![1]);
    }
}
