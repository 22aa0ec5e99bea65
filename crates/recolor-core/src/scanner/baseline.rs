use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Tracked {
    baseline: Vec<u8>,
    last_patch: Option<Vec<u8>>,
}

/// First-seen original palette bytes, keyed by process address.
///
/// A palette that has been written back no longer matches any variant
/// signature, so later passes transform from the cached bytes instead of
/// the live ones. Each entry also remembers the last window produced for
/// it; live bytes matching neither mean the memory was reused.
#[derive(Debug, Clone, Default)]
pub struct BaselineCache {
    entries: BTreeMap<u64, Tracked>,
}

impl BaselineCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, address: u64) -> Option<&[u8]> {
        self.entries.get(&address).map(|t| t.baseline.as_slice())
    }

    /// Remember `bytes` for `address` unless a baseline is already stored.
    pub fn record(&mut self, address: u64, bytes: &[u8]) -> &[u8] {
        &self
            .entries
            .entry(address)
            .or_insert_with(|| Tracked {
                baseline: bytes.to_vec(),
                last_patch: None,
            })
            .baseline
    }

    /// Remember the window last prepared for `address`.
    ///
    /// Ignored for addresses without a baseline.
    pub fn record_patch(&mut self, address: u64, patched: &[u8]) {
        if let Some(tracked) = self.entries.get_mut(&address) {
            tracked.last_patch = Some(patched.to_vec());
        }
    }

    pub fn last_patch(&self, address: u64) -> Option<&[u8]> {
        self.entries
            .get(&address)
            .and_then(|t| t.last_patch.as_deref())
    }

    /// Whether `live` is still the palette tracked at `address`: either the
    /// untouched baseline or the last patch prepared for it.
    pub fn is_current(&self, address: u64, live: &[u8]) -> bool {
        self.entries.get(&address).is_some_and(|t| {
            t.baseline == live || t.last_patch.as_deref() == Some(live)
        })
    }

    /// Drop `address`. Returns whether it was tracked.
    pub fn evict(&mut self, address: u64) -> bool {
        self.entries.remove(&address).is_some()
    }

    pub fn contains(&self, address: u64) -> bool {
        self.entries.contains_key(&address)
    }

    /// Cached addresses in ascending order.
    pub fn addresses(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_record_wins() {
        let mut cache = BaselineCache::new();
        assert_eq!(cache.record(0x1000, &[1, 2, 3]), &[1, 2, 3]);
        assert_eq!(cache.record(0x1000, &[9, 9, 9]), &[1, 2, 3]);
        assert_eq!(cache.get(0x1000), Some(&[1u8, 2, 3][..]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_addresses_sorted() {
        let mut cache = BaselineCache::new();
        cache.record(0x3000, &[0]);
        cache.record(0x1000, &[0]);
        cache.record(0x2000, &[0]);
        assert_eq!(cache.addresses().collect::<Vec<_>>(), vec![0x1000, 0x2000, 0x3000]);
    }

    #[test]
    fn test_is_current_accepts_baseline_or_last_patch() {
        let mut cache = BaselineCache::new();
        cache.record(0x1000, &[1, 2, 3]);
        assert!(cache.is_current(0x1000, &[1, 2, 3]));
        assert!(!cache.is_current(0x1000, &[4, 5, 6]));

        cache.record_patch(0x1000, &[4, 5, 6]);
        assert_eq!(cache.last_patch(0x1000), Some(&[4u8, 5, 6][..]));
        assert!(cache.is_current(0x1000, &[4, 5, 6]));
        assert!(cache.is_current(0x1000, &[1, 2, 3]));
        assert!(!cache.is_current(0x1000, &[0x11, 0x11, 0x11]));
        assert!(!cache.is_current(0x2000, &[1, 2, 3]));
    }

    #[test]
    fn test_patch_without_baseline_ignored() {
        let mut cache = BaselineCache::new();
        cache.record_patch(0x1000, &[1]);
        assert!(cache.is_empty());
        assert_eq!(cache.last_patch(0x1000), None);
    }

    #[test]
    fn test_evict_and_clear() {
        let mut cache = BaselineCache::new();
        cache.record(0x1000, &[0]);
        cache.record(0x2000, &[0]);
        assert!(cache.evict(0x1000));
        assert!(!cache.evict(0x1000));
        assert!(!cache.contains(0x1000));
        cache.clear();
        assert!(cache.is_empty());
    }
}
