/// Offsets from the module base probed for the live palette copy.
///
/// The GPU-visible copy moves between sessions, so the table spans the
/// image itself, the heap ranges just above it, and the multi-gigabyte
/// mappings where the renderer keeps texture staging buffers.
pub const DEFAULT_PROBE_OFFSETS: &[u64] = &[
    // Module image
    0x0000_0000,
    0x0010_0000,
    0x0020_0000,
    0x0040_0000,
    0x0080_0000,
    // Cached palette data
    0x0100_0000,
    0x0200_0000,
    0x0400_0000,
    0x0800_0000,
    // Graphics heap
    0x1000_0000,
    0x1800_0000,
    0x2000_0000,
    0x2800_0000,
    0x3000_0000,
    0x4000_0000,
    0x5000_0000,
    0x6000_0000,
    0x7000_0000,
    0x8000_0000,
    // Staging buffers above 2 GiB
    0x9000_0000,
    0xA000_0000,
    0xC000_0000,
    0xE000_0000,
    0x1_0000_0000,
];
