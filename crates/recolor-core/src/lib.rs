pub mod archive;
pub mod config;
pub mod discovery;
pub mod error;
pub mod inspect;
pub mod palette;
pub mod process;
pub mod scanner;
pub mod scheme;
pub mod variant;

pub use archive::{Archive, ArchiveLayout, Entry};
pub use config::Config;
pub use error::{Error, Result};
pub use inspect::PaletteReport;
pub use palette::{Bgr, PaletteSignature, SignatureTable, VariantClassifier, VariantSignature};
pub use process::{MemoryReader, MemoryWriter, ProcessHandle, ReadMemory, WriteMemory, write_back};
pub use scanner::{BaselineCache, MemoryRegion, RegionScanner, ScanHit, ScanPass, ScanResult};
pub use scheme::{ColorScheme, SentinelSet, TransformEngine};
pub use variant::VariantGenerator;
