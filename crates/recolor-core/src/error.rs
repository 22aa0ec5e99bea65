use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Archive too small: {len} bytes (need at least {required})")]
    ArchiveTooSmall { len: usize, required: usize },

    #[error("Entry index {index} out of range (entry count {count})")]
    EntryOutOfRange { index: usize, count: usize },

    #[error("Entry {index} payload out of bounds: offset={offset}, size={size}, archive={len}")]
    EntryOutOfBounds {
        index: usize,
        offset: u32,
        size: u32,
        len: usize,
    },

    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to open process: {0}")]
    ProcessOpenFailed(String),

    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Failed to write process memory at address {address:#x}: {message}")]
    MemoryWriteFailed { address: u64, message: String },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Unknown color scheme: {0}")]
    UnknownScheme(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
