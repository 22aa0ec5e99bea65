mod handle;
mod reader;
mod writer;

// In-memory process stand-in, available to unit and integration tests
#[doc(hidden)]
pub mod mock;

pub use handle::ProcessHandle;
pub use reader::{MemoryReader, ReadMemory};
pub use writer::{MemoryWriter, WriteMemory, write_back};

#[doc(hidden)]
pub use mock::{MockMemory, MockMemoryBuilder};
