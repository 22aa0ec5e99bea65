//! CLI command implementations.

pub mod config;
pub mod extract;
pub mod find;
pub mod full;
pub mod inspect;
pub mod list;
pub mod process;
pub mod recolor;
pub mod schemes;
pub mod watch;
