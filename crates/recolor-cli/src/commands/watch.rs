//! Repeated scan-and-recolor passes until Ctrl+C.

use std::time::Duration;

use anyhow::Result;
use recolor_core::config::polling::MIN_INTERVAL_MS;
use recolor_core::{
    BaselineCache, ColorScheme, Config, MemoryReader, MemoryWriter, RegionScanner, write_back,
};
use tracing::{debug, info, warn};

use crate::commands::recolor::open_process;
use crate::shutdown::ShutdownSignal;

pub fn run(scheme: &str, pid: Option<u32>, interval_ms: u64, config: &Config) -> Result<()> {
    let scheme = ColorScheme::parse(scheme)?;
    let interval = if interval_ms < MIN_INTERVAL_MS {
        warn!("Interval {}ms too short, using {}ms", interval_ms, MIN_INTERVAL_MS);
        Duration::from_millis(MIN_INTERVAL_MS)
    } else {
        Duration::from_millis(interval_ms)
    };

    let shutdown = ShutdownSignal::install()?;
    let process = open_process(pid, config)?;
    println!(
        "Watching {} (PID: {}) with '{}'. Press Ctrl+C to stop.",
        config.process_name, process.pid, scheme
    );

    let reader = MemoryReader::new(&process);
    let writer = MemoryWriter::new(&process);
    let scanner = RegionScanner::from_config(config);
    let mut cache = BaselineCache::new();
    let mut passes = 0u64;

    while !shutdown.is_shutdown() {
        if !process.is_alive() {
            println!("Process exited");
            break;
        }

        let pass = scanner.run_pass(&reader, scheme, Some(&mut cache));
        let written = write_back(&writer, &pass.results);
        passes += 1;
        debug!(
            "Pass {}: {} palettes, {} written, {} baselines",
            passes,
            pass.results.len(),
            written,
            cache.len()
        );

        if shutdown.wait(interval) {
            break;
        }
    }

    info!("Watch stopped after {} passes", passes);
    println!("Stopped. {} palettes tracked.", cache.len());
    Ok(())
}
