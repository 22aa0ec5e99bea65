//! One scan-and-recolor pass against the running game.

use anyhow::{Context, Result};
use recolor_core::{
    ColorScheme, Config, MemoryReader, MemoryWriter, ProcessHandle, RegionScanner, ScanPass,
    write_back,
};
use tracing::debug;

pub fn run(scheme: &str, pid: Option<u32>, dry_run: bool, config: &Config) -> Result<()> {
    let scheme = ColorScheme::parse(scheme)?;
    let process = open_process(pid, config)?;
    println!("Attached to {} (PID: {})", config.process_name, process.pid);

    let reader = MemoryReader::new(&process);
    let scanner = RegionScanner::from_config(config);
    let pass = scanner.run_pass(&reader, scheme, None);
    print_pass(&pass);

    if dry_run {
        println!("Dry run: nothing written");
        return Ok(());
    }

    let writer = MemoryWriter::new(&process);
    let written = write_back(&writer, &pass.results);
    println!(
        "Applied '{}' to {} of {} palettes",
        scheme,
        written,
        pass.results.len()
    );
    Ok(())
}

/// Open the game by PID, or look it up by the configured process name.
pub fn open_process(pid: Option<u32>, config: &Config) -> Result<ProcessHandle> {
    let process = match pid {
        Some(pid) => {
            ProcessHandle::open(pid).with_context(|| format!("Failed to open PID {}", pid))?
        }
        None => ProcessHandle::find_and_open(&config.process_name)
            .with_context(|| format!("Is {} running?", config.process_name))?,
    };
    debug!("Process base: {:#x}", process.base_address);
    Ok(process)
}

pub fn print_pass(pass: &ScanPass) {
    println!(
        "Regions read: {}, signature hits: {}, palettes: {}",
        pass.regions_read,
        pass.hits,
        pass.results.len()
    );
    for result in &pass.results {
        println!(
            "  {:#014x}  code {}  {} entries changed",
            result.address, result.code, result.modified_count
        );
    }
}
