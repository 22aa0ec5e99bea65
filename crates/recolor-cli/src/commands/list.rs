//! Archive listing.

use anyhow::Result;
use recolor_core::Archive;
use recolor_core::archive::is_sprite_name;

pub fn run(pac_file: &str, sprites_only: bool) -> Result<()> {
    let archive = Archive::load(pac_file)?;

    println!(
        "{}: {:?} layout, {} entries, {} bytes",
        pac_file,
        archive.layout(),
        archive.entry_count(),
        archive.len()
    );
    println!("{:>5}  {:>10}  {:>10}  name", "index", "offset", "size");

    let mut shown = 0;
    for entry in archive.entries() {
        if sprites_only && !is_sprite_name(&entry.name) {
            continue;
        }
        println!(
            "{:>5}  {:#010x}  {:>10}  {}",
            entry.index, entry.offset, entry.size, entry.name
        );
        shown += 1;
    }

    if sprites_only {
        println!("{} sprite entries", shown);
    }
    Ok(())
}
