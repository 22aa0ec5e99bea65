use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::archive::Archive;
use crate::discovery::discover_files;
use crate::error::Result;

/// Sprite naming convention: `*.spr` or `*_spr.bin`, any case.
pub fn is_sprite_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".spr") || lower.ends_with("_spr.bin")
}

pub fn is_sprite_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(is_sprite_name)
}

/// Every `*.pac` file under `archive_dir`, sorted.
pub fn discover_archives(archive_dir: &Path) -> Result<Vec<PathBuf>> {
    discover_files(archive_dir, "**/*.pac", |_| true)
}

/// Strip any directory components an entry name carries.
fn output_file_name(name: &str) -> Option<&str> {
    let last = name.rsplit(['/', '\\']).next()?;
    match last {
        "" | "." | ".." => None,
        other => Some(other),
    }
}

/// Write every entry whose name satisfies `predicate` to `output_dir/<name>`.
///
/// Entries that fail to extract or write are logged and skipped. Returns the
/// number of files written.
pub fn extract_all_matching<F>(archive: &Archive, predicate: F, output_dir: &Path) -> usize
where
    F: Fn(&str) -> bool,
{
    extract_entries(archive, predicate, output_dir).len()
}

/// Entry names actually written by this call, in table order.
///
/// An entry whose file name was already written by an earlier entry is
/// skipped so every returned name maps to its own file.
fn extract_entries<F>(archive: &Archive, predicate: F, output_dir: &Path) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let matching: Vec<_> = archive
        .entries()
        .iter()
        .filter(|e| predicate(&e.name))
        .collect();
    if matching.is_empty() {
        return Vec::new();
    }

    if let Err(e) = fs::create_dir_all(output_dir) {
        warn!("Failed to create {}: {}", output_dir.display(), e);
        return Vec::new();
    }

    let mut taken = HashSet::new();
    let mut written = Vec::new();
    for entry in matching {
        let Some(file_name) = output_file_name(&entry.name) else {
            warn!("Skipping entry {} with unusable name {:?}", entry.index, entry.name);
            continue;
        };
        if taken.contains(file_name) {
            warn!(
                "Skipping {}: {} already written from another entry",
                entry.name, file_name
            );
            continue;
        }
        let data = match archive.payload(entry.index) {
            Ok(data) => data,
            Err(e) => {
                warn!("Skipping {}: {}", entry.name, e);
                continue;
            }
        };
        let path = output_dir.join(file_name);
        match fs::write(&path, data) {
            Ok(()) => {
                debug!("Extracted {} ({} bytes)", path.display(), data.len());
                taken.insert(file_name);
                written.push(entry.name.clone());
            }
            Err(e) => warn!("Failed to write {}: {}", path.display(), e),
        }
    }
    written
}

/// Apply [`extract_all_matching`] to every archive under `archive_dir`.
///
/// Each archive's files land in `output_dir/<archive stem>/`. Unreadable or
/// malformed archives are skipped. Returns the total number of files written.
pub fn extract_all_matching_from_directory<F>(
    archive_dir: &Path,
    predicate: F,
    output_dir: &Path,
) -> usize
where
    F: Fn(&str) -> bool,
{
    let archives = match discover_archives(archive_dir) {
        Ok(archives) => archives,
        Err(e) => {
            warn!("Archive discovery failed in {}: {}", archive_dir.display(), e);
            return 0;
        }
    };

    let mut total = 0;
    for path in &archives {
        let archive = match Archive::load(path) {
            Ok(archive) => archive,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let count = extract_all_matching(&archive, &predicate, &output_dir.join(&stem));
        if count > 0 {
            info!("Extracted {} files from {}", count, path.display());
        }
        total += count;
    }

    info!(
        "Extracted {} files from {} archives",
        total,
        archives.len()
    );
    total
}

/// Extract sprite entries whose name contains `pattern` (any case) from
/// every archive under `archive_dir`, into `output_dir/<archive stem>/`.
///
/// Returns the names written.
pub fn find_and_extract(archive_dir: &Path, pattern: &str, output_dir: &Path) -> Vec<String> {
    let needle = pattern.to_ascii_lowercase();
    let archives = match discover_archives(archive_dir) {
        Ok(archives) => archives,
        Err(e) => {
            warn!("Archive discovery failed in {}: {}", archive_dir.display(), e);
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    for path in &archives {
        let archive = match Archive::load(path) {
            Ok(archive) => archive,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let dir = output_dir.join(&stem);
        let written = extract_entries(
            &archive,
            |name| is_sprite_name(name) && name.to_ascii_lowercase().contains(&needle),
            &dir,
        );
        if !written.is_empty() {
            debug!("{}: {} matches written", stem, written.len());
        }
        found.extend(written);
    }

    info!("Found {} sprites matching '{}'", found.len(), pattern);
    found
}
