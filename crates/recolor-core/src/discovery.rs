//! Recursive file discovery for archive and sprite batches.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern, glob_with};
use tracing::warn;

use crate::error::{Error, Result};

/// Find files under `base_dir` matching a glob `pattern` and `filter`.
///
/// Matching ignores case so `*.pac` also finds `*.PAC`. Results are sorted,
/// which keeps batch output order stable between runs.
pub fn discover_files<F>(base_dir: &Path, pattern: &str, filter: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let base = Pattern::escape(&base_dir.to_string_lossy());
    let full_pattern = format!("{}/{}", base.trim_end_matches(['/', '\\']), pattern);

    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };
    let paths = glob_with(&full_pattern, options)
        .map_err(|e| Error::InvalidPattern(format!("'{}': {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() && filter(&path) {
                    files.push(path);
                }
            }
            Err(e) => {
                warn!("Error reading path during discovery: {}", e);
            }
        }
    }

    files.sort();
    Ok(files)
}
