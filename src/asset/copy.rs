//! Verbatim copy of the assets directory into `<output>/assets/`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::WalkDir;
use rustc_hash::FxHashSet;

use crate::log;
use crate::utils::path::is_newer_than;
use crate::utils::plural_count;

const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// All regular files under `dir`, skipping OS metadata files.
pub fn collect_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .collect()
}

/// Copy every file under `src_dir` to the same relative path in `dest_dir`,
/// except `skip` (images that went through the pipeline).
///
/// A destination newer than its source is left alone unless `clean` is set.
/// Returns the number of files written.
pub fn copy_static_assets(
    src_dir: &Path,
    dest_dir: &Path,
    skip: &FxHashSet<PathBuf>,
    clean: bool,
) -> Result<usize> {
    let mut count = 0;
    for source in collect_files(src_dir) {
        if skip.contains(&source) {
            continue;
        }
        let Ok(rel) = source.strip_prefix(src_dir) else {
            continue;
        };
        let dest = dest_dir.join(rel);

        if !clean && dest.exists() && !is_newer_than(&source, &dest) {
            continue;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&source, &dest)
            .with_context(|| format!("failed to copy {}", source.display()))?;
        crate::debug!("assets"; "{}", rel.display());
        count += 1;
    }

    if count > 0 {
        log!("assets"; "copied {}", plural_count(count, "static file"));
    }
    Ok(count)
}
