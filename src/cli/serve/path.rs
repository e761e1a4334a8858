//! URL to filesystem path resolution.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Decoded path of a request URL: query and fragment removed.
pub fn request_path(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    percent_decode_str(path)
        .decode_utf8()
        .map(Cow::into_owned)
        .unwrap_or_default()
}

/// File under `serve_root` for `path`, with `index.html` for directories.
/// Paths escaping `serve_root` resolve to nothing.
pub fn resolve_path(path: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = path.trim_matches('/');
    if clean.split('/').any(|part| part == "..") {
        return None;
    }

    let canonical = serve_root.join(clean).canonicalize().ok()?;
    let root = serve_root.canonicalize().ok()?;
    if !canonical.starts_with(&root) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }
    let index = canonical.join("index.html");
    index.is_file().then_some(index)
}
