//! Filesystem path and URL helpers.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Characters escaped when a relative file path becomes a URL path.
const URL_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'(')
    .add(b')')
    .add(b'\'');

/// Absolute form of `path`: canonicalized when it exists, otherwise joined
/// with the current directory.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Build a site URL from `prefix` (e.g. `blog`) and a relative output path.
///
/// ```ignore
/// assert_eq!(site_url("blog", Path::new("assets/a b.png")), "/blog/assets/a%20b.png");
/// ```
pub fn site_url(prefix: &str, rel: &Path) -> String {
    let mut url = String::from("/");
    let prefix = prefix.trim_matches('/');
    if !prefix.is_empty() {
        url.push_str(prefix);
        url.push('/');
    }
    let parts: Vec<String> = rel
        .iter()
        .filter_map(|c| c.to_str())
        .map(|c| utf8_percent_encode(c, URL_PATH).to_string())
        .collect();
    url.push_str(&parts.join("/"));
    url
}

pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// `true` if both files exist and `a` was modified after `b`.
pub fn is_newer_than(a: &Path, b: &Path) -> bool {
    let (Some(a_time), Some(b_time)) = (get_mtime(a), get_mtime(b)) else {
        return false;
    };
    a_time > b_time
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_relative() {
        assert!(normalize_path(Path::new("relative/file.txt")).is_absolute());
    }

    #[test]
    fn test_site_url_without_prefix() {
        assert_eq!(site_url("", Path::new("assets/avatar.png")), "/assets/avatar.png");
    }

    #[test]
    fn test_site_url_with_prefix_and_escaping() {
        assert_eq!(
            site_url("/blog/", Path::new("assets/my avatar (1).png")),
            "/blog/assets/my%20avatar%20%281%29.png"
        );
    }

    #[test]
    fn test_is_newer_than_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        std::fs::write(&a, "x").unwrap();
        assert!(!is_newer_than(&a, &dir.path().join("missing")));
    }
}
