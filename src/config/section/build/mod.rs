//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! content = "content"          # about.md, index.md
//! assets = "content/assets"    # images and static files
//! output = "public"
//!
//! [build.images]
//! webp = true
//! preview = true
//! preview_width = 20
//! preview_blur = 1.5
//! ```

mod images;

pub use images::ImageConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub content: PathBuf,
    pub assets: PathBuf,
    pub output: PathBuf,

    /// Remove output and preview cache before building (CLI `--clean`).
    #[serde(skip)]
    pub clean: bool,

    /// URL prefix derived from `site.url` (e.g. `blog`), without slashes.
    #[serde(skip)]
    pub path_prefix: String,

    pub images: ImageConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            assets: "content/assets".into(),
            output: "public".into(),
            clean: false,
            path_prefix: String::new(),
            images: ImageConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Directory for generated assets inside the output dir.
    pub fn assets_output(&self) -> PathBuf {
        self.output.join("assets")
    }

    /// Reject absolute paths before they are joined with the root.
    pub fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        let fields = [
            ("build.content", &self.content),
            ("build.assets", &self.assets),
            ("build.output", &self.output),
        ];
        for (field, path) in fields {
            if path.is_absolute() {
                diag.error_with_hint(
                    field,
                    format!("`{}` must be relative to the project root", path.display()),
                    "remove the leading slash",
                );
            }
        }
    }

    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if self.output == root {
            diag.error("build.output", "output directory must not be the project root");
        }
        if self.content.starts_with(&self.output) || self.assets.starts_with(&self.output) {
            diag.error(
                "build.output",
                "output directory must not contain content or assets",
            );
        }
        if !self.content.is_dir() {
            diag.warn("build.content", format!("`{}` does not exist", self.content.display()));
        }
        self.images.validate(diag);
    }
}
