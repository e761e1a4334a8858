//! `[site]` section: the static site metadata handed to pages.
//!
//! ```toml
//! [site]
//! title = "Dima's blog"
//! description = "Notes from a team lead"
//! url = "https://example.com"
//!
//! [site.author]
//! name = "Dima"
//! summary = "Software engineer, team lead, guitar on weekends."
//! avatar = "avatar.png"        # relative to [build] assets
//! ```
//!
//! `SiteMetadata` is a plain value passed to `Site`, `Layout` and `Bio`;
//! nothing reads it through a global.

mod nav;

pub use nav::{NavLink, default_nav};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    /// Public URL; its path part becomes `build.path_prefix`.
    pub url: Option<String>,
    pub language: String,
    /// Footer line; defaults to `© {author.name}`.
    pub copyright: Option<String>,
    pub author: AuthorInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorInfo {
    pub name: String,
    /// Short bio shown next to the avatar.
    pub summary: String,
    pub email: Option<String>,
    /// Avatar image, relative to the assets directory.
    pub avatar: Option<PathBuf>,
    pub avatar_alt: String,
}

impl Default for AuthorInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            summary: String::new(),
            email: None,
            avatar: None,
            avatar_alt: "Profile".into(),
        }
    }
}

impl SiteMetadata {
    pub fn copyright_line(&self) -> String {
        match &self.copyright {
            Some(line) => line.clone(),
            None if self.author.name.is_empty() => String::new(),
            None => format!("© {}", self.author.name),
        }
    }

    /// `assets_dir` is the normalized `[build] assets` path.
    pub fn validate(&self, assets_dir: &Path, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.warn("site.title", "site title is empty");
        }

        if self.author.summary.trim().is_empty() {
            diag.error_with_hint(
                "site.author.summary",
                "author summary is required",
                "add a one-line bio, e.g. summary = \"Software engineer\"",
            );
        }

        if self.author.avatar_alt.trim().is_empty() {
            diag.error(
                "site.author.avatar_alt",
                "avatar alt text must not be empty",
            );
        }

        if let Some(avatar) = &self.author.avatar
            && !assets_dir.join(avatar).is_file()
        {
            diag.error_with_hint(
                "site.author.avatar",
                format!("avatar `{}` not found", avatar.display()),
                format!("place the image under {}", assets_dir.display()),
            );
        }

        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            "site.url",
                            format!("scheme '{}' not supported", parsed.scheme()),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error("site.url", "URL must have a valid host");
                    }
                }
                Err(e) => diag.error_with_hint(
                    "site.url",
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                ),
            }
        }
    }
}
