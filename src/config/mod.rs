//! Site configuration loaded from `folio.toml`.
//!
//! | Section           | Purpose                                        |
//! |-------------------|------------------------------------------------|
//! | `[site]`          | Title, description, url, author (`SiteMetadata`)|
//! | `[[nav]]`         | Header navigation links                        |
//! | `[build]`         | Content, assets and output paths               |
//! | `[build.images]`  | WebP alternate and preview generation          |
//! | `[serve]`         | Development server address                     |
//!
//! CLI flags override file values; relative paths are resolved against the
//! directory holding the config file.

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use section::{
    AuthorInfo, BuildConfig, ImageConfig, NavLink, ServeConfig, SiteMetadata, default_nav,
};

use util::{extract_url_path, find_config_file};

use crate::cli::{BuildArgs, Cli, Commands};
use crate::log;
use crate::utils::path::normalize_path;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing `folio.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path of the config file
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root, parent of the config file
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteMetadata,

    #[serde(default = "default_nav")]
    pub nav: Vec<NavLink>,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            site: SiteMetadata::default(),
            nav: default_nav(),
            build: BuildConfig::default(),
            serve: ServeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Find, parse, finalize and validate the config for `cli`.
    pub fn load(cli: &Cli) -> Result<Self> {
        let Some(config_path) = find_config_file(&cli.config) else {
            bail!(ConfigError::Validation(format!(
                "config file `{}` not found in this directory or any parent",
                cli.config.display()
            )));
        };

        let mut config = Self::from_path(&config_path)?;

        // absolute paths must be caught before they are joined with the root
        let mut diag = ConfigDiagnostics::new();
        config.build.validate_paths(&mut diag);
        diag.into_result().map_err(ConfigError::Diagnostics)?;

        config.config_path = normalize_path(&config_path);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Read a config file and warn about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            log!("warning"; "unknown fields in {} are ignored: {}", name, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting the paths of unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Resolve paths and apply CLI overrides.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.root = normalize_path(&root);

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.apply_build_args(cli.build_args());

        if let Commands::Serve {
            interface, port, ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }

        self.normalize_paths();
        self.sync_path_prefix_from_url();

        // local preview is served from `/`
        if cli.is_serve() {
            self.build.path_prefix.clear();
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);
        self.build.clean = args.clean;
        if let Some(url) = &args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    fn normalize_paths(&mut self) {
        let root = self.root.clone();
        self.build.content = normalize_path(&root.join(&self.build.content));
        self.build.assets = normalize_path(&root.join(&self.build.assets));
        self.build.output = normalize_path(&root.join(&self.build.output));
    }

    fn sync_path_prefix_from_url(&mut self) {
        if let Some(url) = &self.site.url
            && let Some(path) = extract_url_path(url)
        {
            self.build.path_prefix = path;
        }
    }

    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate every section and report all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&self.build.assets, &mut diag);
        self.build.validate(&self.root, &mut diag);
        for link in &self.nav {
            if link.title.trim().is_empty() || link.href.trim().is_empty() {
                diag.error("nav", "navigation entries need both title and href");
            }
        }

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Path relative to the project root, for log output.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Hidden directory for build caches.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(".folio")
    }
}

/// Parse a config with a minimal `[site]` table.
/// Panics on unknown fields so typos in tests are caught.
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// A finalized config rooted at `root`, without going through the CLI.
#[cfg(test)]
pub fn test_config_at(root: &Path, extra: &str) -> SiteConfig {
    let mut config = test_parse_config(extra);
    config.config_path = root.join("folio.toml");
    config.root = root.to_path_buf();
    config.site.author.summary = "I write code.".into();
    config.normalize_paths();
    config.sync_path_prefix_from_url();
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_invalid_toml() {
        assert!(SiteConfig::parse_with_ignored("[site\ntitle = \"x\"").is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert_eq!(config.site.title, "");
        assert_eq!(config.site.author.avatar_alt, "Profile");
        assert_eq!(config.serve.port, 5277);
        assert_eq!(config.nav.len(), 2);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_path_prefix_from_url() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config_at(dir.path(), "url = \"https://example.github.io/blog/\"");
        assert_eq!(config.build.path_prefix, "blog");
        assert!(config.build.output.ends_with("public"));
        assert!(config.build.output.is_absolute());
    }

    #[test]
    fn test_validate_collects_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config_at(dir.path(), "");
        config.site.author.summary.clear();
        config.build.images.preview_width = 1;
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        assert_eq!(diag.errors().len(), 2);
    }

    #[test]
    fn test_root_relative() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config_at(dir.path(), "");
        let rel = config.root_relative(dir.path().join("content/about.md"));
        assert_eq!(rel, PathBuf::from("content/about.md"));
    }
}
