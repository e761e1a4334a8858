//! Embedded static resources.
//!
//! - `template`: typed placeholder injection
//! - `asset`: embedded files with content-hashed names
//! - `runtime`: the stylesheet and script that drive `ResponsiveImage` markup
//!   in the browser
//!
//! ```ignore
//! use embed::runtime::write_runtime;
//!
//! let urls = write_runtime(&config)?;
//! // <link rel="stylesheet" href="{urls.css}"> <script defer src="{urls.js}">
//! ```

mod asset;
mod template;

pub use asset::{AssetKind, EmbeddedAsset};
pub use template::{Template, TemplateVars};

pub mod runtime {
    use std::io;
    use std::path::Path;

    use super::{AssetKind, EmbeddedAsset, TemplateVars};
    use crate::config::SiteConfig;
    use crate::image::component::{ATTR_FALLBACK, CLASS_LOADING, CLASS_WRAPPER};
    use crate::utils::path::site_url;

    /// Class and attribute names shared with the component markup.
    pub struct RuntimeVars;

    impl TemplateVars for RuntimeVars {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__FOLIO_WRAPPER__", CLASS_WRAPPER)
                .replace("__FOLIO_LOADING__", CLASS_LOADING)
                .replace("__FOLIO_FALLBACK__", ATTR_FALLBACK)
        }

        fn hash_input(&self) -> String {
            format!("{CLASS_WRAPPER}{CLASS_LOADING}{ATTR_FALLBACK}")
        }
    }

    pub const IMAGE_CSS: EmbeddedAsset<RuntimeVars> = EmbeddedAsset::new(
        AssetKind::Css,
        "folio-image",
        include_str!("runtime/folio-image.css"),
    );

    pub const IMAGE_JS: EmbeddedAsset<RuntimeVars> = EmbeddedAsset::new(
        AssetKind::JavaScript,
        "folio-image",
        include_str!("runtime/folio-image.js"),
    );

    /// Public URLs of the runtime files, for `<head>`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RuntimeUrls {
        pub css: String,
        pub js: String,
    }

    /// Write both files to `<output>/assets/`.
    pub fn write_runtime(config: &SiteConfig) -> io::Result<RuntimeUrls> {
        let dir = config.build.assets_output();
        let css = IMAGE_CSS.write_to(&dir, &RuntimeVars)?;
        let js = IMAGE_JS.write_to(&dir, &RuntimeVars)?;
        Ok(urls(&config.build.path_prefix, &css, &js))
    }

    fn urls(prefix: &str, css: &str, js: &str) -> RuntimeUrls {
        RuntimeUrls {
            css: site_url(prefix, &Path::new("assets").join(css)),
            js: site_url(prefix, &Path::new("assets").join(js)),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::config::test_config_at;

        #[test]
        fn test_placeholders_replaced() {
            for asset in [IMAGE_CSS, IMAGE_JS] {
                let rendered = asset.render(&RuntimeVars);
                assert!(!rendered.contains("__FOLIO_"));
                assert!(rendered.contains(CLASS_LOADING));
            }
            assert!(IMAGE_JS.render(&RuntimeVars).contains(ATTR_FALLBACK));
        }

        #[test]
        fn test_preview_cleared_after_fade() {
            let js = IMAGE_JS.render(&RuntimeVars);
            let reveal = js.split("function reveal").nth(1).unwrap();
            let reveal = reveal.split("function fallback").next().unwrap();

            assert!(!reveal.contains("backgroundImage"));
            assert!(reveal.contains("\"transitionend\""));
            assert!(reveal.contains("clearPreview(box)"));

            let css = IMAGE_CSS.render(&RuntimeVars);
            assert!(css.contains("transition: opacity"));
        }

        #[test]
        fn test_write_runtime() {
            let dir = tempfile::tempdir().unwrap();
            let config = test_config_at(dir.path(), "url = \"https://example.com/blog/\"");
            let urls = write_runtime(&config).unwrap();

            assert!(urls.css.starts_with("/blog/assets/folio-image-"));
            assert!(urls.css.ends_with(".css"));
            assert!(urls.js.ends_with(".js"));

            let name = urls.js.rsplit('/').next().unwrap();
            assert!(config.build.assets_output().join(name).is_file());
        }
    }
}
