//! Pages: routes, loaded content, and the `Site` that renders them.
//!
//! ```text
//! Content::load ──► image_sources ──► process_images ──► Site::new
//!                                                            │
//!                          Site::render(route, probe) ◄──────┘
//!                                 │
//!                     Layout( HomePage | AboutPage )
//! ```
//!
//! Pages receive `SiteMetadata` through `Site`; nothing is read globally.

mod about;
mod bio;
mod home;
mod layout;
pub mod markdown;

pub use about::AboutPage;
pub use bio::Bio;
pub use home::HomePage;
pub use layout::Layout;

use std::fs;
use std::path::{Path, PathBuf};

use crate::asset::ImageSet;
use crate::config::{NavLink, SiteConfig, SiteMetadata};
use crate::embed::runtime::RuntimeUrls;
use crate::image::{FormatSupportProbe, ImageAsset, InlineCache, ResponsiveImage};
use crate::log;
use crate::utils::html::Element;

use markdown::MarkdownOptions;

pub const ABOUT_FILE: &str = "about.md";
pub const INDEX_FILE: &str = "index.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Home, Route::About];

    /// Site-root URL path, before the path prefix.
    pub const fn url_path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about/",
        }
    }

    pub fn output_path(self, output: &Path) -> PathBuf {
        match self {
            Route::Home => output.join("index.html"),
            Route::About => output.join("about").join("index.html"),
        }
    }

    /// Match a request path (prefix already stripped).
    pub fn from_url(path: &str) -> Option<Self> {
        match path.trim_end_matches("index.html").trim_matches('/') {
            "" => Some(Route::Home),
            "about" => Some(Route::About),
            _ => None,
        }
    }

    pub const fn title(self) -> Option<&'static str> {
        match self {
            Route::Home => None,
            Route::About => Some("About"),
        }
    }
}

/// Markdown sources read from the content dir.
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub about: Option<String>,
    pub index: Option<String>,
}

impl Content {
    /// A missing `about.md` gives an empty About body and a warning;
    /// `index.md` is optional.
    pub fn load(content_dir: &Path) -> anyhow::Result<Self> {
        let about = read_optional(&content_dir.join(ABOUT_FILE))?;
        if about.is_none() {
            log!("warning"; "{} not found in {}, About page body is empty", ABOUT_FILE, content_dir.display());
        }
        let index = read_optional(&content_dir.join(INDEX_FILE))?;
        Ok(Self { about, index })
    }

    /// Asset-dir images referenced from the markdown bodies.
    pub fn image_sources(&self, assets_dir: &Path) -> Vec<PathBuf> {
        [&self.about, &self.index]
            .into_iter()
            .flatten()
            .flat_map(|body| markdown::image_refs(body))
            .filter_map(|dest| markdown::resolve_local(&dest, assets_dir))
            .collect()
    }
}

fn read_optional(path: &Path) -> anyhow::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::Error::new(e).context(format!("failed to read {}", path.display()))),
    }
}

/// Every image a build must resolve: the avatar and markdown images, each
/// listed once.
pub fn image_sources(config: &SiteConfig, content: &Content) -> Vec<PathBuf> {
    let assets = &config.build.assets;
    let mut sources: Vec<PathBuf> = config
        .site
        .author
        .avatar
        .iter()
        .map(|avatar| assets.join(avatar))
        .collect();
    sources.extend(content.image_sources(assets));
    sources.sort();
    sources.dedup();
    sources
}

/// What every page renders from. Built once per build.
#[derive(Debug)]
pub struct Site {
    pub meta: SiteMetadata,
    pub nav: Vec<NavLink>,
    pub path_prefix: String,
    pub runtime: RuntimeUrls,
    assets_dir: PathBuf,
    content: Content,
    images: ImageSet,
    markdown: MarkdownOptions,
}

impl Site {
    pub fn new(config: &SiteConfig, content: Content, images: ImageSet, runtime: RuntimeUrls) -> Self {
        Self {
            meta: config.site.clone(),
            nav: config.nav.clone(),
            path_prefix: config.build.path_prefix.clone(),
            runtime,
            assets_dir: config.build.assets.clone(),
            content,
            images,
            markdown: MarkdownOptions::default(),
        }
    }

    /// Full HTML document for `route`.
    pub fn render(&self, route: Route, probe: &dyn FormatSupportProbe) -> String {
        let main = match route {
            Route::Home => HomePage::new(self, probe).render(),
            Route::About => AboutPage::new(self, probe).render(),
        };
        Layout::new(self, route).render(main)
    }

    /// The configured avatar as an `ImageAsset`, if it was resolved.
    pub fn avatar(&self, class: &str) -> Option<ImageAsset> {
        let avatar = self.meta.author.avatar.as_ref()?;
        let resolved = self.images.get(&self.assets_dir.join(avatar))?;
        Some(
            ImageAsset::from_resolved(resolved, &self.meta.author.avatar_alt, &self.path_prefix)
                .with_class(class),
        )
    }

    /// Mount `asset` in the page being rendered and return its markup.
    ///
    /// Inline sources are loaded on mount and render as a plain `<img>`;
    /// everything else renders in `Loading` and the browser runtime takes over.
    pub fn image(&self, asset: ImageAsset, probe: &dyn FormatSupportProbe) -> Element {
        let mut image = ResponsiveImage::new(asset, probe);
        if let Some(fetch) = image.mount(&InlineCache) {
            crate::debug!("page"; "fetch {}", fetch.locator);
        }
        image.render()
    }

    /// A markdown body with local and inline images as `ResponsiveImage`.
    pub fn markdown_body(&self, markdown: &str, probe: &dyn FormatSupportProbe) -> String {
        markdown::render(markdown, &self.markdown, |dest, alt| {
            let asset = match markdown::resolve_local(dest, &self.assets_dir) {
                Some(source) => {
                    let resolved = self.images.get(&source)?;
                    ImageAsset::from_resolved(resolved, alt, &self.path_prefix)
                }
                None if dest.starts_with("data:") => ImageAsset::new(dest, alt),
                None => return None,
            };
            Some(self.image(asset, probe).render())
        })
    }

    pub fn content(&self) -> &Content {
        &self.content
    }
}

/// A page's `<main>` children.
pub trait Page {
    fn render(&self) -> Vec<Element>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::asset::{PreviewCache, process_images};
    use crate::config::test_config_at;
    use image::{DynamicImage, Rgb, RgbImage};

    pub fn runtime() -> RuntimeUrls {
        RuntimeUrls {
            css: "/assets/folio-image.css".into(),
            js: "/assets/folio-image.js".into(),
        }
    }

    /// A site with an avatar (`avatar.png`, 32x32) and the given markdown.
    pub fn site_with(dir: &Path, about: Option<&str>, index: Option<&str>) -> Site {
        let mut config = test_config_at(dir, "");
        config.site.author.name = "Dima".into();
        config.site.author.avatar = Some("avatar.png".into());

        let avatar = config.build.assets.join("avatar.png");
        fs::create_dir_all(&config.build.assets).unwrap();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([10, 20, 30])))
            .save(&avatar)
            .unwrap();

        let content = Content {
            about: about.map(str::to_string),
            index: index.map(str::to_string),
        };
        let cache = PreviewCache::load(&config.cache_dir());
        let images = process_images(&image_sources(&config, &content), &config, &cache, None).unwrap();
        Site::new(&config, content, images, runtime())
    }
}
