//! Image sources as handed to the component.

use std::fmt;

use crate::asset::ResolvedImage;
use crate::utils::path::site_url;

use super::format::ImageFormat;

/// Where image bytes come from: a URL, or the bytes themselves as a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Url(String),
    /// Full `data:` URI, e.g. `data:image/png;base64,...`.
    Data(String),
}

impl Locator {
    pub fn as_str(&self) -> &str {
        match self {
            Locator::Url(s) | Locator::Data(s) => s,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Locator::Data(_))
    }

    /// Format from the data URI media type or the URL's extension.
    pub fn format(&self) -> Option<ImageFormat> {
        match self {
            Locator::Data(uri) => {
                let mime = uri
                    .strip_prefix("data:")?
                    .split([';', ','])
                    .next()?;
                ImageFormat::from_mime(mime)
            }
            Locator::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                let ext = path.rsplit_once('.')?.1;
                ImageFormat::from_extension(ext)
            }
        }
    }
}

impl From<&str> for Locator {
    fn from(s: &str) -> Self {
        Locator::from(s.to_string())
    }
}

impl From<String> for Locator {
    fn from(s: String) -> Self {
        if s.starts_with("data:") {
            Locator::Data(s)
        } else {
            Locator::Url(s)
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Url(url) => f.write_str(url),
            // data URIs are long; show the media type only
            Locator::Data(uri) => {
                let head = uri.split(',').next().unwrap_or("data:");
                write!(f, "{head},…")
            }
        }
    }
}

/// A modern-format variant and the format a probe is asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateSource {
    pub locator: Locator,
    pub format: ImageFormat,
}

/// One image as resolved at build time.
///
/// `primary` is always present; `alternate` and `preview` only add to it.
/// Built with the consuming builder methods and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    primary: Locator,
    alternate: Option<AlternateSource>,
    preview: Option<Locator>,
    alt_text: String,
    style_class: String,
    dimensions: Option<(u32, u32)>,
}

impl ImageAsset {
    pub fn new(primary: impl Into<Locator>, alt_text: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            alternate: None,
            preview: None,
            alt_text: alt_text.into(),
            style_class: String::new(),
            dimensions: None,
        }
    }

    /// Alternate source; its format is read from the locator and assumed
    /// to be WebP when the locator does not say.
    pub fn with_alternate(mut self, locator: impl Into<Locator>) -> Self {
        let locator = locator.into();
        let format = locator.format().unwrap_or(ImageFormat::WebP);
        self.alternate = Some(AlternateSource { locator, format });
        self
    }

    pub fn with_preview(mut self, locator: impl Into<Locator>) -> Self {
        self.preview = Some(locator.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.style_class = class.into();
        self
    }

    /// Intrinsic pixel size, emitted so the box is reserved before load.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    /// Locators for a pipeline result, served under `path_prefix`.
    pub fn from_resolved(
        resolved: &ResolvedImage,
        alt_text: impl Into<String>,
        path_prefix: &str,
    ) -> Self {
        let mut asset = Self::new(site_url(path_prefix, &resolved.original), alt_text);
        if let Some(webp) = &resolved.webp {
            asset = asset.with_alternate(site_url(path_prefix, webp));
        }
        if let Some(preview) = &resolved.preview {
            asset = asset.with_preview(preview.as_str());
        }
        if let Some((width, height)) = resolved.dimensions {
            asset = asset.with_dimensions(width, height);
        }
        asset
    }

    pub fn primary(&self) -> &Locator {
        &self.primary
    }

    pub fn alternate(&self) -> Option<&AlternateSource> {
        self.alternate.as_ref()
    }

    pub fn preview(&self) -> Option<&Locator> {
        self.preview.as_ref()
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    pub fn style_class(&self) -> &str {
        &self.style_class
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}
