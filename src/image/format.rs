//! Image formats and capability probes.
//!
//! The component never guesses whether the environment can decode a format.
//! It asks a [`FormatSupportProbe`] that the hosting environment provides:
//!
//! | Probe          | Environment                 | Answer for WebP                 |
//! |----------------|-----------------------------|---------------------------------|
//! | `StaticProbe`  | tests, fixed capabilities   | from its format list            |
//! | `AcceptProbe`  | dev server, per request     | from the `Accept` header        |
//! | `PictureProbe` | static HTML output          | `Negotiated` (browser decides)  |

use std::fmt;

use crate::utils::mime::types;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Avif,
}

impl ImageFormat {
    pub const fn mime(self) -> &'static str {
        match self {
            ImageFormat::Png => types::PNG,
            ImageFormat::Jpeg => types::JPEG,
            ImageFormat::Gif => types::GIF,
            ImageFormat::WebP => types::WEBP,
            ImageFormat::Avif => types::AVIF,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::WebP => "webp",
            ImageFormat::Avif => "avif",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "avif" => Some(ImageFormat::Avif),
            _ => None,
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/gif" => Some(ImageFormat::Gif),
            "image/webp" => Some(ImageFormat::WebP),
            "image/avif" => Some(ImageFormat::Avif),
            _ => None,
        }
    }

    /// Formats every browser decodes; never negotiated.
    pub const fn is_baseline(self) -> bool {
        matches!(self, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A probe's answer for one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSupport {
    Supported,
    Unsupported,
    /// The environment decides at fetch time; offer both and let it pick.
    Negotiated,
}

/// Declares which image formats the rendering environment can display.
pub trait FormatSupportProbe {
    fn support(&self, format: ImageFormat) -> FormatSupport;
}

/// Fixed capability list. Baseline formats are always supported.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    formats: Vec<ImageFormat>,
}

impl StaticProbe {
    pub fn new(formats: impl IntoIterator<Item = ImageFormat>) -> Self {
        Self {
            formats: formats.into_iter().collect(),
        }
    }

    /// Only baseline formats.
    pub fn baseline() -> Self {
        Self::default()
    }
}

impl FormatSupportProbe for StaticProbe {
    fn support(&self, format: ImageFormat) -> FormatSupport {
        if format.is_baseline() || self.formats.contains(&format) {
            FormatSupport::Supported
        } else {
            FormatSupport::Unsupported
        }
    }
}

/// Capabilities declared by an HTTP client in its `Accept` header.
///
/// Only explicit media types count: browsers send `*/*` and `image/*` for
/// everything, so a wildcard says nothing about modern formats. An explicit
/// `q=0` declines the type.
///
/// Page requests often list no image type at all (Safari sends
/// `text/html,...,*/*;q=0.8` and still decodes WebP). Such a header says
/// nothing either way, so modern formats are left to `<picture>`.
#[derive(Debug, Clone, Default)]
pub struct AcceptProbe {
    accepted: Vec<ImageFormat>,
    names_images: bool,
}

impl AcceptProbe {
    pub fn from_header(header: &str) -> Self {
        let mut names_images = false;
        let accepted = header
            .split(',')
            .filter_map(|range| {
                let mut parts = range.split(';');
                let media = parts.next()?.trim();
                if media.starts_with("image/") && media != "image/*" {
                    names_images = true;
                }
                let format = ImageFormat::from_mime(media)?;
                let quality = parts
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (quality > 0.0).then_some(format)
            })
            .collect();
        Self {
            accepted,
            names_images,
        }
    }
}

impl FormatSupportProbe for AcceptProbe {
    fn support(&self, format: ImageFormat) -> FormatSupport {
        if format.is_baseline() || self.accepted.contains(&format) {
            FormatSupport::Supported
        } else if self.names_images {
            FormatSupport::Unsupported
        } else {
            FormatSupport::Negotiated
        }
    }
}

/// Defers modern formats to the browser through `<picture><source type>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PictureProbe;

impl FormatSupportProbe for PictureProbe {
    fn support(&self, format: ImageFormat) -> FormatSupport {
        if format.is_baseline() {
            FormatSupport::Supported
        } else {
            FormatSupport::Negotiated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_IMG_ACCEPT: &str = "image/avif,image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8";
    const OLD_SAFARI_ACCEPT: &str = "image/png,image/svg+xml,image/*;q=0.8,video/*;q=0.8,*/*;q=0.5";
    const SAFARI_PAGE_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

    #[test]
    fn test_format_lookup() {
        assert_eq!(ImageFormat::from_extension("JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_mime(" image/webp "), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_mime("image/svg+xml"), None);
        assert_eq!(ImageFormat::WebP.mime(), "image/webp");
        assert!(ImageFormat::Png.is_baseline());
        assert!(!ImageFormat::Avif.is_baseline());
    }

    #[test]
    fn test_static_probe() {
        let probe = StaticProbe::new([ImageFormat::WebP]);
        assert_eq!(probe.support(ImageFormat::WebP), FormatSupport::Supported);
        assert_eq!(probe.support(ImageFormat::Avif), FormatSupport::Unsupported);
        assert_eq!(
            StaticProbe::baseline().support(ImageFormat::Png),
            FormatSupport::Supported
        );
    }

    #[test]
    fn test_accept_probe_modern_browser() {
        let probe = AcceptProbe::from_header(CHROME_IMG_ACCEPT);
        assert_eq!(probe.support(ImageFormat::WebP), FormatSupport::Supported);
        assert_eq!(probe.support(ImageFormat::Avif), FormatSupport::Supported);
    }

    #[test]
    fn test_accept_probe_wildcards_do_not_count() {
        let probe = AcceptProbe::from_header(OLD_SAFARI_ACCEPT);
        assert_eq!(probe.support(ImageFormat::WebP), FormatSupport::Unsupported);
        assert_eq!(probe.support(ImageFormat::Jpeg), FormatSupport::Supported);
    }

    #[test]
    fn test_accept_probe_zero_quality_declines() {
        let probe = AcceptProbe::from_header("image/webp;q=0, text/html");
        assert_eq!(probe.support(ImageFormat::WebP), FormatSupport::Unsupported);

        let probe = AcceptProbe::from_header("text/html, image/webp; q=0.9");
        assert_eq!(probe.support(ImageFormat::WebP), FormatSupport::Supported);
    }

    #[test]
    fn test_accept_probe_without_image_types_negotiates() {
        for header in ["", SAFARI_PAGE_ACCEPT] {
            let probe = AcceptProbe::from_header(header);
            assert_eq!(probe.support(ImageFormat::WebP), FormatSupport::Negotiated);
            assert_eq!(probe.support(ImageFormat::Png), FormatSupport::Supported);
        }
    }

    #[test]
    fn test_picture_probe_negotiates_modern_only() {
        assert_eq!(PictureProbe.support(ImageFormat::WebP), FormatSupport::Negotiated);
        assert_eq!(PictureProbe.support(ImageFormat::Jpeg), FormatSupport::Supported);
    }
}
