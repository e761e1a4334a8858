//! `ResponsiveImage`: progressive loading with format negotiation.
//!
//! Two states, one way: `Loading` (preview or nothing visible) becomes
//! `Loaded` (final image visible) on the load-completion signal.
//!
//! Load failures never escalate. A failed non-primary source switches to the
//! primary source once; a failed primary keeps the preview. No source is
//! requested twice.

use crate::utils::html::Element;

use super::asset::{ImageAsset, Locator};
use super::format::{FormatSupport, FormatSupportProbe};

/// Wrapper class carrying the preview while loading.
pub const CLASS_WRAPPER: &str = "folio-image";
pub const CLASS_LOADING: &str = "folio-image--loading";
/// Attribute holding the primary source when something else is requested.
pub const ATTR_FALLBACK: &str = "data-fallback";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
}

/// Which source the component asks the environment for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChoice {
    Primary,
    Alternate,
    /// Both offered; the environment picks while fetching.
    Negotiated,
}

/// A fetch the hosting environment should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub locator: Locator,
}

/// Resources the environment already holds.
pub trait ResourceCache {
    fn contains(&self, locator: &Locator) -> bool;
}

/// An environment that has nothing cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResourceCache for NoCache {
    fn contains(&self, _locator: &Locator) -> bool {
        false
    }
}

/// A rendered document: `data:` sources travel inside it, so they are
/// already held and need no fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineCache;

impl ResourceCache for InlineCache {
    fn contains(&self, locator: &Locator) -> bool {
        locator.is_inline()
    }
}

#[derive(Debug, Clone)]
pub struct ResponsiveImage {
    asset: ImageAsset,
    choice: SourceChoice,
    state: LoadState,
    mounted: bool,
}

impl ResponsiveImage {
    /// Select the source for this render. The probe makes the decision.
    pub fn new(asset: ImageAsset, probe: &dyn FormatSupportProbe) -> Self {
        let choice = match asset.alternate() {
            None => SourceChoice::Primary,
            Some(alternate) => match probe.support(alternate.format) {
                FormatSupport::Supported => SourceChoice::Alternate,
                FormatSupport::Unsupported => SourceChoice::Primary,
                FormatSupport::Negotiated => SourceChoice::Negotiated,
            },
        };

        Self {
            asset,
            choice,
            state: LoadState::Loading,
            mounted: false,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn choice(&self) -> SourceChoice {
        self.choice
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The locator placed in `<img src>`.
    ///
    /// For `Negotiated` this is the primary source, which the `<img>` inside
    /// `<picture>` falls back to.
    pub fn src(&self) -> &Locator {
        match (self.choice, self.asset.alternate()) {
            (SourceChoice::Alternate, Some(alternate)) => &alternate.locator,
            _ => self.asset.primary(),
        }
    }

    /// Whether the preview is visible right now.
    pub fn shows_preview(&self) -> bool {
        self.state == LoadState::Loading && self.asset.preview().is_some()
    }

    /// Attach to the environment. Returns the fetch to start, or `None` when
    /// the source is already cached, in which case the image is loaded at once.
    pub fn mount(&mut self, cache: &dyn ResourceCache) -> Option<FetchRequest> {
        self.mounted = true;
        if self.state == LoadState::Loaded {
            return None;
        }
        if cache.contains(self.src()) {
            self.state = LoadState::Loaded;
            return None;
        }
        Some(FetchRequest {
            locator: self.src().clone(),
        })
    }

    /// Late events for a removed component are ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Load completed. Returns `true` if the state changed.
    pub fn on_load(&mut self) -> bool {
        if !self.mounted || self.state == LoadState::Loaded {
            return false;
        }
        self.state = LoadState::Loaded;
        true
    }

    /// Load failed. Returns the fallback fetch if there is one left.
    pub fn on_error(&mut self) -> Option<FetchRequest> {
        if !self.mounted || self.state == LoadState::Loaded {
            return None;
        }
        match self.choice {
            SourceChoice::Alternate | SourceChoice::Negotiated => {
                self.choice = SourceChoice::Primary;
                Some(FetchRequest {
                    locator: self.asset.primary().clone(),
                })
            }
            // primary failed: keep whatever preview is showing
            SourceChoice::Primary => None,
        }
    }

    /// Markup for the current state.
    pub fn render(&self) -> Element {
        let img = self.render_img();
        let image = match (self.choice, self.asset.alternate()) {
            (SourceChoice::Negotiated, Some(alternate)) => Element::new("picture")
                .child(
                    Element::new("source")
                        .attr("srcset", alternate.locator.as_str())
                        .attr("type", alternate.format.mime()),
                )
                .child(img),
            _ => img,
        };

        // without a visible preview the style class sits on <img>, even inside <picture>
        let Some(preview) = self.asset.preview().filter(|_| self.shows_preview()) else {
            return image;
        };

        let mut style = format!("background-image:url('{}')", preview.as_str());
        if let Some((width, height)) = self.asset.dimensions() {
            style.push_str(&format!(";aspect-ratio:{width}/{height}"));
        }
        Element::new("span")
            .class(CLASS_WRAPPER)
            .class(CLASS_LOADING)
            .class(self.asset.style_class())
            .attr("style", style)
            .child(image)
    }

    fn render_img(&self) -> Element {
        let wrapped = self.shows_preview();
        let mut img = Element::new("img")
            .attr("src", self.src().as_str())
            .attr("alt", self.asset.alt_text());

        if !wrapped {
            img.add_class(self.asset.style_class());
        }
        if let Some((width, height)) = self.asset.dimensions() {
            img.set_attr("width", width.to_string());
            img.set_attr("height", height.to_string());
        }
        if self.state == LoadState::Loading && self.choice != SourceChoice::Primary {
            img.set_attr(ATTR_FALLBACK, self.asset.primary().as_str());
        }
        img.attr("decoding", "async")
    }
}
