//! Responsive image component.
//!
//! # Modules
//!
//! - [`asset`]: `ImageAsset` and `Locator`, the already-resolved sources
//! - [`format`]: image formats and `FormatSupportProbe` implementations
//! - [`component`]: `ResponsiveImage`, its load state and markup
//!
//! # Flow
//!
//! ```text
//! ImageAsset ──► ResponsiveImage::new(asset, probe)
//!                    │  probe decides: alternate, primary, or <picture>
//!                    ▼
//!               mount(cache) ──► FetchRequest (unless cached or inline)
//!                    │
//!      on_load ──────┼────── on_error
//!         ▼          │           ▼
//!      Loaded        │    switch to primary once, keep preview
//!                    ▼
//!               render() ──► Element
//! ```

pub mod asset;
pub mod component;
pub mod format;

pub use asset::{AlternateSource, ImageAsset, Locator};
pub use component::{
    FetchRequest, InlineCache, LoadState, NoCache, ResourceCache, ResponsiveImage, SourceChoice,
};
pub use format::{
    AcceptProbe, FormatSupport, FormatSupportProbe, ImageFormat, PictureProbe, StaticProbe,
};
