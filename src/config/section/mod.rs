//! Configuration section definitions.
//!
//! | Module  | TOML Section               | Purpose                        |
//! |---------|----------------------------|--------------------------------|
//! | `build` | `[build]`, `[build.images]`| Paths and image variants       |
//! | `serve` | `[serve]`                  | Development server             |
//! | `site`  | `[site]`, `[[nav]]`        | Site metadata and navigation   |

pub mod build;
mod serve;
pub mod site;

pub use build::{BuildConfig, ImageConfig};
pub use serve::ServeConfig;
pub use site::{AuthorInfo, NavLink, SiteMetadata, default_nav};
