//! Shared helpers: HTML building, MIME detection, paths, hashing and counts.

pub mod hash;
pub mod html;
pub mod mime;
pub mod path;
mod plural;

pub use plural::plural_count;
