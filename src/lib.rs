//! folio - a static builder for a personal blog/portfolio with progressive,
//! format-negotiating images.
//!
//! The binary drives [`cli`]. [`crate::image`] also stands on its own: a host
//! environment builds a `ResponsiveImage` per render, mounts it against its
//! `ResourceCache` and forwards load events to it.

pub mod asset;
pub mod cli;
pub mod config;
pub mod embed;
pub mod image;
pub mod logger;
pub mod page;
pub mod utils;
