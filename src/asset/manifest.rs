//! Build cache for decoded image facts, stored in `.folio/manifest.json`.
//!
//! Decoding and blurring every image on each build is the slow part of the
//! pipeline. Entries are keyed by content hash, so an edited image gets a new
//! key and stale entries simply stop being looked up.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::ImageConfig;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedImage {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub preview: Option<CachedPreview>,
}

/// A preview data URI and the settings it was made with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedPreview {
    pub width: u32,
    pub blur: f32,
    pub data_uri: String,
}

impl CachedPreview {
    pub fn matches(&self, images: &ImageConfig) -> bool {
        self.width == images.preview_width && self.blur == images.preview_blur
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Manifest {
    images: FxHashMap<String, CachedImage>,
}

/// Shared across the rayon workers of one build.
#[derive(Debug)]
pub struct PreviewCache {
    path: PathBuf,
    entries: Mutex<FxHashMap<String, CachedImage>>,
    dirty: AtomicBool,
}

impl PreviewCache {
    /// Load the manifest from `cache_dir`. A missing or unreadable manifest
    /// gives an empty cache.
    pub fn load(cache_dir: &Path) -> Self {
        let path = cache_dir.join(MANIFEST_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Manifest>(&json) {
                Ok(manifest) => manifest.images,
                Err(e) => {
                    crate::debug!("images"; "ignoring corrupt {}: {}", path.display(), e);
                    FxHashMap::default()
                }
            },
            Err(_) => FxHashMap::default(),
        };

        Self {
            path,
            entries: Mutex::new(entries),
            dirty: AtomicBool::new(false),
        }
    }

    pub fn get(&self, hash: &str) -> Option<CachedImage> {
        self.entries.lock().get(hash).cloned()
    }

    pub fn insert(&self, hash: String, entry: CachedImage) {
        let mut entries = self.entries.lock();
        if entries.get(&hash) != Some(&entry) {
            entries.insert(hash, entry);
            self.dirty.store(true, Ordering::Relaxed);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Write the manifest if anything changed since `load`.
    pub fn save(&self) -> io::Result<()> {
        if !self.dirty.swap(false, Ordering::Relaxed) {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let manifest = Manifest {
            images: self.entries.lock().clone(),
        };
        let json = serde_json::to_string_pretty(&manifest)?;
        fs::write(&self.path, json)
    }
}
