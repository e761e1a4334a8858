//! Build-time image pipeline and static asset copy.
//!
//! For each image a page shows:
//!
//! ```text
//! content/assets/avatar.png
//!   ├─► public/assets/avatar-1a2b3c4d5e6f.png    original, content-hashed
//!   ├─► public/assets/avatar-1a2b3c4d5e6f.webp   alternate ([build.images] webp)
//!   └─► data:image/png;base64,...                preview  ([build.images] preview)
//! ```
//!
//! Output names carry the content hash, so an existing file is never rewritten.
//! Dimensions and previews are cached in `.folio/manifest.json`.

mod copy;
mod manifest;
mod variants;

pub use copy::{collect_files, copy_static_assets};
pub use manifest::{CachedImage, CachedPreview, PreviewCache};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::image::ImageFormat;
use crate::log;
use crate::logger::ProgressLine;
use crate::utils::hash::filename_hash;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image `{0}` not found")]
    Missing(PathBuf),

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("cannot decode `{0}`")]
    Decode(PathBuf, #[source] image::ImageError),

    #[error("cannot encode {1} for `{0}`")]
    Encode(PathBuf, &'static str, #[source] image::ImageError),
}

/// Everything a page needs to show one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    pub source: PathBuf,
    /// Relative to the output dir, e.g. `assets/avatar-1a2b3c4d5e6f.png`.
    pub original: PathBuf,
    pub webp: Option<PathBuf>,
    /// `data:` URI of the blurred preview.
    pub preview: Option<String>,
    pub dimensions: Option<(u32, u32)>,
}

impl ResolvedImage {
    fn original_only(source: &Path, original: PathBuf) -> Self {
        Self {
            source: source.to_path_buf(),
            original,
            webp: None,
            preview: None,
            dimensions: None,
        }
    }
}

/// Resolved images keyed by source path.
#[derive(Debug, Default)]
pub struct ImageSet {
    images: FxHashMap<PathBuf, ResolvedImage>,
}

impl ImageSet {
    pub fn get(&self, source: &Path) -> Option<&ResolvedImage> {
        self.images.get(source)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.images.keys().map(PathBuf::as_path)
    }
}

/// Produce the output files for one image.
///
/// Sources the pipeline cannot decode (SVG, or a corrupt file) still get the
/// hashed original and resolve without alternate or preview.
pub fn resolve_image(
    source: &Path,
    config: &SiteConfig,
    cache: &PreviewCache,
) -> Result<ResolvedImage, AssetError> {
    if !source.is_file() {
        return Err(AssetError::Missing(source.to_path_buf()));
    }
    let bytes = fs::read(source).map_err(|e| AssetError::Io(source.to_path_buf(), e))?;
    let hash = filename_hash(&bytes);

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".into());
    let ext = source
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let out_dir = config.build.assets_output();
    fs::create_dir_all(&out_dir).map_err(|e| AssetError::Io(out_dir.clone(), e))?;

    let original_name = if ext.is_empty() {
        format!("{stem}-{hash}")
    } else {
        format!("{stem}-{hash}.{ext}")
    };
    write_if_missing(&out_dir.join(&original_name), &bytes)?;
    let mut resolved = ResolvedImage::original_only(source, Path::new("assets").join(original_name));

    let Some(format) = ImageFormat::from_extension(&ext) else {
        crate::debug!("images"; "{} is not a raster image, copied as-is", source.display());
        return Ok(resolved);
    };

    let webp_name = format!("{stem}-{hash}.webp");
    let want_webp = config.build.images.webp && format != ImageFormat::WebP;

    match derive_variants(source, &bytes, &hash, &out_dir.join(&webp_name), want_webp, config, cache) {
        Ok(cached) => {
            resolved.dimensions = Some((cached.width, cached.height));
            resolved.preview = cached.preview.map(|p| p.data_uri);
            if want_webp {
                resolved.webp = Some(Path::new("assets").join(webp_name));
            }
        }
        Err(AssetError::Decode(path, err)) => {
            log!("warning"; "cannot decode {}: {}; using the original only", path.display(), err);
        }
        Err(e) => return Err(e),
    }

    Ok(resolved)
}

/// Write the WebP file and build the preview, decoding only when the cache
/// and the output dir do not already have what is needed.
fn derive_variants(
    source: &Path,
    bytes: &[u8],
    hash: &str,
    webp_path: &Path,
    want_webp: bool,
    config: &SiteConfig,
    cache: &PreviewCache,
) -> Result<CachedImage, AssetError> {
    let images = &config.build.images;
    let cached = cache.get(hash);

    let preview_current = |entry: &CachedImage| match &entry.preview {
        Some(preview) => images.preview && preview.matches(images),
        None => !images.preview,
    };
    if let Some(entry) = cached
        && preview_current(&entry)
        && (!want_webp || webp_path.exists())
    {
        return Ok(entry);
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| AssetError::Decode(source.to_path_buf(), e))?;

    if want_webp && !webp_path.exists() {
        let webp = variants::encode_webp(&img)
            .map_err(|e| AssetError::Encode(source.to_path_buf(), "webp", e))?;
        write_if_missing(webp_path, &webp)?;
    }

    let preview = if images.preview {
        let data_uri = variants::encode_preview(&img, images.preview_width, images.preview_blur)
            .map_err(|e| AssetError::Encode(source.to_path_buf(), "preview", e))?;
        Some(CachedPreview {
            width: images.preview_width,
            blur: images.preview_blur,
            data_uri,
        })
    } else {
        None
    };

    let entry = CachedImage {
        width: img.width(),
        height: img.height(),
        preview,
    };
    cache.insert(hash.to_string(), entry.clone());
    Ok(entry)
}

fn write_if_missing(path: &Path, bytes: &[u8]) -> Result<(), AssetError> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, bytes).map_err(|e| AssetError::Io(path.to_path_buf(), e))
}

/// Resolve `sources` in parallel. Duplicates are resolved once.
pub fn process_images(
    sources: &[PathBuf],
    config: &SiteConfig,
    cache: &PreviewCache,
    progress: Option<&ProgressLine>,
) -> Result<ImageSet, AssetError> {
    let mut unique = sources.to_vec();
    unique.sort();
    unique.dedup();

    let resolved = unique
        .par_iter()
        .map(|source| {
            let result = resolve_image(source, config, cache);
            if let Some(progress) = progress {
                progress.inc("images");
            }
            crate::debug!("images"; "{}", config.root_relative(source).display());
            result
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ImageSet {
        images: resolved
            .into_iter()
            .map(|image| (image.source.clone(), image))
            .collect(),
    })
}
