//! Site building orchestration.
//!
//! Build phases:
//! - **Init**: clean output and preview cache (`--clean`), create output dir
//! - **Collect**: read markdown, gather every image pages show
//! - **Images**: hashed originals, WebP, previews (parallel)
//! - **Static**: copy remaining assets, write the image runtime
//! - **Pages**: render each route with `PictureProbe`

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

use crate::asset::{PreviewCache, copy_static_assets, process_images};
use crate::config::SiteConfig;
use crate::embed::runtime::write_runtime;
use crate::image::PictureProbe;
use crate::log;
use crate::logger::ProgressLine;
use crate::page::{Content, Route, Site, image_sources};
use crate::utils::plural_count;

/// Everything up to page rendering. `serve` renders pages per request from
/// the returned `Site`; `build` writes `pages` of them and counts them on the
/// returned progress line.
pub fn prepare_site(config: &SiteConfig, pages: usize) -> Result<(Site, ProgressLine)> {
    init_build(config)?;

    let content = Content::load(&config.build.content)?;
    let sources = image_sources(config, &content);

    let cache = PreviewCache::load(&config.cache_dir());
    let progress = ProgressLine::new(&[("images", sources.len()), ("pages", pages)]);
    let images = process_images(&sources, config, &cache, Some(&progress))?;
    if let Err(e) = cache.save() {
        log!("warning"; "failed to save preview cache: {}", e);
    }

    let skip: FxHashSet<PathBuf> = images.sources().map(PathBuf::from).collect();
    copy_static_assets(
        &config.build.assets,
        &config.build.assets_output(),
        &skip,
        config.build.clean,
    )?;

    let runtime = write_runtime(config).context("failed to write image runtime")?;
    Ok((Site::new(config, content, images, runtime), progress))
}

fn init_build(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    if config.build.clean {
        if output.exists() {
            fs::remove_dir_all(output)
                .with_context(|| format!("failed to clean {}", output.display()))?;
        }
        let cache = config.cache_dir();
        if cache.exists() {
            fs::remove_dir_all(&cache)
                .with_context(|| format!("failed to clean {}", cache.display()))?;
        }
        crate::debug!("build"; "cleaned {}", config.root_relative(output).display());
    }
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    Ok(())
}

/// Build the whole site into the output directory.
///
/// Static output cannot see the visitor's browser, so images are negotiated
/// with `<picture>`.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let start = Instant::now();
    let (site, progress) = prepare_site(config, Route::ALL.len())?;
    write_pages(&site, config, &progress)?;
    progress.finish();

    log!(
        "build";
        "{} to {} in {:.2?}",
        plural_count(Route::ALL.len(), "page"),
        config.root_relative(&config.build.output).display(),
        start.elapsed()
    );
    Ok(())
}

fn write_pages(site: &Site, config: &SiteConfig, progress: &ProgressLine) -> Result<()> {
    for route in Route::ALL {
        let path = route.output_path(&config.build.output);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, site.render(route, &PictureProbe))
            .with_context(|| format!("failed to write {}", path.display()))?;
        progress.inc("pages");
        crate::debug!("build"; "{}", config.root_relative(&path).display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::path::Path;

    fn project(dir: &Path) -> SiteConfig {
        let mut config = test_config_at(dir, "");
        config.site.author.avatar = Some("avatar.png".into());

        fs::create_dir_all(&config.build.assets).unwrap();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(48, 48, Rgb([200, 100, 50])))
            .save(config.build.assets.join("avatar.png"))
            .unwrap();
        fs::write(config.build.assets.join("robots.txt"), "User-agent: *").unwrap();
        fs::write(config.build.content.join("about.md"), "I build **things**.").unwrap();
        config
    }

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_build_site_writes_pages_and_assets() {
        let dir = tempfile::tempdir().unwrap();
        let config = project(dir.path());
        build_site(&config).unwrap();

        let output = &config.build.output;
        let home = fs::read_to_string(output.join("index.html")).unwrap();
        let about = fs::read_to_string(output.join("about/index.html")).unwrap();

        assert!(home.contains("I write code."));
        assert!(home.contains("<picture><source srcset=\"/assets/avatar-"));
        assert!(home.contains("alt=\"Profile\""));
        assert!(about.contains("<strong>things</strong>"));

        let assets = files_in(&config.build.assets_output());
        assert!(assets.iter().any(|n| n.starts_with("avatar-") && n.ends_with(".png")));
        assert!(assets.iter().any(|n| n.starts_with("avatar-") && n.ends_with(".webp")));
        assert!(assets.iter().any(|n| n.starts_with("folio-image-") && n.ends_with(".js")));
        assert!(assets.contains(&"robots.txt".to_string()));
        assert!(!assets.contains(&"avatar.png".to_string()));
        assert!(config.cache_dir().join("manifest.json").is_file());
    }

    #[test]
    fn test_progress_counts_unique_images_and_pages() {
        let dir = tempfile::tempdir().unwrap();
        let config = project(dir.path());
        fs::write(config.build.content.join("about.md"), "![me](avatar.png)").unwrap();

        let (site, progress) = prepare_site(&config, Route::ALL.len()).unwrap();
        assert_eq!(progress.summary(), "images(1/1) pages(0/2)");
        write_pages(&site, &config, &progress).unwrap();
        assert_eq!(progress.summary(), "images(1/1) pages(2/2)");
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = project(dir.path());
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.build.output.join("stale.html"), "old").unwrap();

        config.build.clean = true;
        build_site(&config).unwrap();
        assert!(!config.build.output.join("stale.html").exists());
        assert!(config.build.output.join("index.html").exists());
    }

    #[test]
    fn test_rebuild_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let config = project(dir.path());
        build_site(&config).unwrap();
        let first = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        build_site(&config).unwrap();
        let second = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert_eq!(first, second);
    }
}
