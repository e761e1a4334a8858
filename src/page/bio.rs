//! Author bio: round avatar next to the one-line summary.

use crate::image::FormatSupportProbe;
use crate::utils::html::Element;

use super::Site;

pub const AVATAR_CLASS: &str = "bio-avatar";

pub struct Bio<'a> {
    site: &'a Site,
    probe: &'a dyn FormatSupportProbe,
}

impl<'a> Bio<'a> {
    pub fn new(site: &'a Site, probe: &'a dyn FormatSupportProbe) -> Self {
        Self { site, probe }
    }

    pub fn render(&self) -> Element {
        let author = &self.site.meta.author;
        let mut bio = Element::new("div")
            .class("bio")
            .attr("style", "display:flex;align-items:center;gap:1rem");

        if let Some(avatar) = self.site.avatar(AVATAR_CLASS) {
            bio = bio.child(self.site.image(avatar, self.probe));
        }

        let mut summary = Element::new("p").class("bio-summary");
        if !author.name.is_empty() {
            summary = summary
                .child(Element::new("strong").text(&author.name))
                .child(Element::new("br"));
        }
        bio.child(summary.text(&author.summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{NoCache, ResponsiveImage, StaticProbe};
    use crate::page::test_support::site_with;

    #[test]
    fn test_bio_has_avatar_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_with(dir.path(), None, None);
        let probe = StaticProbe::new([crate::image::ImageFormat::WebP]);
        let html = Bio::new(&site, &probe).render().render();

        assert!(html.contains("I write code."));
        assert!(html.contains("<strong>Dima</strong>"));
        assert!(html.contains("alt=\"Profile\""));
        assert!(html.contains(".webp\""));
        assert!(html.contains("background-image"));
    }

    #[test]
    fn test_bio_without_avatar() {
        let dir = tempfile::tempdir().unwrap();
        let mut site = site_with(dir.path(), None, None);
        site.meta.author.avatar = None;
        let html = Bio::new(&site, &StaticProbe::baseline()).render().render();
        assert!(!html.contains("<img"));
        assert!(html.contains("I write code."));
    }

    #[test]
    fn test_bio_avatar_class_moves_to_img_once_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_with(dir.path(), None, None);
        let mut image = ResponsiveImage::new(site.avatar(AVATAR_CLASS).unwrap(), &StaticProbe::baseline());
        image.mount(&NoCache);
        image.on_load();
        assert!(image.render().has_class(AVATAR_CLASS));
    }
}
