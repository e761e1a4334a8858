//! About page: avatar paragraph, then the `about.md` body.

use crate::image::FormatSupportProbe;
use crate::utils::html::Element;

use super::{Page, Site};

pub struct AboutPage<'a> {
    site: &'a Site,
    probe: &'a dyn FormatSupportProbe,
}

impl<'a> AboutPage<'a> {
    pub fn new(site: &'a Site, probe: &'a dyn FormatSupportProbe) -> Self {
        Self { site, probe }
    }
}

impl Page for AboutPage<'_> {
    fn render(&self) -> Vec<Element> {
        let mut children = vec![Element::new("h1").text("About")];

        if let Some(avatar) = self.site.avatar("about-avatar") {
            children.push(Element::new("p").child(self.site.image(avatar, self.probe)));
        }

        let body = self
            .site
            .content()
            .about
            .as_deref()
            .map(|md| self.site.markdown_body(md, self.probe))
            .unwrap_or_default();
        children.push(Element::new("div").class("about-body").raw(body));
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PictureProbe;
    use crate::page::test_support::site_with;

    fn render(site: &Site) -> String {
        AboutPage::new(site, &PictureProbe)
            .render()
            .iter()
            .map(Element::render)
            .collect()
    }

    #[test]
    fn test_about_renders_markdown_after_avatar() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_with(dir.path(), Some("Hello, I am **Dima**."), None);
        let html = render(&site);

        let avatar = html.find("<picture>").unwrap();
        let body = html.find("<strong>Dima</strong>").unwrap();
        assert!(avatar < body);
    }

    #[test]
    fn test_missing_about_gives_empty_body() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_with(dir.path(), None, None);
        assert!(render(&site).ends_with("<div class=\"about-body\"></div>"));
    }
}
