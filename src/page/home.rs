//! Home page: the bio, then the optional `index.md` body.

use crate::image::FormatSupportProbe;
use crate::utils::html::Element;

use super::{Bio, Page, Site};

pub struct HomePage<'a> {
    site: &'a Site,
    probe: &'a dyn FormatSupportProbe,
}

impl<'a> HomePage<'a> {
    pub fn new(site: &'a Site, probe: &'a dyn FormatSupportProbe) -> Self {
        Self { site, probe }
    }
}

impl Page for HomePage<'_> {
    fn render(&self) -> Vec<Element> {
        let mut children = vec![Bio::new(self.site, self.probe).render()];
        if let Some(md) = &self.site.content().index {
            children.push(
                Element::new("div")
                    .class("home-body")
                    .raw(self.site.markdown_body(md, self.probe)),
            );
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::StaticProbe;
    use crate::page::test_support::site_with;

    #[test]
    fn test_home_with_and_without_index() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_with(dir.path(), None, None);
        let children = HomePage::new(&site, &StaticProbe::baseline()).render();
        assert_eq!(children.len(), 1);
        assert!(children[0].has_class("bio"));

        let dir = tempfile::tempdir().unwrap();
        let site = site_with(dir.path(), None, Some("# Recent posts"));
        let children = HomePage::new(&site, &StaticProbe::baseline()).render();
        assert_eq!(children.len(), 2);
        assert!(children[1].render().contains("<h1>Recent posts</h1>"));
    }
}
