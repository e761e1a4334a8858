//! Page chrome around `<main>`: head, header with navigation, footer.

use crate::image::component::CLASS_LOADING;
use crate::utils::html::Element;

use super::{Route, Site};

pub struct Layout<'a> {
    site: &'a Site,
    route: Route,
}

impl<'a> Layout<'a> {
    pub fn new(site: &'a Site, route: Route) -> Self {
        Self { site, route }
    }

    /// Complete document, doctype included.
    pub fn render(&self, main: Vec<Element>) -> String {
        let meta = &self.site.meta;
        let lang = if meta.language.is_empty() {
            "en"
        } else {
            meta.language.as_str()
        };

        let html = Element::new("html")
            .attr("lang", lang)
            .child(self.head())
            .child(
                Element::new("body")
                    .child(self.header())
                    .child(Element::new("main").children(main))
                    .child(self.footer()),
            );

        format!("<!DOCTYPE html>\n{}\n", html.render())
    }

    fn page_title(&self) -> String {
        let site_title = &self.site.meta.title;
        match self.route.title() {
            Some(page) if !site_title.is_empty() => format!("{page} | {site_title}"),
            Some(page) => page.to_string(),
            None => site_title.clone(),
        }
    }

    fn head(&self) -> Element {
        let meta = &self.site.meta;
        let runtime = &self.site.runtime;

        let mut head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(
                Element::new("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1"),
            )
            .child(Element::new("title").text(self.page_title()));

        if !meta.description.is_empty() {
            head = head.child(
                Element::new("meta")
                    .attr("name", "description")
                    .attr("content", &meta.description),
            );
        }
        if !meta.author.name.is_empty() {
            head = head.child(
                Element::new("meta")
                    .attr("name", "author")
                    .attr("content", &meta.author.name),
            );
        }

        head.child(
            Element::new("link")
                .attr("rel", "stylesheet")
                .attr("href", &runtime.css),
        )
        // without the script the loading state would hide images forever
        .child(Element::new("noscript").raw(format!(
            "<style>.{CLASS_LOADING} img{{opacity:1}}</style>"
        )))
        .child(
            Element::new("script")
                .attr("defer", "")
                .attr("src", &runtime.js),
        )
    }

    fn header(&self) -> Element {
        let prefix = &self.site.path_prefix;
        let current = self.route.url_path();

        let links = self.site.nav.iter().map(|link| {
            let mut a = Element::new("a")
                .attr("href", link.resolved_href(prefix))
                .text(&link.title);
            if !link.is_external() && link.href == current {
                a.set_attr("aria-current", "page");
            }
            Element::new("li").child(a)
        });

        Element::new("header")
            .child(
                Element::new("a")
                    .class("site-title")
                    .attr("href", home_href(prefix))
                    .text(&self.site.meta.title),
            )
            .child(Element::new("nav").child(Element::new("ul").children(links)))
    }

    fn footer(&self) -> Element {
        let line = self.site.meta.copyright_line();
        let mut footer = Element::new("footer");
        if !line.is_empty() {
            footer = footer.child(Element::new("p").text(line));
        }
        footer
    }
}

fn home_href(prefix: &str) -> String {
    match prefix.trim_matches('/') {
        "" => Route::Home.url_path().to_string(),
        prefix => format!("/{prefix}/"),
    }
}
