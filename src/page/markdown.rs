//! Markdown bodies rendered with `pulldown-cmark`.
//!
//! The caller decides per image: returned markup replaces it (assets-dir and
//! `data:` images become `ResponsiveImage` markup), otherwise it stays a
//! plain `<img>`.

use std::path::{Path, PathBuf};

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

/// Enabled extensions.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub footnotes: bool,
    pub strikethrough: bool,
    pub task_lists: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
        }
    }
}

impl MarkdownOptions {
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        opts
    }
}

/// Destinations of every image in `markdown`.
pub fn image_refs(markdown: &str) -> Vec<String> {
    Parser::new_ext(markdown, MarkdownOptions::default().to_pulldown_options())
        .filter_map(|event| match event {
            Event::Start(Tag::Image { dest_url, .. }) => Some(dest_url.to_string()),
            _ => None,
        })
        .collect()
}

/// Map an image destination to a file in `assets_dir`.
///
/// `avatar.png`, `assets/avatar.png` and `/assets/avatar.png` all name
/// `<assets_dir>/avatar.png`. URLs with a scheme and data URIs are not local.
pub fn resolve_local(dest: &str, assets_dir: &Path) -> Option<PathBuf> {
    if dest.is_empty() || dest.starts_with("//") || dest.contains(':') {
        return None;
    }
    let rel = dest.trim_start_matches('/');
    let rel = rel.strip_prefix("assets/").unwrap_or(rel);
    if rel.split('/').any(|part| part == "..") {
        return None;
    }
    let path = assets_dir.join(rel);
    path.is_file().then_some(path)
}

struct PendingImage<'a> {
    dest: CowStr<'a>,
    alt: String,
    events: Vec<Event<'a>>,
    /// Images nested in the alt text that are still open.
    depth: usize,
}

/// Render `markdown` to HTML. `image` gets `(destination, alt text)` and
/// returns replacement markup, or `None` to keep the default `<img>`.
pub fn render<F>(markdown: &str, options: &MarkdownOptions, image: F) -> String
where
    F: Fn(&str, &str) -> Option<String>,
{
    let mut events = Vec::new();
    let mut pending: Option<PendingImage> = None;

    for event in Parser::new_ext(markdown, options.to_pulldown_options()) {
        if let Some(img) = pending.as_mut() {
            let closed = match &event {
                Event::Start(Tag::Image { .. }) => {
                    img.depth += 1;
                    false
                }
                Event::End(TagEnd::Image) if img.depth > 0 => {
                    img.depth -= 1;
                    false
                }
                Event::End(TagEnd::Image) => true,
                Event::Text(text) | Event::Code(text) => {
                    img.alt.push_str(text);
                    false
                }
                _ => false,
            };
            img.events.push(event);

            if closed && let Some(img) = pending.take() {
                match image(&img.dest, &img.alt) {
                    Some(markup) => events.push(Event::InlineHtml(markup.into())),
                    None => events.extend(img.events),
                }
            }
            continue;
        }

        match event {
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                pending = Some(PendingImage {
                    dest: dest_url.clone(),
                    alt: String::new(),
                    events: vec![Event::Start(Tag::Image {
                        link_type,
                        dest_url,
                        title,
                        id,
                    })],
                    depth: 0,
                });
            }
            event => events.push(event),
        }
    }
    // unterminated image: keep what was parsed
    if let Some(img) = pending {
        events.extend(img.events);
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;

    #[test]
    fn test_render_extensions() {
        let out = render(
            "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~",
            &MarkdownOptions::default(),
            |_, _| None,
        );
        assert!(out.contains("<table>"));
        assert!(out.contains("<del>old</del>"));
    }

    #[test]
    fn test_image_refs() {
        let refs = image_refs("Hi ![me](assets/me.png) and ![x](https://e.com/x.jpg)");
        assert_eq!(refs, ["assets/me.png", "https://e.com/x.jpg"]);
    }

    #[test]
    fn test_image_replaced_with_alt_text() {
        let out = render(
            "Look: ![my *cat*](cat.png)",
            &MarkdownOptions::default(),
            |dest, alt| Some(format!("<span data-src=\"{dest}\">{alt}</span>")),
        );
        assert_eq!(out, "<p>Look: <span data-src=\"cat.png\">my cat</span></p>\n");
    }

    #[test]
    fn test_nested_image_replaced_once() {
        let calls = RefCell::new(Vec::new());
        let out = render("![![a](a.png)](b.png)", &MarkdownOptions::default(), |dest, alt| {
            calls.borrow_mut().push((dest.to_string(), alt.to_string()));
            Some(format!("<x-img src=\"{dest}\">"))
        });

        assert_eq!(calls.into_inner(), [("b.png".to_string(), "a".to_string())]);
        assert_eq!(out, "<p><x-img src=\"b.png\"></p>\n");
    }

    #[test]
    fn test_image_kept_when_not_replaced() {
        let out = render("![x](https://e.com/x.jpg)", &MarkdownOptions::default(), |_, _| None);
        assert!(out.contains("<img src=\"https://e.com/x.jpg\" alt=\"x\""));
    }

    #[test]
    fn test_resolve_local() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("me.png"), b"x").unwrap();

        for dest in ["me.png", "assets/me.png", "/assets/me.png"] {
            assert_eq!(resolve_local(dest, dir.path()), Some(dir.path().join("me.png")));
        }
        assert_eq!(resolve_local("missing.png", dir.path()), None);
        assert_eq!(resolve_local("https://e.com/me.png", dir.path()), None);
        assert_eq!(resolve_local("data:image/png;base64,AA", dir.path()), None);
        assert_eq!(resolve_local("../secret.png", dir.path()), None);
    }
}
