//! `[[nav]]` entries rendered in the layout header.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub title: String,
    /// Site-root path (`/about/`) or absolute URL.
    pub href: String,
}

impl NavLink {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }

    pub fn is_external(&self) -> bool {
        self.href.starts_with("http://")
            || self.href.starts_with("https://")
            || self.href.starts_with("mailto:")
            || self.href.starts_with("//")
    }

    /// Link target with the site prefix applied to site-root paths.
    pub fn resolved_href(&self, path_prefix: &str) -> String {
        let prefix = path_prefix.trim_matches('/');
        if self.is_external() || prefix.is_empty() || !self.href.starts_with('/') {
            return self.href.clone();
        }
        format!("/{prefix}{}", self.href)
    }
}

pub fn default_nav() -> Vec<NavLink> {
    vec![NavLink::new("Home", "/"), NavLink::new("About", "/about/")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_default_nav_when_absent() {
        let config = test_parse_config("");
        assert_eq!(config.nav, default_nav());
    }

    #[test]
    fn test_custom_nav() {
        let config = test_parse_config(
            "[[nav]]\ntitle = \"Posts\"\nhref = \"/posts/\"\n[[nav]]\ntitle = \"GitHub\"\nhref = \"https://github.com/\"",
        );
        assert_eq!(config.nav.len(), 2);
        assert!(config.nav[1].is_external());
    }

    #[test]
    fn test_resolved_href() {
        let about = NavLink::new("About", "/about/");
        assert_eq!(about.resolved_href(""), "/about/");
        assert_eq!(about.resolved_href("blog"), "/blog/about/");
        let ext = NavLink::new("Mail", "mailto:me@example.com");
        assert_eq!(ext.resolved_href("blog"), "mailto:me@example.com");
    }
}
