//! Embedded files written to the output dir under content-hashed names.

use std::fs;
use std::io;
use std::path::Path;

use crate::utils::hash::filename_hash;

use super::template::{Template, TemplateVars};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Css,
    JavaScript,
}

impl AssetKind {
    pub const fn extension(self) -> &'static str {
        match self {
            AssetKind::Css => "css",
            AssetKind::JavaScript => "js",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset<V> {
    kind: AssetKind,
    name: &'static str,
    template: Template<V>,
}

impl<V: TemplateVars> EmbeddedAsset<V> {
    pub const fn new(kind: AssetKind, name: &'static str, content: &'static str) -> Self {
        Self {
            kind,
            name,
            template: Template::new(content),
        }
    }

    pub fn render(&self, vars: &V) -> String {
        self.template.render(vars)
    }

    /// `folio-image-<hash12>.css`, where the hash covers template and vars.
    pub fn filename(&self, vars: &V) -> String {
        let input = format!("{}{}", self.template.content(), vars.hash_input());
        format!(
            "{}-{}.{}",
            self.name,
            filename_hash(input.as_bytes()),
            self.kind.extension()
        )
    }

    /// Write into `dir` unless already present; returns the file name.
    pub fn write_to(&self, dir: &Path, vars: &V) -> io::Result<String> {
        let filename = self.filename(vars);
        let path = dir.join(&filename);
        if !path.exists() {
            fs::create_dir_all(dir)?;
            fs::write(&path, self.render(vars))?;
        }
        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Color(&'static str);

    impl TemplateVars for Color {
        fn apply(&self, content: &str) -> String {
            content.replace("__COLOR__", self.0)
        }

        fn hash_input(&self) -> String {
            self.0.to_string()
        }
    }

    const STYLE: EmbeddedAsset<Color> =
        EmbeddedAsset::new(AssetKind::Css, "style", "a { color: __COLOR__ }");

    #[test]
    fn test_filename_depends_on_vars() {
        let red = STYLE.filename(&Color("red"));
        assert!(red.starts_with("style-") && red.ends_with(".css"));
        assert_ne!(red, STYLE.filename(&Color("blue")));
    }

    #[test]
    fn test_write_to() {
        let dir = tempfile::tempdir().unwrap();
        let name = STYLE.write_to(dir.path(), &Color("red")).unwrap();
        let written = fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(written, "a { color: red }");
    }
}
