//! Template types for typed variable injection.

use std::marker::PhantomData;

/// A set of placeholder values for one template.
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;

    /// Input mixed into content-hashed file names.
    /// Override when the variables change the rendered output.
    fn hash_input(&self) -> String {
        String::new()
    }
}

/// Template with typed variable injection.
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }

    pub const fn content(&self) -> &'static str {
        self.content
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeting<'a> {
        name: &'a str,
    }

    impl TemplateVars for Greeting<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__NAME__", self.name)
        }
    }

    #[test]
    fn test_render_replaces_placeholders() {
        const HELLO: Template<Greeting<'static>> = Template::new("hi __NAME__, __NAME__");
        assert_eq!(HELLO.render(&Greeting { name: "Dima" }), "hi Dima, Dima");
        assert_eq!(HELLO.content(), "hi __NAME__, __NAME__");
    }
}
