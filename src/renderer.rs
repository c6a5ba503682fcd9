//! Rendering of the built-in document snippets with MiniJinja.
use crate::error::{Error, Result};
use minijinja::Environment;

/// Getting Started block that replaces the README template section
pub const GETTING_STARTED: &str = "getting_started.md";
/// One-paragraph project description for CLAUDE.md
pub const PROJECT_BLURB: &str = "project_blurb.md";
/// Full replacement of docs/index.md
pub const DOCS_INDEX: &str = "docs_index.md";
/// License Headers section of the code-style rules
pub const LICENSE_HEADERS: &str = "license_headers.md";

const SNIPPETS: [(&str, &str); 4] = [
    (GETTING_STARTED, include_str!("snippets/getting_started.md")),
    (PROJECT_BLURB, include_str!("snippets/project_blurb.md")),
    (DOCS_INDEX, include_str!("snippets/docs_index.md")),
    (LICENSE_HEADERS, include_str!("snippets/license_headers.md")),
];

/// Trait for snippet rendering engines.
pub trait TemplateRenderer {
    /// Renders a named snippet with the given context.
    ///
    /// # Arguments
    /// * `name` - Snippet name, one of the constants of this module
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based rendering engine with every snippet preloaded.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer and compiles the built-in snippets.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if a snippet does not compile
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        for (name, source) in SNIPPETS {
            env.add_template(name, source).map_err(Error::MinijinjaError)?;
        }
        Ok(Self { env })
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String> {
        let tmpl = self.env.get_template(name).map_err(Error::MinijinjaError)?;
        tmpl.render(context).map_err(Error::MinijinjaError)
    }
}
