use std::path::Path;

use pulldown_cmark::{Options, Parser, html};
use serde::Serialize;
use tera::{Context, Tera};

/// Templates compiled into the binary. A template directory can override
/// any of them by name.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("page.html", include_str!("../templates/page.html")),
    (
        "category/paging.html",
        include_str!("../templates/category/paging.html"),
    ),
    (
        "category/list.html",
        include_str!("../templates/category/list.html"),
    ),
    (
        "category/subcategories.html",
        include_str!("../templates/category/subcategories.html"),
    ),
    (
        "category/pages.html",
        include_str!("../templates/category/pages.html"),
    ),
    (
        "category/media.html",
        include_str!("../templates/category/media.html"),
    ),
];

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("template directory not found: {0}")]
    TemplatesNotFound(String),
}

/// The template renderer, wrapping Tera.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Create a renderer with the built-in templates only.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self {
            tera: builtin_tera()?,
        })
    }

    /// Create a renderer where templates in `templates_path` replace
    /// built-in templates of the same name.
    pub fn with_overrides(templates_path: &Path) -> Result<Self, RenderError> {
        if !templates_path.exists() {
            return Err(RenderError::TemplatesNotFound(
                templates_path.display().to_string(),
            ));
        }

        let glob = templates_path.join("**/*.html");
        let glob_str = glob.to_string_lossy();
        let mut tera = Tera::new(&glob_str)?;

        // Existing (overriding) templates are kept
        tera.extend(&builtin_tera()?)?;

        Ok(Self { tera })
    }

    /// Render a named template with a serializable context.
    pub fn render<T: Serialize>(&self, template: &str, context: &T) -> Result<String, RenderError> {
        let tera_context = Context::from_serialize(context)?;
        Ok(self.tera.render(template, &tera_context)?)
    }

    /// Wrap a rendered body in the page shell.
    pub fn render_page(&self, context: &PageContext) -> Result<String, RenderError> {
        self.render("page.html", context)
    }
}

fn builtin_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(BUILTIN_TEMPLATES.iter().copied())?;
    Ok(tera)
}

/// Context passed to the page shell template.
#[derive(Debug, Serialize)]
pub struct PageContext {
    pub title: String,
    pub site_name: Option<String>,
    pub body: String,
}

/// Render article source text (Markdown) to HTML.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(text, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
