//! Append-only markup sink.

/// Accumulates the markup of one page view.
#[derive(Debug, Default, Clone)]
pub struct OutputPage {
    html: String,
}

impl OutputPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }
}
