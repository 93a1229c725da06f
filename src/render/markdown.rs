//! Markdown body rendering with pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        for (enabled, flag) in [
            (self.tables, Options::ENABLE_TABLES),
            (self.footnotes, Options::ENABLE_FOOTNOTES),
            (self.strikethrough, Options::ENABLE_STRIKETHROUGH),
            (self.task_lists, Options::ENABLE_TASKLISTS),
            (self.heading_attributes, Options::ENABLE_HEADING_ATTRIBUTES),
        ] {
            if enabled {
                opts.insert(flag);
            }
        }
        opts
    }
}

/// Render a markdown body to an HTML fragment.
pub fn to_html(markdown: &str, options: &MarkdownOptions) -> String {
    let parser = Parser::new_ext(markdown, options.to_pulldown_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(to_html("Hello", &MarkdownOptions::all()), "<p>Hello</p>\n");
    }

    #[test]
    fn test_heading_attributes() {
        let html = to_html("# Setup {#setup}", &MarkdownOptions::all());
        assert_eq!(html, "<h1 id=\"setup\">Setup</h1>\n");
    }

    #[test]
    fn test_extensions_toggle() {
        let md = "~~gone~~";
        assert!(to_html(md, &MarkdownOptions::all()).contains("<del>gone</del>"));
        assert!(!to_html(md, &MarkdownOptions::default()).contains("<del>"));
    }

    #[test]
    fn test_table() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |", &MarkdownOptions::all());
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>2</td>"));
    }
}
