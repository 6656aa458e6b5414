//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::LabConfig;

/// GFM markdown renderer
///
/// Rendering is a pure function of the input text and the options the
/// renderer was built with.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    /// `None` disables highlighting
    theme: Option<Theme>,
    line_numbers: bool,
    allow_html: bool,
}

impl MarkdownRenderer {
    /// Create a renderer with default settings
    pub fn new() -> Self {
        Self::from_config(&LabConfig::default())
    }

    /// Create a renderer from the highlight and render sections of `config`
    pub fn from_config(config: &LabConfig) -> Self {
        let theme = if config.highlight.enable {
            let mut themes = ThemeSet::load_defaults().themes;
            let theme = themes.remove(&config.highlight.theme);
            if theme.is_none() {
                tracing::warn!(
                    "Unknown highlight theme {:?}, code blocks will not be highlighted",
                    config.highlight.theme
                );
            }
            theme
        } else {
            None
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            line_numbers: config.highlight.line_number,
            allow_html: config.render.allow_html,
        }
    }

    fn options() -> Options {
        // Front-matter is split off before rendering, so no metadata blocks
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::options());

        let mut events: Vec<Event> = Vec::new();
        // (language, accumulated source) while inside a code block
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(String::from)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let html = self.render_code_block(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(html)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::Html(_) | Event::InlineHtml(_) if !self.allow_html => {}
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    fn render_code_block(&self, code: &str, lang: Option<&str>) -> String {
        let (Some(lang), Some(theme)) = (lang, self.theme.as_ref()) else {
            return plain_code_block(code, lang);
        };

        let Some(syntax) = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
        else {
            return plain_code_block(code, Some(lang));
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) if self.line_numbers => add_line_numbers(&highlighted, lang),
            Ok(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                html_escape(lang),
                highlighted
            ),
            Err(e) => {
                tracing::debug!("Highlighting {} failed: {}", lang, e);
                plain_code_block(code, Some(lang))
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn plain_code_block(code: &str, lang: Option<&str>) -> String {
    match lang {
        Some(lang) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            html_escape(lang),
            html_escape(code)
        ),
        None => format!("<pre><code>{}</code></pre>\n", html_escape(code)),
    }
}

/// Wrap highlighted code in a gutter table
fn add_line_numbers(code: &str, lang: &str) -> String {
    let gutter = (1..=code.lines().count())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        html_escape(lang),
        gutter,
        code
    )
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_renderer() -> MarkdownRenderer {
        let mut config = LabConfig::default();
        config.highlight.enable = false;
        MarkdownRenderer::from_config(&config)
    }

    #[test]
    fn test_render_basic_markdown() {
        let renderer = plain_renderer();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_gfm_extensions() {
        let renderer = plain_renderer();
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done\n- [ ] todo\n";
        let html = renderer.render(markdown);
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::new();
        let markdown = "Intro\n\n```rust\nfn main() {}\n```\n\n| x |\n|---|\n| y |\n";
        assert_eq!(renderer.render(markdown), renderer.render(markdown));
    }

    #[test]
    fn test_render_code_block_highlighted() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<figure class="highlight rust">"#));
        assert!(!html.contains("<pre><code"));
    }

    #[test]
    fn test_render_code_block_plain() {
        let renderer = plain_renderer();
        let html = renderer.render("```rust\nlet x = a < b;\n```");
        assert!(html.contains(r#"<pre><code class="language-rust">let x = a &lt; b;"#));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```no-such-lang\nhello\n```");
        assert!(html.contains(r#"<pre><code class="language-no-such-lang">hello"#));
    }

    #[test]
    fn test_line_numbers() {
        let mut config = LabConfig::default();
        config.highlight.line_number = true;
        let renderer = MarkdownRenderer::from_config(&config);
        let html = renderer.render("```rust\nfn a() {}\nfn b() {}\n```");
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_raw_html_dropped_by_default() {
        let renderer = plain_renderer();
        let html = renderer.render("<script>alert(1)</script>\n\nText with <b>bold</b>.");
        assert!(!html.contains("script"));
        assert!(!html.contains("alert"));
        assert!(!html.contains("&lt;b&gt;"));
        assert!(html.contains("<p>Text with bold.</p>"));
    }

    #[test]
    fn test_raw_html_allowed() {
        let mut config = LabConfig::default();
        config.highlight.enable = false;
        config.render.allow_html = true;
        let renderer = MarkdownRenderer::from_config(&config);
        let html = renderer.render("Text with <b>bold</b>.");
        assert!(html.contains("<b>bold</b>"));
    }
}
