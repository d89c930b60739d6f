use pulldown_cmark::{html, Event, Options, Parser, Tag};

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts
}

/// Render a markdown report to HTML for the UI.
///
/// Raw HTML in the input is emitted as-is (see crate docs).
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Strip a markdown report to plain text, for log excerpts and terminal
/// status lines.
pub fn to_plain_text(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len());
    for event in parser {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(Tag::Paragraph)
            | Event::End(Tag::Heading(..))
            | Event::End(Tag::Item)
            | Event::End(Tag::CodeBlock(_)) => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
    out.trim_end().to_string()
}

/// A short single-line excerpt of a report, for structured logs.
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    let plain = to_plain_text(markdown).replace('\n', " ");
    if plain.chars().count() <= max_chars {
        return plain;
    }
    let cut: String = plain.chars().take(max_chars).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headers_lists_and_emphasis() {
        let html = render_html("# Glycerin\n\n- *humectant*\n- **safe**\n");
        assert!(html.contains("<h1>Glycerin</h1>"));
        assert!(html.contains("<li><em>humectant</em></li>"));
        assert!(html.contains("<strong>safe</strong>"));
    }

    #[test]
    fn raw_html_passes_through_unescaped() {
        let html = render_html("verdict: <span class=\"pct\">78%</span>\n");
        assert!(html.contains("<span class=\"pct\">78%</span>"));
    }

    #[test]
    fn renders_tables() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn plain_text_strips_formatting() {
        let plain = to_plain_text("# Risk-Benefit\n\nMostly **beneficial** (78%).");
        assert_eq!(plain, "Risk-Benefit\nMostly beneficial (78%).");
    }

    #[test]
    fn excerpt_truncates_on_char_boundaries() {
        let text = "ingredient naïveté analysis shows nothing alarming";
        let short = excerpt(text, 20);
        assert!(short.ends_with('…'));
        assert!(short.chars().count() <= 21);
    }

    #[test]
    fn excerpt_keeps_short_reports_whole() {
        assert_eq!(excerpt("all good", 20), "all good");
    }
}
