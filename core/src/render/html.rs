use super::{PoemSection, ResultView};

use std::fmt::Write;

/// HTML-escape a string into the output buffer.
pub fn escape_html_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_html_into(&mut out, s);
    out
}

/// Result panel markup. Every interpolated value is escaped, including the
/// emotion keys used as class names.
pub fn render_html(view: &ResultView) -> String {
    let catalog = view.locale.catalog();
    let mut out = String::with_capacity(1024);

    let _ = write!(out, r#"<div class="analysis-result" dir="{}">"#, view.locale.dir());

    out.push_str(r#"<div class="emotion-section"><h2>"#);
    escape_html_into(&mut out, catalog.emotions_heading);
    out.push_str(r#"</h2><div class="emotion-card"><div class="emotion-main"><span class="emotion-label">"#);
    escape_html_into(&mut out, catalog.emotion_caption);
    out.push_str(r#"</span><span class="emotion-value "#);
    escape_html_into(&mut out, &view.emotion_key);
    out.push_str(r#"">"#);
    escape_html_into(&mut out, &view.emotion_label);
    out.push_str(r#"</span></div><div class="confidence"><span class="confidence-label">"#);
    escape_html_into(&mut out, catalog.confidence_label);
    out.push_str(r#"</span><span class="confidence-value">"#);
    escape_html_into(&mut out, &view.confidence);
    out.push_str("</span></div></div>");

    out.push_str(r#"<div class="all-emotions"><h3>"#);
    escape_html_into(&mut out, catalog.all_emotions_heading);
    out.push_str(r#"</h3><div class="emotion-bars">"#);
    for bar in &view.bars {
        out.push_str(r#"<div class="emotion-bar-container"><div class="emotion-bar-label"><span>"#);
        escape_html_into(&mut out, &bar.label);
        out.push_str("</span><span>");
        escape_html_into(&mut out, &bar.percent);
        out.push_str(r#"</span></div><div class="emotion-bar-bg"><div class="emotion-bar-fill "#);
        escape_html_into(&mut out, &bar.key);
        out.push_str(r#"" style="width: "#);
        escape_html_into(&mut out, &bar.percent);
        out.push_str(r#""></div></div></div>"#);
    }
    out.push_str("</div></div></div>");

    out.push_str(r#"<div class="poetry-section"><h2>"#);
    escape_html_into(&mut out, catalog.poetry_heading);
    out.push_str("</h2>");
    match &view.poem {
        PoemSection::Poem(text) => {
            out.push_str(
                r#"<div class="poetry-cards"><div class="poetry-card"><div class="poetry-text">"#,
            );
            escape_html_into(&mut out, text);
            out.push_str("</div></div></div>");
        }
        PoemSection::Empty => {
            out.push_str(r#"<p class="poetry-empty">"#);
            escape_html_into(&mut out, catalog.no_poems);
            out.push_str("</p>");
        }
    }
    out.push_str("</div></div>");

    out
}

/// Error banner markup.
pub fn render_error_banner(message: &str) -> String {
    let mut out = String::from(r#"<div class="error-message">⚠️ "#);
    escape_html_into(&mut out, message);
    out.push_str("</div>");
    out
}
