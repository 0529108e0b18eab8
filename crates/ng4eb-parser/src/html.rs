//! HTML rendering of content blocks.

use ng4eb_core::node::{ContentNode, Element, NodeKind};

/// CSS class of rendered highlight markers.
pub const MARK_CLASS: &str = "query";

/// Render blocks to an HTML string.
pub fn render_html(blocks: &[ContentNode]) -> String {
    let mut html = String::new();
    for block in blocks {
        render_node(block, &mut html);
    }
    html
}

fn render_node(node: &ContentNode, html: &mut String) {
    match node {
        ContentNode::Text(text) => html.push_str(&html_escape(text)),
        ContentNode::Html(raw) => html.push_str(raw),
        ContentNode::Element(el) => render_element(el, html),
    }
}

fn render_children(el: &Element, html: &mut String) {
    for child in &el.children {
        render_node(child, html);
    }
}

fn render_element(el: &Element, html: &mut String) {
    let id_attr = el
        .id
        .as_ref()
        .map(|id| format!(" id=\"{}\"", html_escape(id)))
        .unwrap_or_default();

    match &el.kind {
        NodeKind::Heading { level } => {
            html.push_str(&format!("<h{level}{id_attr}>"));
            render_children(el, html);
            html.push_str(&format!("</h{level}>\n"));
        }
        NodeKind::CodeBlock { lang } => {
            match lang {
                Some(lang) => html.push_str(&format!(
                    "<pre><code class=\"language-{}\">",
                    html_escape(lang)
                )),
                None => html.push_str("<pre><code>"),
            }
            render_children(el, html);
            html.push_str("</code></pre>\n");
        }
        NodeKind::List { start: Some(1) } => wrap(el, html, "<ol>", "</ol>\n"),
        NodeKind::List { start: Some(start) } => {
            html.push_str(&format!("<ol start=\"{start}\">"));
            render_children(el, html);
            html.push_str("</ol>\n");
        }
        NodeKind::List { start: None } => wrap(el, html, "<ul>", "</ul>\n"),
        NodeKind::Link { href } => {
            html.push_str(&format!("<a href=\"{}\">", html_escape(href)));
            render_children(el, html);
            html.push_str("</a>");
        }
        NodeKind::Image { src } => {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" />",
                html_escape(src),
                html_escape(&el.text_content())
            ));
        }
        NodeKind::Rule => html.push_str("<hr />\n"),
        NodeKind::LineBreak => html.push_str("<br />\n"),
        NodeKind::Mark => {
            html.push_str(&format!("<span class=\"{MARK_CLASS}\">"));
            render_children(el, html);
            html.push_str("</span>");
        }
        NodeKind::Paragraph => wrap(el, html, "<p>", "</p>\n"),
        NodeKind::BlockQuote => wrap(el, html, "<blockquote>", "</blockquote>\n"),
        NodeKind::ListItem => wrap(el, html, "<li>", "</li>\n"),
        NodeKind::Table => wrap(el, html, "<table>", "</table>\n"),
        NodeKind::TableHead => wrap(el, html, "<thead><tr>", "</tr></thead>\n"),
        NodeKind::TableRow => wrap(el, html, "<tr>", "</tr>\n"),
        NodeKind::TableCell => wrap(el, html, "<td>", "</td>"),
        NodeKind::Emphasis => wrap(el, html, "<em>", "</em>"),
        NodeKind::Strong => wrap(el, html, "<strong>", "</strong>"),
        NodeKind::Strikethrough => wrap(el, html, "<del>", "</del>"),
        NodeKind::Code => wrap(el, html, "<code>", "</code>"),
    }
}

fn wrap(el: &Element, html: &mut String, open: &str, close: &str) {
    html.push_str(open);
    render_children(el, html);
    html.push_str(close);
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
