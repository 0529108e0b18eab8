//! Show command - render a part with heading anchors and query highlights

use std::path::Path;

use color_eyre::eyre::Result;
use ng4eb_core::node::{ContentNode, NodeKind};
use ng4eb_nav::{NavigationResolver, SeoMeta, parse_location};
use ng4eb_parser::{MarkdownParser, html_escape, render_html};
use ng4eb_search::{Decoration, QueryHighlighter};

use crate::Book;

/// Run the show command.
pub fn run(config_path: &Path, path: &str, query: Option<&str>, html: bool) -> Result<()> {
    let book = Book::open(config_path)?;
    print!("{}", render(&book, path, query, html)?);
    Ok(())
}

/// Render the part at `path`.
///
/// The highlight query comes from `query` or, failing that, from a
/// `?query=` parameter on the path itself, the way search result links
/// carry it.
pub fn render(book: &Book, path: &str, query: Option<&str>, html: bool) -> Result<String> {
    let key = parse_location(path)?;
    let query = query.map(str::to_string).or_else(|| query_from_path(path));

    let entry = book.corpus.entry(key)?;
    let mut blocks = MarkdownParser::new().parse_body(&entry.body);
    let decoration = QueryHighlighter::new().decorate(&mut blocks, query.as_deref());
    let navigation = NavigationResolver::new(&book.corpus).resolve_key(key)?;

    if html {
        let frontmatter = book.corpus.frontmatter(key)?;
        let seo = SeoMeta::for_part(&book.config, key, &entry.title, frontmatter);

        let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str(&seo.to_html());
        out.push_str("</head>\n<body>\n");
        out.push_str(&outline_html(&decoration));
        out.push_str("<article>\n");
        out.push_str(&render_html(&blocks));
        out.push_str("</article>\n<nav>\n");
        for (rel, link) in [("prev", &navigation.prev), ("next", &navigation.next)] {
            if !link.is_empty() {
                out.push_str(&format!(
                    "<a rel=\"{rel}\" href=\"{}\">{}</a>\n",
                    html_escape(&link.path),
                    html_escape(&link.title)
                ));
            }
        }
        out.push_str("</nav>\n</body>\n</html>\n");
        return Ok(out);
    }

    let mut out = format!("{}\n\n", navigation.title);

    if !decoration.headings.is_empty() {
        out.push_str("Sections:\n");
        for heading in &decoration.headings {
            out.push_str(&format!("  #{} {}\n", heading.id, heading.text));
        }
        out.push('\n');
    }

    if let Some(query) = &query {
        out.push_str(&format!(
            "{} match(es) for \"{query}\"\n\n",
            decoration.matches.len()
        ));
    }

    for block in &blocks {
        let text = plain_text(block);
        if !text.trim().is_empty() {
            out.push_str(text.trim_end());
            out.push_str("\n\n");
        }
    }
    Ok(out)
}

/// Value of a `query` parameter in a path such as
/// `/book/ch5/p1?query=service#2`.
pub fn query_from_path(path: &str) -> Option<String> {
    let (_, params) = path.split_once('?')?;
    let params = params.split('#').next().unwrap_or_default();
    params
        .split('&')
        .find_map(|pair| pair.strip_prefix("query="))
        .and_then(|value| {
            urlencoding::decode(&value.replace('+', " "))
                .ok()
                .map(|decoded| decoded.into_owned())
        })
        .filter(|value| !value.is_empty())
}

fn outline_html(decoration: &Decoration) -> String {
    if decoration.headings.is_empty() {
        return String::new();
    }
    let mut html = String::from("<nav class=\"outline\"><ul>\n");
    for heading in &decoration.headings {
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a></li>\n",
            heading.id,
            html_escape(&heading.text)
        ));
    }
    html.push_str("</ul></nav>\n");
    html
}

/// Text of a block with markers shown as `[text]`.
fn plain_text(node: &ContentNode) -> String {
    match node {
        ContentNode::Text(text) => text.clone(),
        ContentNode::Html(_) => String::new(),
        ContentNode::Element(el) => {
            let inner: String = el.children.iter().map(plain_text).collect();
            match &el.kind {
                NodeKind::Mark => format!("[{inner}]"),
                NodeKind::Heading { level } => {
                    format!("{} {inner}", "#".repeat(usize::from(*level)))
                }
                NodeKind::ListItem => format!("- {}\n", inner.trim_end()),
                NodeKind::TableRow | NodeKind::TableHead => format!("{}\n", inner.trim_end()),
                NodeKind::TableCell => format!("{inner} | "),
                NodeKind::LineBreak => "\n".to_string(),
                _ => inner,
            }
        }
    }
}
