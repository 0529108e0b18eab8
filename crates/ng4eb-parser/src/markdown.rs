//! Markdown parser using pulldown-cmark.
//!
//! Produces a list of top-level [`ContentNode`] blocks instead of an HTML
//! string so later passes (heading anchors, query highlighting) can work on
//! a tree.

use ng4eb_core::node::{ContentNode, Element, NodeKind};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

/// Markdown parser.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Element under construction. Frames without a kind are transparent:
/// their children are spliced into the parent when they close.
struct Frame {
    kind: Option<NodeKind>,
    id: Option<String>,
    children: Vec<ContentNode>,
}

impl MarkdownParser {
    /// Create a new markdown parser with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Parse a markdown body (no frontmatter) into blocks.
    pub fn parse_body(&self, body: &str) -> Vec<ContentNode> {
        let mut blocks = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();

        for event in Parser::new_ext(body, self.options) {
            match event {
                Event::Start(tag) => {
                    let id = match &tag {
                        Tag::Heading { id, .. } => id.as_ref().map(|i| i.to_string()),
                        _ => None,
                    };
                    stack.push(Frame {
                        kind: tag_kind(&tag),
                        id,
                        children: Vec::new(),
                    });
                }

                Event::End(_) => {
                    let Some(frame) = stack.pop() else {
                        continue;
                    };
                    match frame.kind {
                        Some(kind) => {
                            let node = ContentNode::Element(Element {
                                kind,
                                id: frame.id,
                                children: frame.children,
                            });
                            push_node(&mut stack, &mut blocks, node);
                        }
                        None => {
                            for child in frame.children {
                                push_node(&mut stack, &mut blocks, child);
                            }
                        }
                    }
                }

                Event::Text(text) => {
                    push_node(&mut stack, &mut blocks, ContentNode::text(text.as_ref()));
                }

                Event::Code(code) => {
                    let node =
                        ContentNode::element(NodeKind::Code, vec![ContentNode::text(code.as_ref())]);
                    push_node(&mut stack, &mut blocks, node);
                }

                Event::InlineMath(math) | Event::DisplayMath(math) => {
                    let node =
                        ContentNode::element(NodeKind::Code, vec![ContentNode::text(math.as_ref())]);
                    push_node(&mut stack, &mut blocks, node);
                }

                Event::Html(raw) | Event::InlineHtml(raw) => {
                    push_node(&mut stack, &mut blocks, ContentNode::Html(raw.to_string()));
                }

                Event::FootnoteReference(name) => {
                    push_node(&mut stack, &mut blocks, ContentNode::text(format!("[{name}]")));
                }

                Event::SoftBreak => {
                    push_node(&mut stack, &mut blocks, ContentNode::text("\n"));
                }

                Event::HardBreak => {
                    push_node(
                        &mut stack,
                        &mut blocks,
                        ContentNode::element(NodeKind::LineBreak, vec![]),
                    );
                }

                Event::Rule => {
                    push_node(
                        &mut stack,
                        &mut blocks,
                        ContentNode::element(NodeKind::Rule, vec![]),
                    );
                }

                Event::TaskListMarker(checked) => {
                    let marker = if checked { "[x] " } else { "[ ] " };
                    push_node(&mut stack, &mut blocks, ContentNode::text(marker));
                }
            }
        }

        blocks
    }
}

/// Append a node to the innermost open element, or to the top level.
/// Adjacent text nodes are merged so phrases split by the parser stay
/// searchable as one string.
fn push_node(stack: &mut [Frame], blocks: &mut Vec<ContentNode>, node: ContentNode) {
    let target = match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => blocks,
    };

    if let (ContentNode::Text(text), Some(ContentNode::Text(prev))) = (&node, target.last_mut()) {
        prev.push_str(text);
        return;
    }

    target.push(node);
}

/// Map a pulldown-cmark tag to a node kind. Tags without a counterpart
/// become transparent frames.
fn tag_kind(tag: &Tag) -> Option<NodeKind> {
    let kind = match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading {
            level: *level as u8,
        },
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(kind) => NodeKind::CodeBlock {
            lang: match kind {
                CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                _ => None,
            },
        },
        Tag::List(start) => NodeKind::List { start: *start },
        Tag::Item => NodeKind::ListItem,
        Tag::Table(_) => NodeKind::Table,
        Tag::TableHead => NodeKind::TableHead,
        Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link { dest_url, .. } => NodeKind::Link {
            href: dest_url.to_string(),
        },
        Tag::Image { dest_url, .. } => NodeKind::Image {
            src: dest_url.to_string(),
        },
        _ => return None,
    };
    Some(kind)
}
