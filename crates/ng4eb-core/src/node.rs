//! Rendered content tree.
//!
//! Markdown bodies are rendered into a list of top-level blocks, each a
//! small tree of [`ContentNode`]s. Query highlighting and heading anchors
//! are applied as transforms over this tree.

use serde::{Deserialize, Serialize};

/// Kind of an element node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum NodeKind {
    /// Heading, level 1-6.
    Heading { level: u8 },
    Paragraph,
    BlockQuote,
    /// Fenced or indented code block.
    CodeBlock { lang: Option<String> },
    /// Ordered list when `start` is set, bullet list otherwise.
    List { start: Option<u64> },
    ListItem,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    /// Inline code span.
    Code,
    Link { href: String },
    Image { src: String },
    Rule,
    LineBreak,
    /// Query highlight marker.
    Mark,
}

/// An element with its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Element kind.
    pub kind: NodeKind,

    /// Anchor id, if assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Child nodes in document order.
    #[serde(default)]
    pub children: Vec<ContentNode>,
}

impl Element {
    /// Create an element without an id.
    pub fn new(kind: NodeKind, children: Vec<ContentNode>) -> Self {
        Self {
            kind,
            id: None,
            children,
        }
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

/// A node in the rendered content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentNode {
    /// Plain text.
    Text(String),
    /// Raw HTML passed through from the markdown source.
    Html(String),
    /// An element with children.
    Element(Element),
}

impl ContentNode {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an element node.
    pub fn element(kind: NodeKind, children: Vec<ContentNode>) -> Self {
        Self::Element(Element::new(kind, children))
    }

    /// Create a highlight marker around `text`.
    pub fn mark(text: impl Into<String>) -> Self {
        Self::element(NodeKind::Mark, vec![Self::text(text)])
    }

    /// Element view of this node.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Mutable element view of this node.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Whether this node is a highlight marker.
    pub fn is_mark(&self) -> bool {
        matches!(self, Self::Element(el) if el.kind == NodeKind::Mark)
    }

    /// Heading level when this node is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Self::Element(Element {
                kind: NodeKind::Heading { level },
                ..
            }) => Some(*level),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants. Raw HTML is
    /// not text.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Html(_) => {}
            Self::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Maximum number of nested markers on any root-to-leaf path.
    pub fn mark_depth(&self) -> usize {
        match self {
            Self::Element(el) => {
                let below = el.children.iter().map(Self::mark_depth).max().unwrap_or(0);
                below + usize::from(el.kind == NodeKind::Mark)
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph() -> ContentNode {
        ContentNode::element(
            NodeKind::Paragraph,
            vec![
                ContentNode::text("Angular is a "),
                ContentNode::element(NodeKind::Strong, vec![ContentNode::text("framework")]),
                ContentNode::Html("<br>".to_string()),
                ContentNode::text("."),
            ],
        )
    }

    #[test]
    fn test_text_content() {
        assert_eq!(paragraph().text_content(), "Angular is a framework.");
    }

    #[test]
    fn test_heading_level() {
        let h2 = ContentNode::element(NodeKind::Heading { level: 2 }, vec![]);
        assert_eq!(h2.heading_level(), Some(2));
        assert_eq!(paragraph().heading_level(), None);
    }

    #[test]
    fn test_mark_depth() {
        assert_eq!(paragraph().mark_depth(), 0);

        let marked = ContentNode::element(
            NodeKind::Paragraph,
            vec![ContentNode::mark("Angular"), ContentNode::text(" rocks")],
        );
        assert_eq!(marked.mark_depth(), 1);

        let nested = ContentNode::element(NodeKind::Mark, vec![ContentNode::mark("x")]);
        assert_eq!(nested.mark_depth(), 2);
    }

    #[test]
    fn test_is_mark() {
        assert!(ContentNode::mark("q").is_mark());
        assert!(!ContentNode::text("q").is_mark());
    }
}
