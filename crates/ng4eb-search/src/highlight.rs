//! Query highlighting and heading anchors over rendered content blocks.
//!
//! [`QueryHighlighter::decorate`] first strips every marker left by a
//! previous call, then numbers the section headings and wraps occurrences
//! of the query in [`NodeKind::Mark`] elements. Markers never nest.

use ng4eb_core::node::{ContentNode, Element, NodeKind};
use serde::Serialize;
use tracing::debug;

/// A section heading found while decorating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingRef {
    /// Index of the block in the decorated slice.
    pub block: usize,

    /// Assigned anchor id (`"1"`, `"2"`, ...).
    pub id: String,

    /// Heading text.
    pub text: String,
}

/// A highlight marker created while decorating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRef {
    /// Index of the block in the decorated slice.
    pub block: usize,

    /// Child indices from the block element down to the marker.
    pub path: Vec<usize>,

    /// Marked text.
    pub text: String,
}

/// Headings and markers produced by one decorate pass, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Decoration {
    pub headings: Vec<HeadingRef>,
    pub matches: Vec<MatchRef>,
}

/// Decorates rendered blocks with heading anchors and query markers.
#[derive(Debug, Clone, Copy)]
pub struct QueryHighlighter {
    heading_level: u8,
}

impl Default for QueryHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryHighlighter {
    /// Highlighter that anchors level-2 headings.
    pub fn new() -> Self {
        Self { heading_level: 2 }
    }

    /// Highlighter that anchors headings of another level.
    pub fn with_heading_level(level: u8) -> Self {
        Self {
            heading_level: level,
        }
    }

    /// Decorate `blocks` in place.
    ///
    /// Existing markers are removed before anything else, so calling this
    /// repeatedly with different queries never nests markers. An empty or
    /// missing query only clears markers and numbers headings.
    pub fn decorate(&self, blocks: &mut [ContentNode], query: Option<&str>) -> Decoration {
        let query = query.filter(|q| !q.is_empty());
        let variants = query.map(case_variants).unwrap_or_default();

        let mut decoration = Decoration::default();
        let mut next_heading = 1usize;

        for (idx, block) in blocks.iter_mut().enumerate() {
            let ContentNode::Element(el) = block else {
                continue;
            };

            clear_marks(el);

            if el.kind == (NodeKind::Heading {
                level: self.heading_level,
            }) {
                let id = next_heading.to_string();
                next_heading += 1;
                el.id = Some(id.clone());
                decoration.headings.push(HeadingRef {
                    block: idx,
                    id,
                    text: el.text_content(),
                });
            }

            let text = el.text_content();
            for variant in &variants {
                if text.contains(variant.as_str()) {
                    mark_occurrences(&mut el.children, variant);
                }
            }

            let mut path = Vec::new();
            collect_marks(el, idx, &mut path, &mut decoration.matches);
        }

        debug!(
            ?query,
            headings = decoration.headings.len(),
            matches = decoration.matches.len(),
            "Decorated content"
        );
        decoration
    }
}

/// The query as typed, capitalized, and lower-cased, without repeats.
fn case_variants(query: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::with_capacity(3);
    for candidate in [query.to_string(), capitalize(query), query.to_lowercase()] {
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Replace every marker below `el` with its children and re-merge the text
/// it split.
fn clear_marks(el: &mut Element) {
    let children = std::mem::take(&mut el.children);
    let mut cleared = Vec::with_capacity(children.len());

    for child in children {
        match child {
            ContentNode::Element(mut inner) if inner.kind == NodeKind::Mark => {
                clear_marks(&mut inner);
                for grandchild in inner.children {
                    push_merged(&mut cleared, grandchild);
                }
            }
            ContentNode::Element(mut inner) => {
                clear_marks(&mut inner);
                cleared.push(ContentNode::Element(inner));
            }
            other => push_merged(&mut cleared, other),
        }
    }

    el.children = cleared;
}

fn push_merged(nodes: &mut Vec<ContentNode>, node: ContentNode) {
    if let (ContentNode::Text(text), Some(ContentNode::Text(prev))) = (&node, nodes.last_mut()) {
        prev.push_str(text);
        return;
    }
    nodes.push(node);
}

/// Wrap each occurrence of `needle` in the text below `children`. Text that
/// is already inside a marker is left alone.
fn mark_occurrences(children: &mut Vec<ContentNode>, needle: &str) {
    let old = std::mem::take(children);

    for child in old {
        match child {
            ContentNode::Text(text) if text.contains(needle) => {
                let mut pieces = text.split(needle).peekable();
                while let Some(piece) = pieces.next() {
                    if !piece.is_empty() {
                        children.push(ContentNode::text(piece));
                    }
                    if pieces.peek().is_some() {
                        children.push(ContentNode::mark(needle));
                    }
                }
            }
            ContentNode::Element(mut el) if el.kind != NodeKind::Mark => {
                mark_occurrences(&mut el.children, needle);
                children.push(ContentNode::Element(el));
            }
            other => children.push(other),
        }
    }
}

fn collect_marks(el: &Element, block: usize, path: &mut Vec<usize>, out: &mut Vec<MatchRef>) {
    for (i, child) in el.children.iter().enumerate() {
        let ContentNode::Element(inner) = child else {
            continue;
        };
        path.push(i);
        if inner.kind == NodeKind::Mark {
            out.push(MatchRef {
                block,
                path: path.clone(),
                text: inner.text_content(),
            });
        } else {
            collect_marks(inner, block, path, out);
        }
        path.pop();
    }
}

/// Steps through the matches of a decoration, wrapping at either end.
#[derive(Debug, Clone, Default)]
pub struct MatchCursor {
    len: usize,
    current: Option<usize>,
}

impl MatchCursor {
    /// Cursor over `len` matches, positioned before the first.
    pub fn new(len: usize) -> Self {
        Self { len, current: None }
    }

    /// Current position, if any match has been visited.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Advance to the next match.
    pub fn next_match(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let next = match self.current {
            Some(i) => (i + 1) % self.len,
            None => 0,
        };
        self.current = Some(next);
        self.current
    }

    /// Step back to the previous match.
    pub fn previous_match(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let prev = match self.current {
            Some(0) | None => self.len - 1,
            Some(i) => i - 1,
        };
        self.current = Some(prev);
        self.current
    }
}
