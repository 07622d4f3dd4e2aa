//! Human-readable selectors and ancestor paths for picked elements

use std::fmt;

use super::dom::{Dom, NodeId, OVERLAY_MARKER};

/// Maximum number of ancestors shown in a breadcrumb trail
pub const BREADCRUMB_DEPTH: usize = 5;

/// Compact selector for one element: `tag#id`, `tag.class`, or `tag`.
///
/// `<body>` and `<html>` map to the empty string. Utility classes with
/// pseudo-variant prefixes (anything containing `:`) and overlay classes
/// are never used as the representative class.
pub fn compact_selector<D: Dom + ?Sized>(dom: &D, node: NodeId) -> String {
    if Some(node) == dom.body() || Some(node) == dom.document_element() {
        return String::new();
    }

    let tag = dom.tag_name(node).to_lowercase();
    if let Some(id) = dom.id(node) {
        return format!("{tag}#{id}");
    }

    let class = dom.class_name(node).and_then(|list| {
        list.split_whitespace()
            .find(|c| !c.contains(':') && !c.contains(OVERLAY_MARKER))
            .map(str::to_string)
    });

    match class {
        Some(class) => format!("{tag}.{class}"),
        None => tag,
    }
}

/// Full selector path from the outermost ancestor below `<body>` down to
/// the element, joined with ` > `
pub fn element_path<D: Dom + ?Sized>(dom: &D, node: NodeId) -> String {
    let mut parts = Vec::new();
    let mut current = Some(node);
    while let Some(n) = current {
        if Some(n) == dom.body() || Some(n) == dom.document_element() {
            break;
        }
        parts.push(compact_selector(dom, n));
        current = dom.parent(n);
    }
    parts.reverse();
    parts.join(" > ")
}

/// Bounded ancestor trail for the overlay breadcrumb.
///
/// Segments run outermost to innermost; the final segment is the element
/// itself. `truncated` marks that more ancestors exist above the trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Breadcrumb {
    pub segments: Vec<String>,
    pub truncated: bool,
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.truncated {
            write!(f, "… › ")?;
        }
        write!(f, "{}", self.segments.join(" › "))
    }
}

/// Breadcrumb trail for an element, at most [`BREADCRUMB_DEPTH`] levels
pub fn breadcrumb<D: Dom + ?Sized>(dom: &D, node: NodeId) -> Breadcrumb {
    let mut segments = Vec::new();
    let mut current = Some(node);
    let mut depth = 0;

    while let Some(n) = current {
        if Some(n) == dom.body() || Some(n) == dom.document_element() || depth >= BREADCRUMB_DEPTH
        {
            break;
        }
        segments.push(compact_selector(dom, n));
        current = dom.parent(n);
        depth += 1;
    }

    let truncated = match current {
        Some(n) => Some(n) != dom.body() && Some(n) != dom.document_element(),
        None => false,
    };

    segments.reverse();
    Breadcrumb {
        segments,
        truncated,
    }
}
