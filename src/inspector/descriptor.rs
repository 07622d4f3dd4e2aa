//! Metadata captured for a grabbed element
//!
//! [`GrabInfo`] is the payload the inspector posts to the sync endpoint
//! and the shape that ends up in `.grabbed_element`. Field names follow
//! the DOM spelling (`tagName`, `innerHTML`) so the file reads the same
//! no matter which side produced it.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::dom::{ComputedStyle, Dom, NodeId, Rect};
use super::selector;

/// Character cap applied to captured `innerText`
pub const MAX_TEXT_LEN: usize = 500;

/// Character cap applied to captured `innerHTML`
pub const MAX_HTML_LEN: usize = 1000;

/// Everything recorded about a grabbed element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrabInfo {
    pub tag_name: String,
    pub id: Option<String>,
    pub class_name: Option<String>,
    /// Full selector path from below `<body>` down to the element
    pub selector: String,
    pub inner_text: Option<String>,
    #[serde(rename = "innerHTML")]
    pub inner_html: Option<String>,
    pub child_count: usize,
    /// Remaining attributes, minus `id`, `class`, and `style`
    pub attributes: BTreeMap<String, String>,
    pub styles: ComputedStyle,
    pub rect: Rect,
    /// ISO-8601 capture time
    pub timestamp: String,
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl GrabInfo {
    /// Capture the metadata of `node` as it stands right now
    pub fn capture<D: Dom + ?Sized>(dom: &D, node: NodeId) -> Self {
        let attributes = dom
            .attributes(node)
            .into_iter()
            .filter(|(name, _)| !matches!(name.as_str(), "id" | "class" | "style"))
            .collect();

        Self {
            tag_name: dom.tag_name(node),
            id: dom.id(node).and_then(non_empty),
            class_name: dom.class_name(node).and_then(non_empty),
            selector: selector::element_path(dom, node),
            inner_text: non_empty(truncate_chars(&dom.inner_text(node), MAX_TEXT_LEN)),
            inner_html: non_empty(truncate_chars(&dom.inner_html(node), MAX_HTML_LEN)),
            child_count: dom.children(node).len(),
            attributes,
            styles: dom.computed_style(node),
            rect: dom.bounding_rect(node),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
