//! In-memory document used by inspector tests

use super::dom::{ComputedStyle, Dom, NodeId, Rect, Size};

struct MockNode {
    tag: String,
    id: Option<String>,
    class: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Rect,
    text: String,
    html: String,
    attrs: Vec<(String, String)>,
    style: ComputedStyle,
}

impl MockNode {
    fn new(tag: &str, parent: Option<NodeId>, rect: Rect) -> Self {
        Self {
            tag: tag.to_uppercase(),
            id: None,
            class: None,
            parent,
            children: Vec::new(),
            rect,
            text: String::new(),
            html: String::new(),
            attrs: Vec::new(),
            style: default_style(),
        }
    }
}

fn default_style() -> ComputedStyle {
    ComputedStyle {
        color: "rgb(0, 0, 0)".to_string(),
        background_color: "rgba(0, 0, 0, 0)".to_string(),
        font_size: "16px".to_string(),
        padding: "0px".to_string(),
        margin: "0px".to_string(),
        display: "block".to_string(),
        position: "static".to_string(),
        width: "auto".to_string(),
        height: "auto".to_string(),
    }
}

/// Mutable mock document with an `<html>`/`<body>` frame preinstalled.
///
/// Hit testing descends from the root into the last child (topmost in
/// paint order) whose rectangle contains the point.
pub struct MockDom {
    nodes: Vec<MockNode>,
    viewport: Size,
}

impl MockDom {
    pub fn new() -> Self {
        let viewport = Size::new(1280.0, 800.0);
        let frame = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        let mut dom = Self {
            nodes: Vec::new(),
            viewport,
        };
        let html = dom.push(MockNode::new("html", None, frame));
        let body = dom.push(MockNode::new("body", Some(html), frame));
        dom.nodes[html.0].children.push(body);
        dom
    }

    fn push(&mut self, node: MockNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn body_node(&self) -> NodeId {
        NodeId(1)
    }

    pub fn add(&mut self, parent: NodeId, tag: &str, rect: Rect) -> NodeId {
        let node = self.push(MockNode::new(tag, Some(parent), rect));
        self.nodes[parent.0].children.push(node);
        node
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.0].id = Some(id.to_string());
        self.nodes[node.0]
            .attrs
            .push(("id".to_string(), id.to_string()));
    }

    pub fn set_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].class = Some(class.to_string());
        self.nodes[node.0]
            .attrs
            .push(("class".to_string(), class.to_string()));
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = text.to_string();
    }

    pub fn set_html(&mut self, node: NodeId, html: &str) {
        self.nodes[node.0].html = html.to_string();
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attrs
            .push((name.to_string(), value.to_string()));
    }

    pub fn set_style(&mut self, node: NodeId, style: ComputedStyle) {
        self.nodes[node.0].style = style;
    }

    fn hit(&self, node: NodeId, x: f64, y: f64) -> NodeId {
        for &child in self.nodes[node.0].children.iter().rev() {
            if self.nodes[child.0].rect.contains(x, y) {
                return self.hit(child, x, y);
            }
        }
        node
    }
}

impl Dom for MockDom {
    fn document_element(&self) -> Option<NodeId> {
        Some(self.root())
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body_node())
    }

    fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId> {
        let root = self.root();
        if !self.nodes[root.0].rect.contains(x, y) {
            return None;
        }
        Some(self.hit(root, x, y))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.nodes[node.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let index = siblings.iter().position(|&n| n == node)?;
        if index == 0 {
            None
        } else {
            Some(siblings[index - 1])
        }
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.nodes[node.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let index = siblings.iter().position(|&n| n == node)?;
        siblings.get(index + 1).copied()
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.nodes[node.0].tag.clone()
    }

    fn id(&self, node: NodeId) -> Option<String> {
        self.nodes[node.0].id.clone()
    }

    fn class_name(&self, node: NodeId) -> Option<String> {
        self.nodes[node.0].class.clone()
    }

    fn attributes(&self, node: NodeId) -> Vec<(String, String)> {
        self.nodes[node.0].attrs.clone()
    }

    fn inner_text(&self, node: NodeId) -> String {
        self.nodes[node.0].text.clone()
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.nodes[node.0].html.clone()
    }

    fn computed_style(&self, node: NodeId) -> ComputedStyle {
        self.nodes[node.0].style.clone()
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.nodes[node.0].rect
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_testing_returns_deepest_match() {
        let mut dom = MockDom::new();
        let outer = dom.add(dom.body_node(), "div", Rect::new(0.0, 0.0, 400.0, 400.0));
        let inner = dom.add(outer, "span", Rect::new(100.0, 100.0, 50.0, 50.0));

        assert_eq!(dom.element_from_point(120.0, 120.0), Some(inner));
        assert_eq!(dom.element_from_point(300.0, 300.0), Some(outer));
        assert_eq!(dom.element_from_point(500.0, 500.0), Some(dom.body_node()));
    }

    #[test]
    fn test_later_siblings_win_hit_testing() {
        let mut dom = MockDom::new();
        let below = dom.add(dom.body_node(), "div", Rect::new(0.0, 0.0, 200.0, 200.0));
        let above = dom.add(dom.body_node(), "div", Rect::new(0.0, 0.0, 200.0, 200.0));

        assert_eq!(dom.element_from_point(50.0, 50.0), Some(above));
        assert_ne!(dom.element_from_point(50.0, 50.0), Some(below));
    }

    #[test]
    fn test_sibling_navigation() {
        let mut dom = MockDom::new();
        let a = dom.add(dom.body_node(), "p", Rect::default());
        let b = dom.add(dom.body_node(), "p", Rect::default());
        let c = dom.add(dom.body_node(), "p", Rect::default());

        assert_eq!(dom.next_sibling(a), Some(b));
        assert_eq!(dom.next_sibling(c), None);
        assert_eq!(dom.previous_sibling(b), Some(a));
        assert_eq!(dom.previous_sibling(a), None);
    }
}
