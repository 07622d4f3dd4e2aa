//! Stack of elements under the pointer, innermost first

use super::dom::{is_overlay_node, Dom, NodeId};

/// Walk from `start` up to (but excluding) `<body>` and `<html>`,
/// collecting every node that is not part of the overlay UI.
fn collect_chain<D: Dom + ?Sized>(dom: &D, start: Option<NodeId>) -> Vec<NodeId> {
    let body = dom.body();
    let root = dom.document_element();
    let mut nodes = Vec::new();
    let mut current = start;
    while let Some(node) = current {
        if Some(node) == body || Some(node) == root {
            break;
        }
        if !is_overlay_node(dom, node) {
            nodes.push(node);
        }
        current = dom.parent(node);
    }
    nodes
}

/// The hovered element plus its ancestor chain.
///
/// Index 0 is the innermost element. Scrolling outward moves toward the
/// ancestors, scrolling inward moves back toward the leaf, and both
/// directions clamp at the stack bounds.
#[derive(Debug, Default, Clone)]
pub struct ElementStack {
    nodes: Vec<NodeId>,
    index: usize,
}

impl ElementStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack for the point under the pointer
    pub fn at_point<D: Dom + ?Sized>(dom: &D, x: f64, y: f64) -> Self {
        Self {
            nodes: collect_chain(dom, dom.element_from_point(x, y)),
            index: 0,
        }
    }

    /// Stack rooted at an explicitly selected element, used after
    /// keyboard navigation
    pub fn rooted_at<D: Dom + ?Sized>(dom: &D, node: NodeId) -> Self {
        Self {
            nodes: collect_chain(dom, Some(node)),
            index: 0,
        }
    }

    /// Currently selected node, if any
    pub fn active(&self) -> Option<NodeId> {
        self.nodes.get(self.index).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Zero-based position of the selection within the stack
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the selection one level toward the outermost ancestor.
    /// Returns whether the selection changed.
    pub fn scroll_outward(&mut self) -> bool {
        if self.nodes.is_empty() || self.index + 1 >= self.nodes.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move the selection one level toward the innermost element.
    /// Returns whether the selection changed.
    pub fn scroll_inward(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::super::testdom::MockDom;
    use super::*;
    use crate::inspector::dom::Rect;

    fn nested_dom() -> (MockDom, NodeId, NodeId, NodeId) {
        let mut dom = MockDom::new();
        let section = dom.add(dom.body_node(), "section", Rect::new(0.0, 0.0, 600.0, 600.0));
        let card = dom.add(section, "div", Rect::new(50.0, 50.0, 300.0, 300.0));
        let button = dom.add(card, "button", Rect::new(80.0, 80.0, 100.0, 40.0));
        (dom, section, card, button)
    }

    #[test]
    fn test_stack_is_innermost_first() {
        let (dom, section, card, button) = nested_dom();
        let stack = ElementStack::at_point(&dom, 100.0, 100.0);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.active(), Some(button));

        let mut stack = stack;
        stack.scroll_outward();
        assert_eq!(stack.active(), Some(card));
        stack.scroll_outward();
        assert_eq!(stack.active(), Some(section));
    }

    #[test]
    fn test_stack_excludes_body_and_html() {
        let (dom, ..) = nested_dom();
        let stack = ElementStack::at_point(&dom, 700.0, 700.0);
        assert!(stack.is_empty());
        assert_eq!(stack.active(), None);
    }

    #[test]
    fn test_scroll_clamps_at_both_ends() {
        let (dom, section, _, button) = nested_dom();
        let mut stack = ElementStack::at_point(&dom, 100.0, 100.0);

        assert!(!stack.scroll_inward());
        assert_eq!(stack.active(), Some(button));

        for _ in 0..10 {
            stack.scroll_outward();
        }
        assert_eq!(stack.active(), Some(section));
        assert!(!stack.scroll_outward());
        assert_eq!(stack.index(), stack.len() - 1);
    }

    #[test]
    fn test_overlay_nodes_are_skipped() {
        let mut dom = MockDom::new();
        let wrapper = dom.add(dom.body_node(), "div", Rect::new(0.0, 0.0, 400.0, 400.0));
        let overlay = dom.add(wrapper, "div", Rect::new(0.0, 0.0, 400.0, 400.0));
        dom.set_id(overlay, "grabby-highlight");
        let target = dom.add(overlay, "span", Rect::new(10.0, 10.0, 50.0, 20.0));

        let stack = ElementStack::at_point(&dom, 20.0, 20.0);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.active(), Some(target));

        let mut stack = stack;
        stack.scroll_outward();
        assert_eq!(stack.active(), Some(wrapper));
    }

    #[test]
    fn test_rooted_stack_starts_at_node() {
        let (dom, section, card, _) = nested_dom();
        let stack = ElementStack::rooted_at(&dom, card);
        assert_eq!(stack.active(), Some(card));
        assert_eq!(stack.len(), 2);

        let mut stack = stack;
        stack.scroll_outward();
        assert_eq!(stack.active(), Some(section));
    }

    #[test]
    fn test_empty_stack_scrolls_nowhere() {
        let mut stack = ElementStack::new();
        assert!(!stack.scroll_outward());
        assert!(!stack.scroll_inward());
        assert_eq!(stack.active(), None);
    }
}
