//! DOM access trait the inspector engine runs against
//!
//! The engine never touches a real browser. Everything it needs from the
//! page (hit testing, tree walks, computed styles) goes through [`Dom`],
//! so the element-picking logic can be driven and tested against any
//! document representation.

use serde::{Deserialize, Serialize};

/// Marker substring identifying overlay UI nodes.
///
/// Any element whose `id` or class list contains this string belongs to
/// the inspector itself and is invisible to hit testing and navigation.
pub const OVERLAY_MARKER: &str = "grabby";

/// Opaque handle to an element in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Position in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height pair, used for the viewport and for measured
/// overlay nodes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Bounding rectangle in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Subset of computed style properties captured for a grabbed element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyle {
    pub color: String,
    pub background_color: String,
    pub font_size: String,
    pub padding: String,
    pub margin: String,
    pub display: String,
    pub position: String,
    pub width: String,
    pub height: String,
}

/// Read access to a live document.
///
/// Implementations report the DOM as the browser sees it: tag names in
/// their canonical uppercase form, rectangles in viewport coordinates,
/// children in document order.
pub trait Dom {
    /// Root `<html>` element, if the document has one
    fn document_element(&self) -> Option<NodeId>;

    /// The `<body>` element, if the document has one
    fn body(&self) -> Option<NodeId>;

    /// Topmost element under the given viewport coordinates
    fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId>;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Canonical tag name, e.g. `DIV`
    fn tag_name(&self, node: NodeId) -> String;

    /// The `id` attribute, `None` when absent or empty
    fn id(&self, node: NodeId) -> Option<String>;

    /// Space-separated class list, `None` when absent or empty
    fn class_name(&self, node: NodeId) -> Option<String>;

    /// All attributes in document order, including `id`/`class`/`style`
    fn attributes(&self, node: NodeId) -> Vec<(String, String)>;

    fn inner_text(&self, node: NodeId) -> String;

    fn inner_html(&self, node: NodeId) -> String;

    fn computed_style(&self, node: NodeId) -> ComputedStyle;

    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// Current viewport dimensions
    fn viewport(&self) -> Size;
}

/// True when the node is part of the inspector's own overlay UI
pub fn is_overlay_node<D: Dom + ?Sized>(dom: &D, node: NodeId) -> bool {
    if let Some(id) = dom.id(node) {
        if id.contains(OVERLAY_MARKER) {
            return true;
        }
    }
    if let Some(class) = dom.class_name(node) {
        if class.contains(OVERLAY_MARKER) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(110.0, 60.0));
        assert!(rect.contains(50.0, 30.0));
        assert!(!rect.contains(9.9, 30.0));
        assert!(!rect.contains(50.0, 60.1));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(5.0, 6.0, 20.0, 10.0);
        assert_eq!(rect.right(), 25.0);
        assert_eq!(rect.bottom(), 16.0);
    }

    #[test]
    fn test_computed_style_serializes_camel_case() {
        let style = ComputedStyle {
            background_color: "rgb(255, 0, 0)".to_string(),
            font_size: "16px".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["backgroundColor"], "rgb(255, 0, 0)");
        assert_eq!(json["fontSize"], "16px");
        assert!(json.get("background_color").is_none());
    }
}
