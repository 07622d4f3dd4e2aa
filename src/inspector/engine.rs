//! Inspector interaction engine
//!
//! Pure state machine behind the overlay: pointer, wheel, and keyboard
//! input go in, an overlay view-model comes out. The engine holds no UI.
//! Rendering (and the POST to the sync endpoint on grab) is up to the
//! embedding client.

use super::descriptor::GrabInfo;
use super::dom::{is_overlay_node, Dom, NodeId, Point, Rect, Size, OVERLAY_MARKER};
use super::selector::{breadcrumb, Breadcrumb};
use super::stack::ElementStack;

/// Pointer travel (in px) that releases a keyboard-navigation lock
pub const UNLOCK_DISTANCE: f64 = 4.0;

/// Padding (in px) between the tooltip, its anchor, and viewport edges
const TOOLTIP_PADDING: f64 = 8.0;

/// Navigation keys the inspector reacts to while the modifier is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Escape,
}

/// Highlight data for the currently selected element
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub node: NodeId,
    pub rect: Rect,
    /// Tooltip label, e.g. `target: button.primary`
    pub tooltip: String,
    pub breadcrumb: Breadcrumb,
    /// Dimensions, child count, and stack position,
    /// e.g. `120×40 · 2 children · 1/3`
    pub info_line: String,
}

/// What the overlay should show after an input event
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Crosshair position; `None` while the overlay is hidden
    pub pointer: Option<Point>,
    /// Highlight for the active element; `None` when nothing is selected
    pub selection: Option<Selection>,
}

impl Overlay {
    pub fn hidden() -> Self {
        Self {
            pointer: None,
            selection: None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.pointer.is_none() && self.selection.is_none()
    }
}

/// Result of feeding one input event to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub overlay: Overlay,
    /// Whether the embedding client should cancel the browser default
    /// for this event
    pub default_prevented: bool,
    /// Captured element metadata, present only after a commit click
    pub grabbed: Option<GrabInfo>,
}

impl Update {
    fn quiet(overlay: Overlay) -> Self {
        Self {
            overlay,
            default_prevented: false,
            grabbed: None,
        }
    }

    fn handled(overlay: Overlay) -> Self {
        Self {
            overlay,
            default_prevented: true,
            grabbed: None,
        }
    }
}

/// Element inspector driven by pointer and keyboard input.
///
/// The modifier key gates everything: input without it hides the overlay
/// or passes through untouched. Keyboard navigation locks the selection
/// in place until the pointer travels more than [`UNLOCK_DISTANCE`],
/// Escape is pressed, or the modifier is released.
pub struct Inspector<D: Dom> {
    dom: D,
    stack: ElementStack,
    locked: bool,
    visible: bool,
    pointer: Point,
}

impl<D: Dom> Inspector<D> {
    pub fn new(dom: D) -> Self {
        Self {
            dom,
            stack: ElementStack::new(),
            locked: false,
            visible: false,
            pointer: Point::default(),
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Node the highlight currently sits on
    pub fn active(&self) -> Option<NodeId> {
        self.stack.active()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Pointer moved to viewport coordinates `(x, y)`
    pub fn pointer_moved(&mut self, x: f64, y: f64, modifier: bool) -> Update {
        if !modifier {
            self.hide_all();
            return Update::quiet(Overlay::hidden());
        }

        let next = Point::new(x, y);
        if self.locked && self.pointer.distance_to(next) > UNLOCK_DISTANCE {
            self.locked = false;
        }
        self.pointer = next;
        self.visible = true;

        if !self.locked {
            self.stack = ElementStack::at_point(&self.dom, x, y);
        }
        Update::quiet(self.overlay())
    }

    /// Wheel scrolled by `delta_y` (positive = scroll down = outward)
    pub fn wheel(&mut self, delta_y: f64, modifier: bool) -> Update {
        if !modifier || self.stack.is_empty() {
            return Update::quiet(self.overlay());
        }

        if delta_y > 0.0 {
            self.stack.scroll_outward();
        } else {
            self.stack.scroll_inward();
        }
        Update::handled(self.overlay())
    }

    /// Navigation key pressed
    pub fn key_pressed(&mut self, key: NavKey, modifier: bool) -> Update {
        let Some(active) = self.stack.active() else {
            return Update::quiet(self.overlay());
        };
        if !modifier {
            return Update::quiet(self.overlay());
        }

        if key == NavKey::Escape {
            self.locked = false;
            self.stack = ElementStack::at_point(&self.dom, self.pointer.x, self.pointer.y);
            return Update::handled(self.overlay());
        }

        if let Some(next) = self.navigation_target(active, key) {
            self.locked = true;
            self.stack = ElementStack::rooted_at(&self.dom, next);
        }
        Update::handled(self.overlay())
    }

    /// Click while inspecting: capture the active element
    pub fn clicked(&mut self, modifier: bool) -> Update {
        let Some(active) = self.stack.active() else {
            return Update::quiet(self.overlay());
        };
        if !modifier {
            return Update::quiet(self.overlay());
        }

        Update {
            overlay: self.overlay(),
            default_prevented: true,
            grabbed: Some(GrabInfo::capture(&self.dom, active)),
        }
    }

    /// Modifier key released: tear the overlay down
    pub fn modifier_released(&mut self) -> Update {
        self.hide_all();
        Update::quiet(Overlay::hidden())
    }

    /// Current view-model without consuming an input event
    pub fn overlay(&self) -> Overlay {
        if !self.visible {
            return Overlay::hidden();
        }
        Overlay {
            pointer: Some(self.pointer),
            selection: self.stack.active().map(|node| self.selection_for(node)),
        }
    }

    fn hide_all(&mut self) {
        self.visible = false;
        self.locked = false;
        self.stack.clear();
    }

    fn navigation_target(&self, active: NodeId, key: NavKey) -> Option<NodeId> {
        match key {
            NavKey::Up => {
                let parent = self.dom.parent(active)?;
                if Some(parent) == self.dom.body()
                    || Some(parent) == self.dom.document_element()
                    || is_overlay_node(&self.dom, parent)
                {
                    None
                } else {
                    Some(parent)
                }
            }
            NavKey::Down => self
                .dom
                .children(active)
                .into_iter()
                .find(|&child| !is_overlay_node(&self.dom, child)),
            NavKey::Left => {
                let mut sibling = self.dom.previous_sibling(active);
                while let Some(node) = sibling {
                    if !is_overlay_node(&self.dom, node) {
                        return Some(node);
                    }
                    sibling = self.dom.previous_sibling(node);
                }
                None
            }
            NavKey::Right => {
                let mut sibling = self.dom.next_sibling(active);
                while let Some(node) = sibling {
                    if !is_overlay_node(&self.dom, node) {
                        return Some(node);
                    }
                    sibling = self.dom.next_sibling(node);
                }
                None
            }
            NavKey::Escape => None,
        }
    }

    fn selection_for(&self, node: NodeId) -> Selection {
        let rect = self.dom.bounding_rect(node);
        let info_line = format!(
            "{}×{} · {} children · {}/{}",
            rect.width.round() as i64,
            rect.height.round() as i64,
            self.dom.children(node).len(),
            self.stack.index() + 1,
            self.stack.len()
        );
        Selection {
            node,
            rect,
            tooltip: tooltip_label(&self.dom, node),
            breadcrumb: breadcrumb(&self.dom, node),
            info_line,
        }
    }
}

fn tooltip_label<D: Dom + ?Sized>(dom: &D, node: NodeId) -> String {
    let tag = dom.tag_name(node).to_lowercase();
    let class = dom.class_name(node).and_then(|list| {
        list.split_whitespace()
            .find(|c| !c.contains(OVERLAY_MARKER))
            .map(str::to_string)
    });
    match class {
        Some(class) => format!("target: {tag}.{class}"),
        None => format!("target: {tag}"),
    }
}

/// Place a measured tooltip relative to its anchor rect.
///
/// Preferred position is above the anchor; a tooltip that would leave
/// the viewport flips below, then falls back to inside the anchor, and
/// is always clamped horizontally.
pub fn place_tooltip(anchor: Rect, tip: Size, viewport: Size) -> Point {
    let mut top = anchor.y - tip.height - TOOLTIP_PADDING;
    let mut left = anchor.x;

    if top < TOOLTIP_PADDING {
        top = anchor.bottom() + TOOLTIP_PADDING;
    }
    if top + tip.height > viewport.height - TOOLTIP_PADDING {
        top = anchor.y + TOOLTIP_PADDING;
    }
    if left < TOOLTIP_PADDING {
        left = TOOLTIP_PADDING;
    }
    if left + tip.width > viewport.width - TOOLTIP_PADDING {
        left = viewport.width - tip.width - TOOLTIP_PADDING;
    }

    Point::new(left, top)
}
