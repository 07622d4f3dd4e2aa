//! Element inspection engine and the types it shares with the overlay

pub mod descriptor;
pub mod dom;
pub mod engine;
pub mod selector;
pub mod stack;

#[cfg(test)]
pub(crate) mod testdom;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use descriptor::GrabInfo;
#[allow(unused_imports)]
pub use dom::{Dom, NodeId, Point, Rect, Size};
#[allow(unused_imports)]
pub use engine::{Inspector, NavKey, Overlay, Update};
