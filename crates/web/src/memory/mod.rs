//! Native, in-memory implementations of the page collaborators.
//!
//! Used by the test suite and by the `portfolio-preview` binary.

mod dom;
mod frames;
mod layout;
mod scaffold;
mod selector;
mod widgets;

pub use dom::{MemoryDom, NodeId};
pub use frames::ManualFrames;
pub use layout::{MemoryGrid, MemoryLayoutEngine};
pub use scaffold::{Scaffold, build_page, missing_landmarks};
pub use widgets::MemoryWidgets;
