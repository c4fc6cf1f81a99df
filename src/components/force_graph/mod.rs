//! Force-directed graph component and the graph data model behind it.

mod component;
mod render;
mod state;
mod text;
mod types;

pub mod fallback;
pub mod stats;

pub use component::ForceGraphCanvas;
pub use types::{GraphLink, GraphNode, GraphSnapshot, NodeKind, RawSnapshot};
