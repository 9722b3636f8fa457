mod build;
mod model;

pub use build::{RawEdge, RawNode};
pub use model::{Diagnostic, Edge, EdgeIndex, Element, GraphModel, Node, NodeIndex, UNCATEGORIZED};
