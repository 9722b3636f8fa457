//! Interactive layout, selection and filtering engine for biomedical entity
//! graphs.
//!
//! The crate is split into a rendering-agnostic core and the desktop viewer
//! binary that drives it. A surface builds an [`Explorer`] from an ingested
//! [`GraphModel`], calls [`Explorer::tick`] every frame while the layout is
//! hot, forwards pointer events through the `on_*` hooks and reads per-element
//! display state back through [`Explorer::node_view`] and
//! [`Explorer::edge_view`].

pub mod detail;
pub mod error;
pub mod explorer;
pub mod filter;
pub mod graph;
pub mod ingest;
pub mod layout;
pub mod selection;
pub mod viewport;

mod util;

pub use detail::{DetailField, DetailRecord};
pub use error::IngestError;
pub use explorer::{EdgeView, Explorer, ExplorerConfig, NodeView};
pub use filter::{
    CategoryPolicy, EdgeDecoration, FilterCriteria, FilterPolicy, PolicyKind, ScalePolicy,
    ScaleSelection, Visibility, VisibilityFilter,
};
pub use graph::{
    Diagnostic, Edge, EdgeIndex, Element, GraphModel, Node, NodeIndex, RawEdge, RawNode,
    UNCATEGORIZED,
};
pub use ingest::{CategoryLookup, SourceFormat, load_graph, load_graph_or_empty};
pub use layout::{EdgeSegment, LayoutConfig, Simulation, TickFrame};
pub use selection::{ElementState, Selection, SelectionController};
pub use util::{humanize, stable_pair};
pub use viewport::ViewTransform;
