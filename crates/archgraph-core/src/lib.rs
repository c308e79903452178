//! In-memory model of directed, clustered architecture graphs.
//!
//! Build a [`Graph`] with [`GraphBuilder`], then hand it to a renderer. Nothing
//! in this crate performs I/O.
//!
//! ```rust
//! use archgraph_core::{Direction, EdgeAttrs, GraphBuilder, Shape};
//!
//! # fn main() -> archgraph_core::Result<()> {
//! let mut builder = GraphBuilder::new("Example");
//! builder.set_direction(Direction::LeftToRight);
//! builder.add_node("a", "A", Shape::Box)?;
//! builder.add_node("b", "B", Shape::Diamond)?;
//! builder.add_edge_with("a", "b", EdgeAttrs::labeled("go"));
//!
//! let graph = builder.build()?;
//! graph.validate()?;
//! # Ok(())
//! # }
//! ```

pub mod attr;
pub mod builder;
pub mod graph;

pub use archgraph_error::{Error, ErrorCategory, ErrorKind, Result};
pub use attr::{
    ClusterAttrs, Color, Direction, EdgeAttrs, GraphAttrs, Justify, Label, LineStyle, NodeStyle,
    Shape, Style, StyleSet,
};
pub use builder::{BuilderConfig, GraphBuilder};
pub use graph::{CLUSTER_PREFIX, Cluster, ClusterId, Edge, Graph, Node, Scope};
