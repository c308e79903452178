//! archgraph command-line interface.
//!
pub mod diagrams;
pub mod options;
pub mod pipeline;

pub use diagrams::Diagram;
pub use options::RenderOptions;
pub use pipeline::{dot_source, render_diagram, render_diagrams};
