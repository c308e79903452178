//! Rendering delegation: hands a validated graph to an external layout
//! engine and persists the artifact at a predictable path.
//!
//! - [`engine`]: the [`LayoutEngine`] capability and [`GraphvizEngine`]
//! - [`output`]: [`OutputDir`], explicit acquisition of the output directory
//! - [`dispatcher`]: [`RenderDispatcher`], which ties the steps together

pub mod dispatcher;
pub mod engine;
pub mod output;

pub use dispatcher::RenderDispatcher;
pub use engine::{GRAPHVIZ_FORMATS, GraphvizEngine, Layout, LayoutEngine};
pub use output::{OutputDir, SOURCE_EXTENSION};
