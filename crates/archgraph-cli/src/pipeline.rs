//! Build diagrams and hand them to the renderer.

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{error, info};

use archgraph_core::Result;
use archgraph_dot::to_dot;
use archgraph_render::{LayoutEngine, RenderDispatcher};

use crate::diagrams::Diagram;
use crate::options::RenderOptions;

/// Build one diagram and render it to `<output_dir>/<file_name>.<format>`.
pub fn render_diagram<E: LayoutEngine>(
    dispatcher: &RenderDispatcher<E>,
    diagram: Diagram,
    opts: &RenderOptions,
) -> Result<PathBuf> {
    let graph = diagram
        .build(opts.builder_config())
        .map_err(|err| err.with_context("diagram", diagram.to_string()))?;
    dispatcher.render(&graph, &opts.output_dir, diagram.file_name(), &opts.format)
}

/// Render several diagrams in parallel.
///
/// Every diagram targets its own artifact path, so the renders are
/// independent; one failure does not stop the others. Results come back in
/// the order of `diagrams`.
pub fn render_diagrams<E: LayoutEngine>(
    dispatcher: &RenderDispatcher<E>,
    diagrams: &[Diagram],
    opts: &RenderOptions,
) -> Vec<(Diagram, Result<PathBuf>)> {
    let start = Instant::now();
    let results: Vec<_> = diagrams
        .par_iter()
        .map(|&diagram| (diagram, render_diagram(dispatcher, diagram, opts)))
        .collect();

    for (diagram, result) in &results {
        if let Err(err) = result {
            error!(diagram = %diagram, error = %err, "render failed");
        }
    }
    info!(
        count = diagrams.len(),
        "Rendering: {:.2}s",
        start.elapsed().as_secs_f64()
    );
    results
}

/// The validated DOT source for `diagram`, without running any engine.
pub fn dot_source(diagram: Diagram, opts: &RenderOptions) -> Result<String> {
    let graph = diagram.build(opts.builder_config())?;
    graph
        .validate()
        .map_err(|err| err.with_context("diagram", diagram.to_string()))?;
    Ok(to_dot(&graph))
}
