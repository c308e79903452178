//! Turns a finished [`Graph`] into an artifact on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use archgraph_core::{Error, Graph, Result};
use archgraph_dot::to_dot;

use crate::engine::{GraphvizEngine, LayoutEngine};
use crate::output::OutputDir;

/// Renders graphs through a [`LayoutEngine`].
///
/// The dispatcher only reads the graph it is given, so one dispatcher and
/// one graph may be used from several threads at once as long as each call
/// targets a different artifact path.
#[derive(Debug, Clone)]
pub struct RenderDispatcher<E = GraphvizEngine> {
    engine: E,
    keep_source: bool,
}

impl RenderDispatcher<GraphvizEngine> {
    /// A dispatcher driving `dot` from `PATH`.
    pub fn graphviz() -> Self {
        Self::new(GraphvizEngine::default())
    }
}

impl<E: LayoutEngine> RenderDispatcher<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            keep_source: false,
        }
    }

    /// Also write the DOT source as `<base_name>.gv` next to the artifact.
    pub fn with_keep_source(mut self, keep_source: bool) -> Self {
        self.keep_source = keep_source;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Validate `graph` and return the DOT source the engine would receive.
    pub fn source(&self, graph: &Graph) -> Result<String> {
        graph
            .validate()
            .map_err(|err| err.with_operation("render::source"))?;
        Ok(to_dot(graph))
    }

    /// Render `graph` to `<output_dir>/<base_name>.<format>` and return the
    /// absolute artifact path.
    ///
    /// Order of work:
    /// 1. acquire `output_dir`, creating it if needed
    /// 2. reject formats the engine cannot produce
    /// 3. check that every edge endpoint is a declared node
    /// 4. hand the DOT source to the engine
    /// 5. atomically replace the artifact with the engine's bytes
    ///
    /// Steps 2 and 3 fail before the engine runs. No step leaves a partial
    /// artifact or a temporary file behind. Nothing is retried.
    pub fn render(
        &self,
        graph: &Graph,
        output_dir: impl AsRef<Path>,
        base_name: &str,
        format: &str,
    ) -> Result<PathBuf> {
        let start = Instant::now();
        check_base_name(base_name)?;

        let dir = OutputDir::acquire(output_dir)
            .map_err(|err| err.with_operation("render::render"))?;

        if !self.engine.supports_format(format) {
            return Err(Error::unsupported_format(format, self.engine.name())
                .with_operation("render::render"));
        }

        graph
            .validate()
            .map_err(|err| err.with_operation("render::render"))?;
        debug!(graph = graph.name(), "graph validated");

        let source = to_dot(graph);
        let bytes = self
            .engine
            .render(&source, format)
            .map_err(|err| err.with_context("graph", graph.name()).with_operation("render::render"))?;

        let artifact = dir.artifact_path(base_name, format);
        dir.write_atomic(&artifact, &bytes)?;

        if self.keep_source {
            let source_path = dir.source_path(base_name);
            fs::write(&source_path, source.as_bytes()).map_err(|err| {
                Error::from(err)
                    .with_context("path", source_path.display().to_string())
                    .with_operation("render::keep_source")
            })?;
        }

        info!(
            graph = graph.name(),
            path = %artifact.display(),
            format,
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "artifact written"
        );
        Ok(artifact)
    }
}

/// A base name becomes a single file name; it may not escape the output directory.
fn check_base_name(base_name: &str) -> Result<()> {
    let invalid = base_name.is_empty()
        || base_name == "."
        || base_name == ".."
        || base_name.contains(['/', '\\']);
    if invalid {
        return Err(Error::invalid_argument(format!(
            "'{base_name}' is not a valid artifact base name"
        ))
        .with_context("base_name", base_name)
        .with_operation("render::render"));
    }
    Ok(())
}
