//! Command-line options shared by every diagram command.

use std::path::PathBuf;

use clap::Args;

use archgraph_core::BuilderConfig;
use archgraph_render::{GraphvizEngine, Layout, RenderDispatcher};

/// Where and how artifacts are rendered.
#[derive(Args, Debug, Clone)]
pub struct RenderOptions {
    /// Directory artifacts are written to; created if missing.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        default_value = "output",
        env = "ARCHGRAPH_OUTPUT_DIR",
        global = true
    )]
    pub output_dir: PathBuf,

    /// Output format handed to the layout engine (svg, png, pdf, ...).
    #[arg(
        short = 'T',
        long,
        value_name = "FMT",
        default_value = "svg",
        env = "ARCHGRAPH_FORMAT",
        global = true
    )]
    pub format: String,

    /// Graphviz executable to run.
    #[arg(long, value_name = "PROGRAM", default_value = "dot", global = true)]
    pub engine: PathBuf,

    /// Graphviz layout algorithm: dot, neato, fdp, sfdp, circo, twopi, osage, patchwork
    #[arg(short = 'K', long, value_name = "NAME", default_value = "dot", global = true)]
    pub layout: Layout,

    /// Also write the DOT source as `<name>.gv` next to each artifact.
    #[arg(long = "keep-source", global = true)]
    pub keep_source: bool,

    /// Fail when a node key is registered twice with different shapes.
    #[arg(long, global = true)]
    pub strict: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            format: "svg".to_string(),
            engine: PathBuf::from("dot"),
            layout: Layout::default(),
            keep_source: false,
            strict: false,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_keep_source(mut self, keep_source: bool) -> Self {
        self.keep_source = keep_source;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn builder_config(&self) -> BuilderConfig {
        BuilderConfig::new().with_strict_shapes(self.strict)
    }

    /// A Graphviz-backed dispatcher configured from these options.
    pub fn dispatcher(&self) -> RenderDispatcher<GraphvizEngine> {
        let engine = GraphvizEngine::new()
            .with_program(&self.engine)
            .with_layout(self.layout);
        RenderDispatcher::new(engine).with_keep_source(self.keep_source)
    }
}
