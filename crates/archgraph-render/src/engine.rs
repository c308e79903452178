//! The external layout engine capability and its Graphviz binding.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use strum_macros::{AsRefStr, Display, EnumString};
use tracing::{debug, warn};

use archgraph_core::{Error, Result};

/// Anything that turns DOT source into rendered bytes.
///
/// Implementations must be usable from several threads at once so the same
/// engine can serve independent renders in parallel.
pub trait LayoutEngine: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Whether the engine can produce `format` (e.g. `svg`).
    fn supports_format(&self, format: &str) -> bool;

    /// Lay out `source` and return the artifact bytes.
    ///
    /// Engine-side failures are reported as `RenderEngine` errors whose
    /// message is the engine's own diagnostic, unmodified.
    fn render(&self, source: &str, format: &str) -> Result<Vec<u8>>;
}

/// Output formats the Graphviz binding accepts.
pub const GRAPHVIZ_FORMATS: &[&str] = &[
    "svg", "svgz", "png", "pdf", "jpg", "jpeg", "gif", "ps", "eps", "webp", "json", "plain",
    "xdot", "dot",
];

/// Graphviz layout algorithm (`-K`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    #[default]
    Dot,
    Neato,
    Fdp,
    Sfdp,
    Circo,
    Twopi,
    Osage,
    Patchwork,
}

/// Runs a Graphviz executable, feeding DOT on stdin and reading the artifact
/// from stdout.
#[derive(Debug, Clone)]
pub struct GraphvizEngine {
    program: PathBuf,
    layout: Layout,
}

impl Default for GraphvizEngine {
    fn default() -> Self {
        Self {
            program: PathBuf::from("dot"),
            layout: Layout::default(),
        }
    }
}

impl GraphvizEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific executable instead of `dot` from `PATH`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    fn command(&self, format: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(format!("-T{format}"))
            .arg(format!("-K{}", self.layout))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl LayoutEngine for GraphvizEngine {
    fn name(&self) -> &str {
        "graphviz"
    }

    fn supports_format(&self, format: &str) -> bool {
        GRAPHVIZ_FORMATS.contains(&format)
    }

    fn render(&self, source: &str, format: &str) -> Result<Vec<u8>> {
        let program = self.program.display().to_string();
        debug!(program = %program, format, layout = %self.layout, "invoking layout engine");

        let mut child = self.command(format).spawn().map_err(|err| {
            Error::render_engine(
                self.name(),
                format!("failed to start '{program}': {err}"),
            )
            .with_context("program", program.clone())
            .with_operation("graphviz::spawn")
            .set_source(err)
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::unexpected("engine stdin was not captured"))?;

        // Feed stdin from a second thread so a large artifact on stdout
        // cannot block the engine while we are still writing.
        let (written, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(source.as_bytes()));
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let output = output.map_err(|err| {
            Error::render_engine(self.name(), format!("failed to wait for '{program}': {err}"))
                .with_context("program", program.clone())
                .with_operation("graphviz::wait")
                .set_source(err)
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            let status = output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |code| code.to_string());
            return Err(Error::render_engine(self.name(), stderr)
                .with_context("program", program)
                .with_context("status", status)
                .with_operation("graphviz::render"));
        }

        match written {
            Ok(Ok(())) => {}
            // the engine exited before reading everything; its status decides
            Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {}
            Ok(Err(err)) => {
                return Err(Error::render_engine(
                    self.name(),
                    format!("failed to write to '{program}': {err}"),
                )
                .with_context("program", program)
                .with_operation("graphviz::write")
                .set_source(err));
            }
            Err(_) => {
                return Err(Error::unexpected("engine stdin writer panicked")
                    .with_operation("graphviz::write"));
            }
        }

        if !stderr.trim().is_empty() {
            warn!(program = %program, diagnostic = %stderr.trim_end(), "layout engine reported warnings");
        }
        debug!(bytes = output.stdout.len(), "layout engine finished");
        Ok(output.stdout)
    }
}
