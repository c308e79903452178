//! The main Error type for archgraph.

use crate::{ErrorCategory, ErrorKind};
use std::fmt;

/// Unified error type for all archgraph operations.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the operation that caused this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Look up the first context value recorded under `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get the source error (if any).
    pub fn source_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_ref().map(|e| e.as_ref())
    }

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.category())?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}: {value}")?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.category())?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }
        writeln!(f)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {key}: {value}")?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {source:?}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::IoFailed, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl Error {
    /// Create an Unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Create an InvalidAttribute error
    pub fn invalid_attribute(attribute: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(
            ErrorKind::InvalidAttribute,
            format!("invalid {attribute} value '{value}'"),
        )
        .with_context(attribute, value)
    }

    /// Create a DuplicateShapeConflict error
    pub fn duplicate_shape_conflict(
        key: impl Into<String>,
        existing: impl Into<String>,
        requested: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let existing = existing.into();
        let requested = requested.into();
        Self::new(
            ErrorKind::DuplicateShapeConflict,
            format!("node '{key}' is already a {existing}, cannot re-register it as a {requested}"),
        )
        .with_context("key", key)
        .with_context("existing", existing)
        .with_context("requested", requested)
    }

    /// Create an UnbalancedCluster error
    pub fn unbalanced_cluster() -> Self {
        Self::new(
            ErrorKind::UnbalancedCluster,
            "end_cluster called with no open cluster",
        )
    }

    /// Create an UnclosedCluster error naming the innermost open cluster
    pub fn unclosed_cluster(name: impl Into<String>, depth: usize) -> Self {
        let name = name.into();
        Self::new(
            ErrorKind::UnclosedCluster,
            format!("cluster '{name}' is still open ({depth} open scope(s))"),
        )
        .with_context("cluster", name)
        .with_context("depth", depth.to_string())
    }

    /// Create a DanglingEdgeReference error for an undeclared source key
    pub fn dangling_from(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            ErrorKind::DanglingEdgeReference,
            format!("edge source '{key}' is not a declared node"),
        )
        .with_context("from_key", key)
    }

    /// Create a DanglingEdgeReference error for an undeclared target key
    pub fn dangling_to(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            ErrorKind::DanglingEdgeReference,
            format!("edge target '{key}' is not a declared node"),
        )
        .with_context("to_key", key)
    }

    /// Create an UnsupportedFormat error
    pub fn unsupported_format(format: impl Into<String>, engine: impl Into<String>) -> Self {
        let format = format.into();
        let engine = engine.into();
        Self::new(
            ErrorKind::UnsupportedFormat,
            format!("format '{format}' is not supported by {engine}"),
        )
        .with_context("format", format)
        .with_context("engine", engine)
    }

    /// Create an OutputPath error
    pub fn output_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutputPath, message).with_context("path", path)
    }

    /// Create a RenderEngine error carrying the engine diagnostic verbatim
    pub fn render_engine(engine: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::new(ErrorKind::RenderEngine, diagnostic).with_context("engine", engine)
    }
}
