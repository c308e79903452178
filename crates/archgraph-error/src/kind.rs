//! Error kinds for archgraph operations

use strum_macros::{Display, IntoStaticStr};

use crate::ErrorCategory;

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to tell a mistake in their own graph
/// description apart from a filesystem problem or an engine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // Builder configuration errors
    // =========================================================================
    /// A node key was re-registered with a different shape in strict mode
    DuplicateShapeConflict,

    /// `end_cluster` was called with no cluster open
    UnbalancedCluster,

    /// `build` was called while a cluster scope was still open
    UnclosedCluster,

    /// An attribute value could not be represented (e.g. malformed color)
    InvalidAttribute,

    /// Invalid argument passed to function
    InvalidArgument,

    // =========================================================================
    // Validation errors
    // =========================================================================
    /// An edge endpoint names a key that was never declared
    DanglingEdgeReference,

    /// The requested output format is not produced by the engine
    UnsupportedFormat,

    // =========================================================================
    // Resource errors
    // =========================================================================
    /// Output directory could not be acquired
    OutputPath,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Engine errors
    // =========================================================================
    /// The external layout engine failed or could not be started
    RenderEngine,

    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// The phase this kind of error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::DuplicateShapeConflict
            | ErrorKind::UnbalancedCluster
            | ErrorKind::UnclosedCluster
            | ErrorKind::InvalidAttribute
            | ErrorKind::InvalidArgument => ErrorCategory::Configuration,
            ErrorKind::DanglingEdgeReference | ErrorKind::UnsupportedFormat => {
                ErrorCategory::Validation
            }
            ErrorKind::OutputPath | ErrorKind::IoFailed => ErrorCategory::Resource,
            ErrorKind::RenderEngine => ErrorCategory::Engine,
            ErrorKind::Unexpected => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::UnclosedCluster.to_string(), "UnclosedCluster");
        assert_eq!(
            ErrorKind::DanglingEdgeReference.as_str(),
            "DanglingEdgeReference"
        );
    }

    #[test]
    fn test_category() {
        assert_eq!(
            ErrorKind::UnbalancedCluster.category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            ErrorKind::UnsupportedFormat.category(),
            ErrorCategory::Validation
        );
        assert_eq!(ErrorKind::OutputPath.category(), ErrorCategory::Resource);
        assert_eq!(ErrorKind::RenderEngine.category(), ErrorCategory::Engine);
    }
}
